//! 駒種（PieceKind）と駒（Piece）

use super::{Color, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 駒種
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    King,
    Queen,
}

impl PieceKind {
    /// 全ての駒種
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::King,
        PieceKind::Queen,
    ];

    /// 大文字の駒文字（盤面記法の白駒）
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
        }
    }

    /// 長形式代数記法の駒記号（ポーンは空）
    #[inline]
    pub const fn notation_prefix(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Rook => "R",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::King => "K",
            PieceKind::Queen => "Q",
        }
    }

    /// 大文字・小文字を問わず駒文字から駒種へ
    #[inline]
    pub const fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'K' => Some(PieceKind::King),
            'Q' => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// 成り指定の文字（q/r/b/n）から駒種へ。ポーン・キングへの成りは存在しない
    #[inline]
    pub const fn from_promotion_char(c: char) -> Option<PieceKind> {
        match c {
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            _ => None,
        }
    }

    /// CompactMove の成り指定文字
    #[inline]
    pub const fn promotion_char(self) -> Option<char> {
        match self {
            PieceKind::Queen => Some('q'),
            PieceKind::Rook => Some('r'),
            PieceKind::Bishop => Some('b'),
            PieceKind::Knight => Some('n'),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for PieceKind {
    type Err = String;

    /// "knight" のような名前、または "N" のような駒文字を受け付ける
    fn from_str(s: &str) -> Result<PieceKind, String> {
        let lower = s.to_ascii_lowercase();
        if let Some(kind) = PieceKind::ALL.iter().copied().find(|k| k.to_string() == lower) {
            return Ok(kind);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                PieceKind::from_letter(c).ok_or_else(|| format!("unknown piece: {s}"))
            }
            _ => Err(format!("unknown piece: {s}")),
        }
    }
}

/// 駒（手番 + 駒種）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece { color, kind }
    }

    /// 盤面記法の文字（白は大文字、黒は小文字）
    #[inline]
    pub const fn to_char(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// 盤面記法の文字から駒へ
    #[inline]
    pub const fn from_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        match PieceKind::from_letter(c) {
            Some(kind) => Some(Piece { color, kind }),
            None => None,
        }
    }

    /// 升に置いた駒を作る
    #[inline]
    pub const fn at(self, square: Square) -> PlacedPiece {
        PlacedPiece { color: self.color, kind: self.kind, square }
    }
}

/// 盤上の駒（手番 + 駒種 + 升）
///
/// 差分計算ではこの3つ組の等値性で比較する（駒の同一性は追跡しない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
}

impl PlacedPiece {
    #[inline]
    pub const fn piece(self) -> Piece {
        Piece { color: self.color, kind: self.kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char_round_trip() {
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_char(piece.to_char()), Some(piece));
            }
        }
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::from_char('3'), None);
    }

    #[test]
    fn test_piece_case_is_color() {
        assert_eq!(Piece::from_char('K'), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(Piece::from_char('n'), Some(Piece::new(Color::Black, PieceKind::Knight)));
    }

    #[test]
    fn test_promotion_chars() {
        assert_eq!(PieceKind::from_promotion_char('q'), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_promotion_char('n'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_promotion_char('k'), None);
        assert_eq!(PieceKind::from_promotion_char('Q'), None);
        assert_eq!(PieceKind::Rook.promotion_char(), Some('r'));
        assert_eq!(PieceKind::Pawn.promotion_char(), None);
    }

    #[test]
    fn test_piece_kind_from_str() {
        assert_eq!("knight".parse::<PieceKind>(), Ok(PieceKind::Knight));
        assert_eq!("Q".parse::<PieceKind>(), Ok(PieceKind::Queen));
        assert_eq!("p".parse::<PieceKind>(), Ok(PieceKind::Pawn));
        assert!("dragon".parse::<PieceKind>().is_err());
    }
}
