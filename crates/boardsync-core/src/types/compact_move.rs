//! 送受信用の簡易指し手表記（"e2e4", "e7e8q"）

use super::{Move, PieceKind, Square};
use std::fmt;
use std::str::FromStr;

/// 移動元 + 移動先 + 成り駒（任意）
///
/// サーバーから受け取る指し手列の要素であり、サーバーへ送る指し手の形式でもある。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompactMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

/// CompactMove の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompactMoveError {
    #[error("invalid compact move length: {0:?} (expected 4 or 5 characters)")]
    InvalidLength(String),
    #[error("invalid square in compact move: {0:?}")]
    InvalidSquare(String),
    #[error("invalid promotion letter {1:?} in compact move {0:?}")]
    InvalidPromotion(String, char),
}

impl CompactMove {
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> CompactMove {
        CompactMove { from, to, promotion }
    }

    /// 推定した指し手を送信用の形式に変換する。キャスリングはキングの移動で表す
    pub fn from_move(mv: &Move) -> CompactMove {
        CompactMove { from: mv.from(), to: mv.to(), promotion: mv.promotion() }
    }
}

impl FromStr for CompactMove {
    type Err = CompactMoveError;

    fn from_str(s: &str) -> Result<CompactMove, CompactMoveError> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(CompactMoveError::InvalidLength(s.to_string()));
        }
        let from: Square =
            s[0..2].parse().map_err(|_| CompactMoveError::InvalidSquare(s.to_string()))?;
        let to: Square =
            s[2..4].parse().map_err(|_| CompactMoveError::InvalidSquare(s.to_string()))?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => Some(
                PieceKind::from_promotion_char(c.to_ascii_lowercase())
                    .ok_or_else(|| CompactMoveError::InvalidPromotion(s.to_string(), c))?,
            ),
        };
        Ok(CompactMove { from, to, promotion })
    }
}

impl fmt::Display for CompactMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(c) = self.promotion.and_then(PieceKind::promotion_char) {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CastleSide, Color, MoveShape};

    #[test]
    fn test_parse_compact_moves() {
        let mv: CompactMove = "e2e4".parse().unwrap();
        assert_eq!(mv.from.to_string(), "e2");
        assert_eq!(mv.to.to_string(), "e4");
        assert_eq!(mv.promotion, None);

        let promo: CompactMove = "e7e8q".parse().unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Queen));
        assert_eq!(promo.to_string(), "e7e8q");

        let upper: CompactMove = "a2a1N".parse().unwrap();
        assert_eq!(upper.promotion, Some(PieceKind::Knight));
        assert_eq!(upper.to_string(), "a2a1n");
    }

    #[test]
    fn test_parse_compact_move_errors() {
        assert!(matches!("e2".parse::<CompactMove>(), Err(CompactMoveError::InvalidLength(_))));
        assert!(matches!("e2e4qq".parse::<CompactMove>(), Err(CompactMoveError::InvalidLength(_))));
        assert!(matches!("e2é4".parse::<CompactMove>(), Err(CompactMoveError::InvalidLength(_))));
        assert!(matches!("e9e4".parse::<CompactMove>(), Err(CompactMoveError::InvalidSquare(_))));
        assert!(matches!(
            "e7e8k".parse::<CompactMove>(),
            Err(CompactMoveError::InvalidPromotion(_, 'k'))
        ));
    }

    #[test]
    fn test_from_move_castle_is_king_move() {
        let castle = Move::new(
            MoveShape::Castle {
                color: Color::Black,
                side: CastleSide::Queen,
                king_from: "e8".parse().unwrap(),
                king_to: "c8".parse().unwrap(),
            },
            "",
            "",
        );
        assert_eq!(CompactMove::from_move(&castle).to_string(), "e8c8");
    }
}
