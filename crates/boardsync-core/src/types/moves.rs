//! 推定された指し手（Move）と長形式代数記法への整形
//!
//! 指し手の形は `MoveShape` のタグ付き共用体で表し、各形は必要なフィールドだけを持つ。
//! キャスリングと成りが同時に立つような不正な組み合わせは型として表現できない。

use super::{Color, File, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// キャスリングの方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    King,
    Queen,
}

/// キャスリング方向の判定規則
///
/// - `RookDistance`: ルークの移動筋数が 2 を超えればクイーン側、それ以外はキング側
/// - `KingDestination`: キングの移動先が g 筋ならキング側、c 筋ならクイーン側
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CastleRule {
    #[default]
    RookDistance,
    KingDestination,
}

impl CastleRule {
    /// キングとルークの移動からキャスリング方向を決める。決まらなければ None
    pub fn side(
        self,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    ) -> Option<CastleSide> {
        match self {
            CastleRule::RookDistance => {
                if rook_from.file().distance(rook_to.file()) > 2 {
                    Some(CastleSide::Queen)
                } else {
                    Some(CastleSide::King)
                }
            }
            CastleRule::KingDestination => match king_to.file() {
                File::FileG => Some(CastleSide::King),
                File::FileC => Some(CastleSide::Queen),
                _ => None,
            },
        }
    }
}

impl std::str::FromStr for CastleRule {
    type Err = String;

    fn from_str(s: &str) -> Result<CastleRule, String> {
        match s {
            "rook-distance" => Ok(CastleRule::RookDistance),
            "king-destination" => Ok(CastleRule::KingDestination),
            other => Err(format!("unknown castle rule: {other}")),
        }
    }
}

/// 指し手の形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveShape {
    /// 駒取りなしの移動
    Normal { color: Color, from: Square, to: Square, kind: PieceKind },
    /// 移動先の駒を取る。ポーンが取りながら成った場合は `promotion` を持つ
    Capture {
        color: Color,
        from: Square,
        to: Square,
        kind: PieceKind,
        captured: PieceKind,
        promotion: Option<PieceKind>,
    },
    /// アンパッサン。取られるポーンは `captured_square` にいる
    EnPassant { color: Color, from: Square, to: Square, captured_square: Square },
    /// キャスリング（キングの移動で表す）
    Castle { color: Color, side: CastleSide, king_from: Square, king_to: Square },
    /// 駒取りなしの成り
    Promotion { color: Color, from: Square, to: Square, promotion: PieceKind },
}

/// サーバー側から付与される注記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MoveAnnotations {
    #[serde(default)]
    pub check: bool,
    #[serde(default)]
    pub mate: bool,
}

/// 推定された指し手
///
/// 推定元の2つの盤面記法を追跡・表示のために保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub shape: MoveShape,
    #[serde(default)]
    pub annotations: MoveAnnotations,
    pub start_board: String,
    pub end_board: String,
}

impl Move {
    pub fn new(
        shape: MoveShape,
        start_board: impl Into<String>,
        end_board: impl Into<String>,
    ) -> Move {
        Move {
            shape,
            annotations: MoveAnnotations::default(),
            start_board: start_board.into(),
            end_board: end_board.into(),
        }
    }

    /// 注記を付けた指し手を返す
    pub fn with_annotations(mut self, annotations: MoveAnnotations) -> Move {
        self.annotations = annotations;
        self
    }

    /// 指した側
    pub fn color(&self) -> Color {
        match self.shape {
            MoveShape::Normal { color, .. }
            | MoveShape::Capture { color, .. }
            | MoveShape::EnPassant { color, .. }
            | MoveShape::Castle { color, .. }
            | MoveShape::Promotion { color, .. } => color,
        }
    }

    /// 移動元（キャスリングはキングの移動元）
    pub fn from(&self) -> Square {
        match self.shape {
            MoveShape::Normal { from, .. }
            | MoveShape::Capture { from, .. }
            | MoveShape::EnPassant { from, .. }
            | MoveShape::Promotion { from, .. } => from,
            MoveShape::Castle { king_from, .. } => king_from,
        }
    }

    /// 移動先（キャスリングはキングの移動先）
    pub fn to(&self) -> Square {
        match self.shape {
            MoveShape::Normal { to, .. }
            | MoveShape::Capture { to, .. }
            | MoveShape::EnPassant { to, .. }
            | MoveShape::Promotion { to, .. } => to,
            MoveShape::Castle { king_to, .. } => king_to,
        }
    }

    /// 動かした駒の（移動前の）駒種
    pub fn kind(&self) -> PieceKind {
        match self.shape {
            MoveShape::Normal { kind, .. } | MoveShape::Capture { kind, .. } => kind,
            MoveShape::EnPassant { .. } | MoveShape::Promotion { .. } => PieceKind::Pawn,
            MoveShape::Castle { .. } => PieceKind::King,
        }
    }

    /// 成った駒種
    pub fn promotion(&self) -> Option<PieceKind> {
        match self.shape {
            MoveShape::Capture { promotion, .. } => promotion,
            MoveShape::Promotion { promotion, .. } => Some(promotion),
            _ => None,
        }
    }

    /// 駒取りかどうか（アンパッサンを含む）
    pub fn is_capture(&self) -> bool {
        matches!(self.shape, MoveShape::Capture { .. } | MoveShape::EnPassant { .. })
    }

    pub fn is_en_passant(&self) -> bool {
        matches!(self.shape, MoveShape::EnPassant { .. })
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        match self.shape {
            MoveShape::Castle { side, .. } => Some(side),
            _ => None,
        }
    }

    /// 長形式代数記法（"Ng1-f3", "e5xd6e.p.", "e7-e8Q", "0-0" など）
    pub fn long_algebraic(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.castle_side() {
            Some(CastleSide::King) => return f.write_str("0-0"),
            Some(CastleSide::Queen) => return f.write_str("0-0-0"),
            None => {}
        }
        let separator = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}{}", self.kind().notation_prefix(), self.from(), separator, self.to())?;
        if self.annotations.mate {
            f.write_str("#")?;
        }
        if self.annotations.check {
            f.write_str("+")?;
        }
        if self.is_en_passant() {
            f.write_str("e.p.")?;
        }
        if let Some(promotion) = self.promotion() {
            f.write_str(promotion.notation_prefix())?;
        }
        Ok(())
    }
}
