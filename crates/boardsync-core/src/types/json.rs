use serde::{Deserialize, Serialize};

use crate::inference::OccupancyDelta;
use crate::position::Position;
use crate::session::Replay;
use crate::types::{Move, PlacedPiece};

/// 描画側で扱う駒のJSON表現
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PieceJson {
    /// "a1" ~ "h8"
    pub square: String,
    /// "white" | "black"
    pub color: String,
    /// "pawn" | "rook" | "knight" | "bishop" | "king" | "queen"
    pub kind: String,
}

/// 局面
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionJson {
    /// 盤面記法（FEN配置部）
    pub board: String,
    /// a1, b1, ..., h8 の順
    pub pieces: Vec<PieceJson>,
}

/// 指し手
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveJson {
    /// "e2-e4", "Ng1-f3", "0-0" など
    pub notation: String,
    /// サーバーへ送る形式（"e2e4", "e7e8q"）
    pub uci: String,
    pub color: String,
    pub from: String,
    pub to: String,
    pub kind: String,
    pub capture: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

/// 2局面の差分（盤面不一致の表示用）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DeltaJson {
    pub added: Vec<PieceJson>,
    pub removed: Vec<PieceJson>,
}

/// 指し手列の再生結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplayJson {
    pub moves: Vec<MoveJson>,
    pub plies: usize,
    /// "white" | "black"
    pub side_to_move: String,
    pub position: PositionJson,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped: Vec<String>,
}

impl From<&PlacedPiece> for PieceJson {
    fn from(p: &PlacedPiece) -> Self {
        PieceJson {
            square: p.square.to_string(),
            color: p.color.to_string(),
            kind: p.kind.to_string(),
        }
    }
}

impl From<&Position> for PositionJson {
    fn from(pos: &Position) -> Self {
        PositionJson {
            board: pos.to_board_text(),
            pieces: pos.pieces().map(|p| PieceJson::from(&p)).collect(),
        }
    }
}

impl From<&Move> for MoveJson {
    fn from(mv: &Move) -> Self {
        MoveJson {
            notation: mv.long_algebraic(),
            uci: crate::types::CompactMove::from_move(mv).to_string(),
            color: mv.color().to_string(),
            from: mv.from().to_string(),
            to: mv.to().to_string(),
            kind: mv.kind().to_string(),
            capture: mv.is_capture(),
            promotion: mv.promotion().map(|k| k.to_string()),
        }
    }
}

impl From<&OccupancyDelta> for DeltaJson {
    fn from(delta: &OccupancyDelta) -> Self {
        DeltaJson {
            added: delta.added.iter().map(PieceJson::from).collect(),
            removed: delta.removed.iter().map(PieceJson::from).collect(),
        }
    }
}

impl From<&Replay> for ReplayJson {
    fn from(replay: &Replay) -> Self {
        ReplayJson {
            moves: replay.moves.iter().map(MoveJson::from).collect(),
            plies: replay.plies,
            side_to_move: replay.side_to_move.to_string(),
            position: PositionJson::from(&replay.final_position),
            skipped: replay.skipped.clone(),
        }
    }
}
