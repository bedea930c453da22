//! 盤面差分（OccupancyDelta）

use crate::position::Position;
use crate::types::{PlacedPiece, SquareSet};

/// 2局面の差分
///
/// 比較は (手番, 駒種, 升) の3つ組の等値性で行う。並びは各局面の走査順
/// （段優先・筋従属）に従い、曖昧なケースのタイブレークはこの順序で決まる。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OccupancyDelta {
    /// 終了局面にあって開始局面にない駒
    pub added: Vec<PlacedPiece>,
    /// 開始局面にあって終了局面にない駒
    pub removed: Vec<PlacedPiece>,
}

impl OccupancyDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// 駒が現れた升
    pub fn added_squares(&self) -> SquareSet {
        self.added.iter().map(|p| p.square).collect()
    }

    /// 駒が消えた升
    pub fn removed_squares(&self) -> SquareSet {
        self.removed.iter().map(|p| p.square).collect()
    }
}

/// `start` から `end` への差分を計算する
pub fn diff(start: &Position, end: &Position) -> OccupancyDelta {
    // 1升1駒なので、3つ組の比較は同じ升の駒同士の比較に帰着する
    let removed = start.pieces().filter(|p| end.piece_at(p.square) != Some(p.piece())).collect();
    let added = end.pieces().filter(|p| start.piece_at(p.square) != Some(p.piece())).collect();
    OccupancyDelta { added, removed }
}
