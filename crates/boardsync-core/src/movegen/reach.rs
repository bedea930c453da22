//! 到達候補升（Reachability）
//!
//! センサーの誤検出（駒を持ち上げた瞬間のバウンドなど）で生じた推定手を弾くための
//! 幾何フィルタ。遮る駒も王手も考慮しない。

use crate::types::{PieceKind, Square, SquareSet};

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const KNIGHT: [(i8, i8); 8] =
    [(-1, 2), (1, 2), (2, 1), (2, -1), (-1, -2), (1, -2), (-2, 1), (-2, -1)];
// 周囲8升 + キャスリングの移動先（左右2筋）
const KING: [(i8, i8); 10] =
    [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1), (-2, 0), (2, 0)];
// 手番を区別しないため前後どちらの向きも含める
const PAWN: [(i8, i8); 8] = [(0, 1), (0, 2), (1, 1), (1, -1), (0, -1), (0, -2), (-1, -1), (-1, 1)];

fn steps(origin: Square, offsets: &[(i8, i8)]) -> SquareSet {
    offsets.iter().filter_map(|&(df, dr)| origin.offset(df, dr)).collect()
}

fn rays(origin: Square, directions: &[(i8, i8)]) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    for &(df, dr) in directions {
        let mut sq = origin;
        while let Some(next) = sq.offset(df, dr) {
            set.insert(next);
            sq = next;
        }
    }
    set
}

/// 駒種 `kind` が `origin` から移動しうる升の集合
pub fn candidates(kind: PieceKind, origin: Square) -> SquareSet {
    match kind {
        PieceKind::Rook => rays(origin, &ORTHOGONAL),
        PieceKind::Bishop => rays(origin, &DIAGONAL),
        PieceKind::Queen => rays(origin, &ORTHOGONAL) | rays(origin, &DIAGONAL),
        PieceKind::Knight => steps(origin, &KNIGHT),
        PieceKind::King => steps(origin, &KING),
        PieceKind::Pawn => steps(origin, &PAWN),
    }
}

/// `from` から `to` が駒種 `kind` の到達候補かどうか
#[inline]
pub fn is_reachable(kind: PieceKind, from: Square, to: Square) -> bool {
    candidates(kind, from).contains(to)
}
