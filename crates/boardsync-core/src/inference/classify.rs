//! 差分からの指し手推定（決定表）
//!
//! 差分は以下の表を上から順に評価し、最初に一致した行で指し手の形を決める。
//!
//! | 追加 | 除去 | 条件                                             | 結果                 |
//! |------|------|--------------------------------------------------|----------------------|
//! | 1    | 1    | 手番・駒種が同じ                                 | Normal               |
//! | 1    | 1    | 手番が同じ、除去がポーン、追加がポーン以外       | Promotion            |
//! | 1    | 2    | 相手の駒が移動先にいた                           | Capture              |
//! | 1    | 2    | 除去がポーン2つ、相手が4/5段目、移動先が3/6段目  | EnPassant            |
//! | 2    | 2    | キングとルークが1組ずつ（同じ手番）              | Castle               |
//!
//! どれにも一致しない差分は `Classification::Unclassified` になる。呼び出し側は
//! 2つの盤面が一時的に同期していないとみなし、履歴を進めずに次のポーリングを待つ。

use super::{OccupancyDelta, diff};
use crate::position::decode;
use crate::types::{CastleRule, Move, MoveShape, PieceKind, PlacedPiece, Rank};

/// 推定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// 指し手が1つに決まった
    Moved(Move),
    /// 差分がない
    Unchanged,
    /// 差分はあるが、どの形にも当てはまらない
    Unclassified,
}

impl Classification {
    pub fn into_move(self) -> Option<Move> {
        match self {
            Classification::Moved(mv) => Some(mv),
            Classification::Unchanged | Classification::Unclassified => None,
        }
    }

    pub fn as_move(&self) -> Option<&Move> {
        match self {
            Classification::Moved(mv) => Some(mv),
            Classification::Unchanged | Classification::Unclassified => None,
        }
    }
}

/// 既定の規則（`CastleRule::RookDistance`）で差分を分類する
pub fn classify(delta: &OccupancyDelta, start_board: &str, end_board: &str) -> Classification {
    classify_with(delta, start_board, end_board, CastleRule::default())
}

/// キャスリング方向の規則を指定して差分を分類する
pub fn classify_with(
    delta: &OccupancyDelta,
    start_board: &str,
    end_board: &str,
    rule: CastleRule,
) -> Classification {
    if delta.is_empty() {
        return Classification::Unchanged;
    }
    let shape = match (delta.added.as_slice(), delta.removed.as_slice()) {
        ([added], [removed]) => single_piece(*added, *removed),
        ([end], [first, second]) => capture(*end, [*first, *second]),
        ([a0, a1], [r0, r1]) => castle([*a0, *a1], [*r0, *r1], rule),
        _ => None,
    };
    match shape {
        Some(shape) => {
            log::trace!("classified {start_board} -> {end_board} as {shape:?}");
            Classification::Moved(Move::new(shape, start_board, end_board))
        }
        None => {
            log::trace!(
                "unclassified delta {start_board} -> {end_board}: +{} -{}",
                delta.added.len(),
                delta.removed.len()
            );
            Classification::Unclassified
        }
    }
}

/// 盤面記法2つから直接推定する
pub fn infer(start_board: &str, end_board: &str) -> Classification {
    infer_with(start_board, end_board, CastleRule::default())
}

pub fn infer_with(start_board: &str, end_board: &str, rule: CastleRule) -> Classification {
    let delta = diff(&decode(start_board), &decode(end_board));
    classify_with(&delta, start_board, end_board, rule)
}

/// 追加1・除去1: 通常の移動か、駒取りなしの成り
fn single_piece(added: PlacedPiece, removed: PlacedPiece) -> Option<MoveShape> {
    if added.color != removed.color {
        return None;
    }
    if added.kind == removed.kind {
        return Some(MoveShape::Normal {
            color: removed.color,
            from: removed.square,
            to: added.square,
            kind: removed.kind,
        });
    }
    if removed.kind == PieceKind::Pawn && added.kind != PieceKind::Pawn {
        return Some(MoveShape::Promotion {
            color: removed.color,
            from: removed.square,
            to: added.square,
            promotion: added.kind,
        });
    }
    None
}

/// 追加1・除去2: 駒取り（アンパッサン・取りながらの成りを含む）
fn capture(end: PlacedPiece, removed: [PlacedPiece; 2]) -> Option<MoveShape> {
    // 走査順で先に見つかった同じ手番の駒を動かした駒とみなす
    let mover_index = removed.iter().position(|p| p.color == end.color)?;
    let mover = removed[mover_index];
    let candidate = removed[1 - mover_index];
    if candidate.color == mover.color {
        return None;
    }

    if candidate.square == end.square {
        let promotion = (mover.kind == PieceKind::Pawn && end.kind != PieceKind::Pawn)
            .then_some(end.kind);
        return Some(MoveShape::Capture {
            color: end.color,
            from: mover.square,
            to: end.square,
            kind: mover.kind,
            captured: candidate.kind,
            promotion,
        });
    }

    let en_passant_ranks = matches!(
        (candidate.square.rank(), end.square.rank()),
        (Rank::Rank4, Rank::Rank3) | (Rank::Rank5, Rank::Rank6)
    );
    if mover.kind == PieceKind::Pawn && candidate.kind == PieceKind::Pawn && en_passant_ranks {
        return Some(MoveShape::EnPassant {
            color: end.color,
            from: mover.square,
            to: end.square,
            captured_square: candidate.square,
        });
    }
    None
}

/// 追加2・除去2: キャスリング
fn castle(
    added: [PlacedPiece; 2],
    removed: [PlacedPiece; 2],
    rule: CastleRule,
) -> Option<MoveShape> {
    let pick = |pieces: &[PlacedPiece; 2], kind: PieceKind| -> Option<PlacedPiece> {
        let mut found = pieces.iter().filter(|p| p.kind == kind);
        match (found.next(), found.next()) {
            (Some(p), None) => Some(*p),
            _ => None,
        }
    };
    let king_from = pick(&removed, PieceKind::King)?;
    let king_to = pick(&added, PieceKind::King)?;
    let rook_from = pick(&removed, PieceKind::Rook)?;
    let rook_to = pick(&added, PieceKind::Rook)?;

    let color = king_from.color;
    if [king_to, rook_from, rook_to].iter().any(|p| p.color != color) {
        return None;
    }
    let side = rule.side(king_to.square, rook_from.square, rook_to.square)?;
    Some(MoveShape::Castle { color, side, king_from: king_from.square, king_to: king_to.square })
}
