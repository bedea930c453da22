//! 指し手の適用
//!
//! サーバーから受け取った指し手列を順に適用して、差分計算を経ずに局面列を再構成する。
//! 入力の局面は変更せず、常に新しい局面を返す。

use crate::position::Position;
use crate::types::{CompactMove, File, Piece, PieceKind, Rank, Square};

/// 指し手適用のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("no piece at origin square {0}")]
    NoPieceAtOrigin(Square),
}

/// キャスリングで動くルークの (移動元, 移動先)
fn castling_rook(king_to: Square) -> Option<(Square, Square)> {
    let rank = king_to.rank();
    match king_to.file() {
        File::FileG => Some((Square::new(File::FileH, rank), Square::new(File::FileF, rank))),
        File::FileC => Some((Square::new(File::FileA, rank), Square::new(File::FileD, rank))),
        _ => None,
    }
}

/// 指し手を適用する。移動元に駒がなければエラー
pub fn try_apply(mv: &CompactMove, pos: &Position) -> Result<Position, ApplyError> {
    let mut next = *pos;
    let captured = next.take(mv.to);
    let mut piece = next.take(mv.from).ok_or(ApplyError::NoPieceAtOrigin(mv.from))?;

    match piece.kind {
        PieceKind::King => {
            let on_home_rank = matches!(mv.from.rank(), Rank::Rank1 | Rank::Rank8)
                && mv.from.rank() == mv.to.rank();
            if on_home_rank && mv.from.file().distance(mv.to.file()) == 2 {
                if let Some((rook_from, rook_to)) = castling_rook(mv.to) {
                    let rook = Piece::new(piece.color, PieceKind::Rook);
                    if next.piece_at(rook_from) == Some(rook) {
                        next.take(rook_from);
                        next.put(rook_to, rook);
                    }
                }
            }
        }
        PieceKind::Pawn => {
            if mv.from.file() != mv.to.file() && captured.is_none() {
                // アンパッサン: 取られるポーンは移動先の筋・移動元の段にいる
                let victim_sq = Square::new(mv.to.file(), mv.from.rank());
                let victim = Piece::new(piece.color.opponent(), PieceKind::Pawn);
                if next.piece_at(victim_sq) == Some(victim) {
                    next.take(victim_sq);
                }
            }
            if mv.to.rank().is_back_rank() {
                if let Some(kind) = mv.promotion {
                    piece.kind = kind;
                }
            }
        }
        _ => {}
    }

    next.put(mv.to, piece);
    Ok(next)
}

/// 指し手を適用する。移動元に駒がなければ入力の局面をそのまま返す
pub fn apply(mv: &CompactMove, pos: &Position) -> Position {
    match try_apply(mv, pos) {
        Ok(next) => next,
        Err(e) => {
            log::debug!("ignored move {mv}: {e}");
            *pos
        }
    }
}

/// 文字列の指し手を適用する。解析できなければ入力の局面をそのまま返す
pub fn apply_str(text: &str, pos: &Position) -> Position {
    match text.trim().parse::<CompactMove>() {
        Ok(mv) => apply(&mv, pos),
        Err(e) => {
            log::warn!("ignored unparsable move: {e}");
            *pos
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{STARTPOS_BOARD, decode, encode};
    use crate::types::Color;

    fn play(board: &str, mv: &str) -> String {
        encode(&apply_str(mv, &decode(board)))
    }

    #[test]
    fn test_apply_pawn_push() {
        assert_eq!(
            play(STARTPOS_BOARD, "e2e4"),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_apply_capture_replaces_piece() {
        let board = "4k3/8/8/3p4/4P3/8/8/4K3";
        assert_eq!(play(board, "e4d5"), "4k3/8/8/3P4/8/8/8/4K3");
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let pos = decode(STARTPOS_BOARD);
        let next = apply_str("g1f3", &pos);
        assert_ne!(pos, next);
        assert_eq!(encode(&pos), STARTPOS_BOARD);
    }

    #[test]
    fn test_apply_castles() {
        let board = "r3k2r/8/8/8/8/8/8/R3K2R";
        assert_eq!(play(board, "e1g1"), "r3k2r/8/8/8/8/8/8/R4RK1");
        assert_eq!(play(board, "e1c1"), "r3k2r/8/8/8/8/8/8/2KR3R");
        assert_eq!(play(board, "e8g8"), "r4rk1/8/8/8/8/8/8/R3K2R");
        assert_eq!(play(board, "e8c8"), "2kr3r/8/8/8/8/8/8/R3K2R");
    }

    #[test]
    fn test_apply_king_step_is_not_castle() {
        let board = "4k3/8/8/8/8/8/8/R3K2R";
        assert_eq!(play(board, "e1f1"), "4k3/8/8/8/8/8/8/R4K1R");
        // 自陣の段以外での2筋移動ではルークは動かない
        let mid = "4k3/8/8/8/4K3/8/8/7R";
        assert_eq!(play(mid, "e4g4"), "4k3/8/8/8/6K1/8/8/7R");
    }

    #[test]
    fn test_apply_en_passant() {
        let board = "4k3/8/8/3pP3/8/8/8/4K3";
        assert_eq!(play(board, "e5d6"), "4k3/8/3P4/8/8/8/8/4K3");

        let black = "4k3/8/8/8/4pP2/8/8/4K3";
        assert_eq!(play(black, "e4f3"), "4k3/8/8/8/8/5p2/8/4K3");
    }

    #[test]
    fn test_apply_promotion() {
        let board = "k7/4P3/8/8/8/8/8/4K3";
        assert_eq!(play(board, "e7e8q"), "k3Q3/8/8/8/8/8/8/4K3");
        assert_eq!(play(board, "e7e8n"), "k3N3/8/8/8/8/8/8/4K3");
        // 成り指定がなければポーンのまま
        assert_eq!(play(board, "e7e8"), "k3P3/8/8/8/8/8/8/4K3");

        let capture = "1r2k3/P7/8/8/8/8/8/4K3";
        assert_eq!(play(capture, "a7b8r"), "1R2k3/8/8/8/8/8/8/4K3");
    }

    #[test]
    fn test_apply_without_piece_is_noop() {
        let pos = decode(STARTPOS_BOARD);
        let mv: CompactMove = "e4e5".parse().unwrap();
        assert_eq!(try_apply(&mv, &pos), Err(ApplyError::NoPieceAtOrigin("e4".parse().unwrap())));
        assert_eq!(apply(&mv, &pos), pos);
        assert_eq!(apply_str("not-a-move", &pos), pos);
    }

    #[test]
    fn test_apply_promotion_piece_color() {
        let pos = apply_str("b2b1q", &decode("4k3/8/8/8/8/8/1p6/4K3"));
        assert_eq!(
            pos.piece_at("b1".parse().unwrap()),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
    }
}
