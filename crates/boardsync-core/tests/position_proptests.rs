//! 任意の局面に対する性質の確認

use boardsync_core::{
    CastleRule, Classification, Color, CompactMove, Piece, PieceKind, PlacedPiece, Position,
    Square, apply, candidates, classify_with, decode, diff, encode,
};
use proptest::prelude::*;

const COLORS: [Color; 2] = [Color::White, Color::Black];
/// 適用時に特別な処理（成り・アンパッサン・キャスリング）が入らない駒種
const PLAIN_KINDS: [PieceKind; 4] =
    [PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen];

fn square(index: usize) -> Square {
    Square::from_index(index).unwrap()
}

/// 1升高々1駒の任意の局面
fn arb_position() -> impl Strategy<Value = Position> {
    let cell = prop::option::of((0..Color::NUM, 0..PieceKind::ALL.len()));
    prop::collection::vec(cell, Square::NUM).prop_map(|cells| {
        Position::from_pieces(cells.into_iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|(c, k)| Piece::new(COLORS[c], PieceKind::ALL[k]).at(square(i)))
        }))
    })
}

/// `base` の `origin` に `mover` を置き、移動先 `target` の味方駒を取り除いた局面
fn with_mover(base: &Position, mover: Piece, origin: Square, target: Square) -> Position {
    let pieces: Vec<PlacedPiece> = base
        .pieces()
        .filter(|p| p.square != origin)
        .filter(|p| !(p.square == target && p.color == mover.color))
        .chain(std::iter::once(mover.at(origin)))
        .collect();
    Position::from_pieces(pieces)
}

fn classify_applied(before: &Position, cm: &CompactMove, rule: CastleRule) -> Classification {
    let after = apply(cm, before);
    classify_with(&diff(before, &after), &encode(before), &encode(&after), rule)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn prop_decode_encode_round_trip(pos in arb_position()) {
        let text = encode(&pos);
        prop_assert_eq!(decode(&text), pos);
        prop_assert_eq!(Position::from_board_text(&text).unwrap(), pos);
        prop_assert_eq!(text.split('/').count(), 8);
    }

    #[test]
    fn prop_plain_move_is_recovered(
        base in arb_position(),
        color in 0..Color::NUM,
        kind in 0..PLAIN_KINDS.len(),
        from in 0..Square::NUM,
        to in 0..Square::NUM,
        king_destination in any::<bool>(),
    ) {
        prop_assume!(from != to);
        let mover = Piece::new(COLORS[color], PLAIN_KINDS[kind]);
        let (origin, target) = (square(from), square(to));
        let before = with_mover(&base, mover, origin, target);
        let captured = before.piece_at(target);

        let rule =
            if king_destination { CastleRule::KingDestination } else { CastleRule::RookDistance };
        let cm = CompactMove::new(origin, target, None);
        let Classification::Moved(mv) = classify_applied(&before, &cm, rule) else {
            panic!("{cm} on {} was not classified", encode(&before));
        };
        prop_assert_eq!(mv.color(), mover.color);
        prop_assert_eq!(mv.from(), origin);
        prop_assert_eq!(mv.to(), target);
        prop_assert_eq!(mv.kind(), mover.kind);
        prop_assert_eq!(mv.is_capture(), captured.is_some());
        prop_assert_eq!(CompactMove::from_move(&mv), cm);
    }

    #[test]
    fn prop_knight_destination_is_a_candidate(
        base in arb_position(),
        color in 0..Color::NUM,
        from in 0..Square::NUM,
        pick in any::<prop::sample::Index>(),
    ) {
        let origin = square(from);
        let targets: Vec<Square> = candidates(PieceKind::Knight, origin).iter().collect();
        let target = targets[pick.index(targets.len())];
        let mover = Piece::new(COLORS[color], PieceKind::Knight);
        let before = with_mover(&base, mover, origin, target);

        let cm = CompactMove::new(origin, target, None);
        let mv = classify_applied(&before, &cm, CastleRule::default()).into_move();
        prop_assert!(mv.is_some());
        let mv = mv.unwrap();
        prop_assert_eq!(mv.kind(), PieceKind::Knight);
        prop_assert!(candidates(mv.kind(), mv.from()).contains(mv.to()));
    }
}
