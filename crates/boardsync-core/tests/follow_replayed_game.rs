//! サーバーの指し手列から得た局面を順にセンサー盤の読み取りとして流し、
//! 追従側が同じ指し手列を受理することを確認する

use boardsync_core::{
    BoardFollower, Color, FollowerOptions, Observation, ReplayOptions, encode, replay,
};

const GAME: &str = "e2e4 d7d5 e4d5 g8f6 f1b5 c7c6 d5c6 d8b6 c6b7 c8d7 b7a8q b6b5 g1f3 e7e6 e1g1";

#[test]
fn test_follower_agrees_with_replay() {
    let replay = replay(GAME, &ReplayOptions::default());
    assert!(replay.skipped.is_empty());
    assert_eq!(replay.moves.len(), replay.plies);

    let mut follower = BoardFollower::new(FollowerOptions::default());
    for (ply, pos) in replay.positions.iter().enumerate().skip(1) {
        match follower.observe(&encode(pos)) {
            Observation::Accepted(mv) => assert_eq!(mv, replay.moves[ply - 1]),
            other => panic!("ply {ply}: {other:?}"),
        }
    }
    assert_eq!(follower.moves(), replay.moves.as_slice());
    assert_eq!(follower.side_to_move(), replay.side_to_move);
    assert_eq!(follower.side_to_move(), Color::Black);

    let notation: Vec<String> = follower.moves().iter().map(|m| m.to_string()).collect();
    assert_eq!(notation[2], "e4xd5");
    assert_eq!(notation[10], "b7xa8Q");
    assert_eq!(notation[14], "0-0");
}

#[test]
fn test_history_survives_restart() {
    let replay = replay("e2e4 e7e5 g1f3", &ReplayOptions::default());
    let mut follower = BoardFollower::default();
    for pos in &replay.positions[1..] {
        follower.observe(&encode(pos));
    }
    let saved = follower.to_json().unwrap();

    let mut restarted = BoardFollower::default();
    restarted.restore_json(&saved).unwrap();
    assert_eq!(restarted.baseline(), replay.final_position);
    assert_eq!(restarted.side_to_move(), Color::Black);

    let next = replay_next("e2e4 e7e5 g1f3 b8c6");
    assert!(matches!(restarted.observe(&next), Observation::Accepted(_)));
}

fn replay_next(moves: &str) -> String {
    replay(moves, &ReplayOptions::default()).final_board
}
