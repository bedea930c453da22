//! センサー盤の追従
//!
//! 一定間隔で読み取った盤面記法を `observe` に渡すと、基準局面（最後に受理した
//! 指し手の終了盤面、なければ開始盤面）との差分から指し手を推定し、
//! 手番の交代と到達可能性を確認したうえで履歴に追加する。
//!
//! 1つの `BoardFollower` は1つのポーリング系列専用で、`&mut self` で直列化される。

use crate::inference::{Classification, OccupancyDelta, diff, infer_with};
use crate::movegen::is_reachable;
use crate::position::{Position, STARTPOS_BOARD, decode};
use crate::types::{CastleRule, Color, Move};

/// 追従の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowerOptions {
    /// 最初の指し手の基準となる盤面記法
    pub start_board: String,
    /// キャスリング方向の判定規則
    pub castle_rule: CastleRule,
    /// 推定した指し手の移動先が駒種の到達候補に含まれることを要求する
    pub verify_reachability: bool,
}

impl Default for FollowerOptions {
    fn default() -> Self {
        Self {
            start_board: STARTPOS_BOARD.to_string(),
            castle_rule: CastleRule::default(),
            verify_reachability: true,
        }
    }
}

/// 指し手を受理しなかった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// 差分がどの指し手の形にも当てはまらない（盤面が同期していない）
    Unclassified,
    /// 手番でない側の指し手
    OutOfTurn { expected: Color },
    /// 移動先が駒種の到達候補にない（センサーの誤検出とみなす）
    Unreachable,
}

/// `observe` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// 前回と同じ読み取り、または基準局面と同じ盤面
    Unchanged,
    /// 指し手を受理して履歴に追加した
    Accepted(Move),
    /// 履歴は進めない
    Rejected(RejectReason),
}

/// 履歴の復元エラー
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("move #{index} does not continue from the previous move")]
    Discontinuous { index: usize },
}

/// センサー盤の追従状態
#[derive(Debug, Clone)]
pub struct BoardFollower {
    options: FollowerOptions,
    moves: Vec<Move>,
    last_observed: Option<String>,
}

impl Default for BoardFollower {
    fn default() -> Self {
        Self::new(FollowerOptions::default())
    }
}

impl BoardFollower {
    pub fn new(options: FollowerOptions) -> Self {
        Self { options, moves: Vec::new(), last_observed: None }
    }

    pub fn options(&self) -> &FollowerOptions {
        &self.options
    }

    /// 受理済みの指し手
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// 基準局面の盤面記法
    pub fn baseline_board(&self) -> &str {
        self.moves.last().map_or(self.options.start_board.as_str(), |m| m.end_board.as_str())
    }

    /// 基準局面
    pub fn baseline(&self) -> Position {
        decode(self.baseline_board())
    }

    /// 次に指す側（最初は白）
    pub fn side_to_move(&self) -> Color {
        self.moves.last().map_or(Color::White, |m| m.color().opponent())
    }

    /// 読み取った盤面を1つ処理する
    pub fn observe(&mut self, snapshot: &str) -> Observation {
        if self.last_observed.as_deref() == Some(snapshot) {
            return Observation::Unchanged;
        }
        self.last_observed = Some(snapshot.to_string());

        let mv = match infer_with(self.baseline_board(), snapshot, self.options.castle_rule) {
            Classification::Moved(mv) => mv,
            Classification::Unchanged => return Observation::Unchanged,
            Classification::Unclassified => {
                log::debug!("boards out of sync: {snapshot}");
                return Observation::Rejected(RejectReason::Unclassified);
            }
        };

        let expected = self.side_to_move();
        if mv.color() != expected {
            log::debug!("rejected {mv}: {} to move", expected);
            return Observation::Rejected(RejectReason::OutOfTurn { expected });
        }
        if self.options.verify_reachability && !is_reachable(mv.kind(), mv.from(), mv.to()) {
            log::debug!("rejected {mv}: {} cannot reach {} from {}", mv.kind(), mv.to(), mv.from());
            return Observation::Rejected(RejectReason::Unreachable);
        }

        log::info!("accepted {mv} ({})", mv.color());
        self.moves.push(mv.clone());
        Observation::Accepted(mv)
    }

    /// 基準局面から `snapshot` への差分（盤面不一致の表示用）
    pub fn out_of_sync(&self, snapshot: &str) -> OccupancyDelta {
        diff(&self.baseline(), &decode(snapshot))
    }

    /// 外部で確定した指し手（送信済みの手など）を履歴に追加する
    pub fn push_external(&mut self, mv: Move) {
        self.moves.push(mv);
        // 基準局面が変わったので、直前と同じ読み取りも評価し直す
        self.last_observed = None;
    }

    /// 最後の指し手を取り消す
    pub fn takeback(&mut self) -> Option<Move> {
        let mv = self.moves.pop();
        if mv.is_some() {
            // 同じ盤面を読み直したときに再評価させる
            self.last_observed = None;
        }
        mv
    }

    /// 履歴を消去して開始盤面に戻す
    pub fn reset(&mut self) {
        self.moves.clear();
        self.last_observed = None;
    }

    /// 履歴を JSON に書き出す
    pub fn to_json(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string(&self.moves)?)
    }

    /// JSON から履歴を復元する
    ///
    /// 各指し手が前の指し手の終了盤面から、相手の手番で始まっていることを確認する。
    pub fn restore_json(&mut self, json: &str) -> Result<(), HistoryError> {
        let moves: Vec<Move> = serde_json::from_str(json)?;
        let mut expected = decode(&self.options.start_board);
        let mut last_color = None;
        for (index, mv) in moves.iter().enumerate() {
            if decode(&mv.start_board) != expected || last_color == Some(mv.color()) {
                return Err(HistoryError::Discontinuous { index });
            }
            expected = decode(&mv.end_board);
            last_color = Some(mv.color());
        }
        self.moves = moves;
        self.last_observed = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CastleSide, PieceKind};

    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR";
    const AFTER_E5: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR";
    const AFTER_NF3: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R";

    #[test]
    fn test_follow_opening_moves() {
        let mut follower = BoardFollower::default();
        assert_eq!(follower.side_to_move(), Color::White);

        let Observation::Accepted(e4) = follower.observe(AFTER_E4) else {
            panic!("e4 should be accepted");
        };
        assert_eq!(e4.to_string(), "e2-e4");
        assert_eq!(follower.observe(AFTER_E4), Observation::Unchanged);

        assert!(matches!(follower.observe(AFTER_E5), Observation::Accepted(_)));
        assert!(matches!(follower.observe(AFTER_NF3), Observation::Accepted(_)));
        let notation: Vec<String> = follower.moves().iter().map(|m| m.to_string()).collect();
        assert_eq!(notation, vec!["e2-e4", "e7-e5", "Ng1-f3"]);
        assert_eq!(follower.side_to_move(), Color::Black);
        assert_eq!(follower.baseline_board(), AFTER_NF3);
    }

    #[test]
    fn test_intermediate_reads_are_not_moves() {
        let mut follower = BoardFollower::default();
        // ポーンを持ち上げた瞬間（e2 が空）
        let lifted = "rnbqkbnr/pppppppp/8/8/8/8/PPPP1PPP/RNBQKBNR";
        assert_eq!(follower.observe(lifted), Observation::Rejected(RejectReason::Unclassified));
        // 元に戻した
        assert_eq!(follower.observe(STARTPOS_BOARD), Observation::Unchanged);
        assert!(matches!(follower.observe(AFTER_E4), Observation::Accepted(_)));
        assert_eq!(follower.moves().len(), 1);
    }

    #[test]
    fn test_out_of_turn_is_rejected() {
        let mut follower = BoardFollower::default();
        let black_first = "rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR";
        assert_eq!(
            follower.observe(black_first),
            Observation::Rejected(RejectReason::OutOfTurn { expected: Color::White })
        );
        assert!(follower.moves().is_empty());
    }

    #[test]
    fn test_unreachable_destination_is_rejected() {
        let mut follower = BoardFollower::default();
        // ナイトが g1 から g3 に「移動」した読み取り
        let bounce = "rnbqkbnr/pppppppp/8/8/8/6N1/PPPPPPPP/RNBQKB1R";
        assert_eq!(follower.observe(bounce), Observation::Rejected(RejectReason::Unreachable));

        let mut lenient = BoardFollower::new(FollowerOptions {
            verify_reachability: false,
            ..FollowerOptions::default()
        });
        assert!(matches!(lenient.observe(bounce), Observation::Accepted(_)));
    }

    #[test]
    fn test_takeback_and_reset() {
        let mut follower = BoardFollower::default();
        follower.observe(AFTER_E4);
        follower.observe(AFTER_E5);
        let undone = follower.takeback().unwrap();
        assert_eq!(undone.to_string(), "e7-e5");
        assert_eq!(follower.baseline_board(), AFTER_E4);
        assert_eq!(follower.side_to_move(), Color::Black);

        // 同じ盤面を読み直すと再び受理される
        assert!(matches!(follower.observe(AFTER_E5), Observation::Accepted(_)));

        follower.reset();
        assert!(follower.moves().is_empty());
        assert_eq!(follower.baseline(), Position::startpos());
        assert_eq!(follower.takeback(), None);
    }

    #[test]
    fn test_castle_from_custom_start() {
        let mut follower = BoardFollower::new(FollowerOptions {
            start_board: "r3k2r/8/8/8/8/8/8/R3K2R".to_string(),
            ..FollowerOptions::default()
        });
        let Observation::Accepted(mv) = follower.observe("r3k2r/8/8/8/8/8/8/2KR3R") else {
            panic!("castle should be accepted");
        };
        assert_eq!(mv.castle_side(), Some(CastleSide::Queen));
        assert_eq!(mv.kind(), PieceKind::King);
    }

    #[test]
    fn test_push_external_moves_baseline() {
        let mut follower = BoardFollower::default();
        let e4 = crate::inference::infer(STARTPOS_BOARD, AFTER_E4).into_move().unwrap();
        follower.push_external(e4);
        assert_eq!(follower.baseline_board(), AFTER_E4);
        assert_eq!(follower.side_to_move(), Color::Black);
        // 盤側が追いついた読み取りは基準局面と同じ
        assert_eq!(follower.observe(AFTER_E4), Observation::Unchanged);
        assert!(matches!(follower.observe(AFTER_E5), Observation::Accepted(_)));
    }

    #[test]
    fn test_push_external_reevaluates_pending_read() {
        let mut follower = BoardFollower::default();
        // 2手先の盤面が先に読まれた
        assert_eq!(follower.observe(AFTER_E5), Observation::Rejected(RejectReason::Unclassified));

        let e4 = crate::inference::infer(STARTPOS_BOARD, AFTER_E4).into_move().unwrap();
        follower.push_external(e4);
        let Observation::Accepted(e5) = follower.observe(AFTER_E5) else {
            panic!("e7-e5 should be accepted once the baseline caught up");
        };
        assert_eq!(e5.to_string(), "e7-e5");
        assert_eq!(follower.moves().len(), 2);
    }

    #[test]
    fn test_out_of_sync_overlay() {
        let follower = BoardFollower::default();
        let delta = follower.out_of_sync("rnbqkbnr/pppppppp/8/8/8/8/PPPP1PPP/RNBQKBNR");
        let removed: Vec<String> = delta.removed_squares().iter().map(|s| s.to_string()).collect();
        assert_eq!(removed, vec!["e2"]);
        assert!(delta.added.is_empty());
    }

    #[test]
    fn test_history_json_round_trip() {
        let mut follower = BoardFollower::default();
        follower.observe(AFTER_E4);
        follower.observe(AFTER_E5);
        let json = follower.to_json().unwrap();

        let mut restored = BoardFollower::default();
        restored.restore_json(&json).unwrap();
        assert_eq!(restored.moves(), follower.moves());
        assert_eq!(restored.side_to_move(), Color::White);
        assert!(matches!(restored.observe(AFTER_NF3), Observation::Accepted(_)));
    }

    #[test]
    fn test_history_restore_rejects_gaps() {
        let mut follower = BoardFollower::default();
        follower.observe(AFTER_E4);
        let first = follower.moves()[0].clone();

        let mut gap = BoardFollower::default();
        let mut skipped = first.clone();
        skipped.start_board = AFTER_E5.to_string();
        let json = serde_json::to_string(&vec![first, skipped]).unwrap();
        assert!(matches!(gap.restore_json(&json), Err(HistoryError::Discontinuous { index: 1 })));
        assert!(gap.moves().is_empty());

        assert!(matches!(gap.restore_json("not json"), Err(HistoryError::Json(_))));
    }

    #[test]
    fn test_history_restore_rejects_same_color_twice() {
        let e4 = crate::inference::infer(STARTPOS_BOARD, AFTER_E4).into_move().unwrap();
        let d4 = crate::inference::infer(
            AFTER_E4,
            "rnbqkbnr/pppppppp/8/8/3PP3/8/PPP2PPP/RNBQKBNR",
        )
        .into_move()
        .unwrap();
        let json = serde_json::to_string(&vec![e4, d4]).unwrap();

        let mut follower = BoardFollower::default();
        assert!(matches!(
            follower.restore_json(&json),
            Err(HistoryError::Discontinuous { index: 1 })
        ));
        assert!(follower.moves().is_empty());
        assert_eq!(follower.side_to_move(), Color::White);
    }
}
