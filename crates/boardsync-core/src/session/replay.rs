//! サーバーの指し手列からの再構成
//!
//! 空白区切りの CompactMove 列（`"e2e4 e7e5 g1f3"`）を初期盤面から順に適用し、
//! 各手について差分から指し手を推定して履歴を作る。
//! サーバー側の手順が正であり、センサー盤はここで得た最終盤面に合わせる。

use crate::inference::{Classification, classify_with, diff};
use crate::movegen::try_apply;
use crate::position::{Position, STARTPOS_BOARD, decode, encode};
use crate::types::{CastleRule, Color, CompactMove, Move};

/// 再構成の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOptions {
    /// 初期盤面（FEN の第1フィールド、FEN 全体、または `startpos`）
    pub initial_board: String,
    pub castle_rule: CastleRule,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self { initial_board: STARTPOS_BOARD.to_string(), castle_rule: CastleRule::default() }
    }
}

/// 再構成の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    /// 推定できた指し手
    pub moves: Vec<Move>,
    /// 初期局面と各手の適用後の局面（`plies + 1` 個）
    pub positions: Vec<Position>,
    pub final_position: Position,
    pub final_board: String,
    /// 入力の手数
    pub plies: usize,
    /// 初期盤面の手番（省略時は白）から手数分だけ交代した手番
    pub side_to_move: Color,
    /// 解釈できず局面を進めなかった入力
    pub skipped: Vec<String>,
}

impl Replay {
    pub fn is_turn_of(&self, color: Color) -> bool {
        self.side_to_move == color
    }

    /// 局面を `ply` 手目の直後まで戻したもの（0 は初期局面）
    pub fn position_at(&self, ply: usize) -> Option<&Position> {
        self.positions.get(ply)
    }
}

/// 指し手列を初期盤面から再生する
pub fn replay(moves_text: &str, options: &ReplayOptions) -> Replay {
    let initial = match options.initial_board.as_str() {
        "startpos" => STARTPOS_BOARD,
        other => other,
    };
    // FEN 全体なら第2フィールドの手番から数える
    let first_side = match initial.split_whitespace().nth(1) {
        Some("b") => Color::Black,
        _ => Color::White,
    };
    let mut pos = decode(initial);
    let mut board = encode(&pos);
    let mut positions = vec![pos];
    let mut moves = Vec::new();
    let mut skipped = Vec::new();

    for token in moves_text.split_whitespace() {
        let applied = token
            .parse::<CompactMove>()
            .map_err(|e| e.to_string())
            .and_then(|cm| try_apply(&cm, &pos).map_err(|e| e.to_string()));
        let next = match applied {
            Ok(next) => next,
            Err(e) => {
                log::warn!("skipping {token}: {e}");
                skipped.push(token.to_string());
                positions.push(pos);
                continue;
            }
        };

        let next_board = encode(&next);
        match classify_with(&diff(&pos, &next), &board, &next_board, options.castle_rule) {
            Classification::Moved(mv) => moves.push(mv),
            other => {
                log::debug!("{token} did not classify: {other:?}");
                skipped.push(token.to_string());
            }
        }
        positions.push(next);
        pos = next;
        board = next_board;
    }

    let plies = positions.len() - 1;
    Replay {
        moves,
        final_position: pos,
        final_board: board,
        plies,
        side_to_move: if plies % 2 == 0 { first_side } else { first_side.opponent() },
        positions,
        skipped,
    }
}
