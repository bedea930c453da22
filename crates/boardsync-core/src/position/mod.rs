//! 局面表現モジュール
//!
//! - `Position`: 升ごとに高々1つの駒を持つ不変の盤面
//! - 盤面記法（FENの配置部）の解析・出力
//! - ハードウェアのボードダンプ（64升の駒コード）の解析
//!
//! 解析はすべて全域関数として提供する。不正な入力は空の局面に落とし、
//! ポーリングループが一度の読み取り不良で止まらないようにする。

mod board_dump;
mod notation;
mod pos;

pub use board_dump::{BOARD_DUMP_LEN, board_dump_to_text, decode_board_dump};
pub use notation::{NotationError, STARTPOS_BOARD, decode, encode};
pub use pos::Position;
