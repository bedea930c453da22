//! 盤面差分からの指し手推定
//!
//! - `diff`: 2局面の駒の集合差（追加・除去）
//! - `classify`: 差分を決定表で評価し、指し手の形を1つに決める

mod classify;
mod diff;

pub use classify::{Classification, classify, classify_with, infer, infer_with};
pub use diff::{OccupancyDelta, diff};
