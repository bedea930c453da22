//! 呼び出し側の状態管理
//!
//! エンジン本体は状態を持たないため、ポーリングの基準局面や指し手履歴は
//! ここで定義する明示的なオブジェクトが所有する（グローバル状態は使わない）。
//!
//! - `BoardFollower`: センサー盤のポーリング結果を追従し、指し手履歴を作る
//! - `replay`: サーバーの指し手列から指し手履歴と手番を再構成する
//! - `GameStatus` / `GameResult`: サーバーの対局状態の解釈

mod follower;
mod game;
mod replay;

pub use follower::{BoardFollower, FollowerOptions, HistoryError, Observation, RejectReason};
pub use game::{GameResult, GameStatus};
pub use replay::{Replay, ReplayOptions, replay};
