//! boardsync コマンドの実装
//!
//! - `config`: `boardsync.toml` の読み込みと引数とのマージ
//! - `commands`: 各サブコマンド

pub mod commands;
pub mod config;
