//! `boardsync.toml` の読み込みとコマンドライン引数とのマージ
//!
//! ```toml
//! [follower]
//! start_board = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
//! castle_rule = "rook-distance"   # or "king-destination"
//! verify_reachability = true
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use boardsync_core::{CastleRule, FollowerOptions, ReplayOptions};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub follower: FollowerSection,
}

/// `[follower]` セクション。未指定の項目は既定値を使う
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FollowerSection {
    #[serde(default)]
    pub start_board: Option<String>,
    #[serde(default)]
    pub castle_rule: Option<CastleRule>,
    #[serde(default)]
    pub verify_reachability: Option<bool>,
}

/// コマンドラインで指定された上書き値
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub start_board: Option<String>,
    pub castle_rule: Option<CastleRule>,
    pub verify_reachability: Option<bool>,
}

pub fn parse_config(text: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(text)?)
}

pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&data).with_context(|| format!("invalid config {}", path.display()))
}

/// 既定値 < 設定ファイル < コマンドライン の順に適用する
pub fn merge_config(file: Option<&ConfigFile>, cli: &Overrides) -> FollowerOptions {
    let mut out = FollowerOptions::default();
    if let Some(f) = file {
        let section = &f.follower;
        if let Some(board) = &section.start_board {
            out.start_board = board.clone();
        }
        if let Some(rule) = section.castle_rule {
            out.castle_rule = rule;
        }
        if let Some(verify) = section.verify_reachability {
            out.verify_reachability = verify;
        }
    }
    if let Some(board) = &cli.start_board {
        out.start_board = board.clone();
    }
    if let Some(rule) = cli.castle_rule {
        out.castle_rule = rule;
    }
    if let Some(verify) = cli.verify_reachability {
        out.verify_reachability = verify;
    }
    out
}

pub fn replay_options(options: &FollowerOptions) -> ReplayOptions {
    ReplayOptions { initial_board: options.start_board.clone(), castle_rule: options.castle_rule }
}
