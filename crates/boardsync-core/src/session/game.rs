//! サーバーの対局状態

use std::fmt;

use crate::types::Color;

/// 対局状態（サーバーの `status` 文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Started,
    Aborted,
    Mate,
    Resign,
    OutOfTime,
    Draw,
    /// 上記以外の状態名
    Other(String),
}

impl GameStatus {
    pub fn from_name(name: &str) -> GameStatus {
        match name {
            "started" => GameStatus::Started,
            "aborted" => GameStatus::Aborted,
            "mate" => GameStatus::Mate,
            "resign" => GameStatus::Resign,
            "outoftime" => GameStatus::OutOfTime,
            "draw" => GameStatus::Draw,
            other => GameStatus::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GameStatus::Started => "started",
            GameStatus::Aborted => "aborted",
            GameStatus::Mate => "mate",
            GameStatus::Resign => "resign",
            GameStatus::OutOfTime => "outoftime",
            GameStatus::Draw => "draw",
            GameStatus::Other(name) => name,
        }
    }

    /// 対局が終了しているか（盤側の時計停止の判定に使う）
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            GameStatus::Aborted
                | GameStatus::Mate
                | GameStatus::Resign
                | GameStatus::OutOfTime
                | GameStatus::Draw
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWon,
    BlackWon,
    Draw,
}

impl GameResult {
    /// 状態と勝者から結果を決める。引き分け状態は勝者より優先する
    pub fn from_status(status: &GameStatus, winner: Option<Color>) -> Option<GameResult> {
        if *status == GameStatus::Draw {
            return Some(GameResult::Draw);
        }
        winner.map(|color| match color {
            Color::White => GameResult::WhiteWon,
            Color::Black => GameResult::BlackWon,
        })
    }

    pub fn score(self) -> &'static str {
        match self {
            GameResult::WhiteWon => "1-0",
            GameResult::BlackWon => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.score())
    }
}
