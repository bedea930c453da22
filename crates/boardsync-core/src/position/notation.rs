//! 盤面記法（FEN の駒配置部）の解析・出力
//!
//! 8段を '/' で区切り、8段目から順に並べる。各段は駒文字（大文字が白、小文字が黒）と
//! 連続する空き升の数を表す数字からなる。

use super::Position;
use crate::types::{File, Piece, Rank, Square};

/// 初期局面の盤面記法
pub const STARTPOS_BOARD: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// 盤面記法の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("empty board notation")]
    Empty,
    #[error("invalid rank count: {0} (expected 8)")]
    RankCount(usize),
    #[error("unknown symbol in board notation: {0:?}")]
    UnknownSymbol(char),
    #[error("rank {rank} describes {files} files (expected 8)")]
    FileCount { rank: char, files: usize },
}

impl Position {
    /// 盤面記法を厳密に解析する
    ///
    /// 前後の空白は無視し、空白で区切られた最初のフィールドだけを使う。
    /// そのため完全な FEN（"... w KQkq - 0 1"）を渡しても配置部だけが読まれる。
    pub fn from_board_text(text: &str) -> Result<Position, NotationError> {
        let placement = text.split_whitespace().next().ok_or(NotationError::Empty)?;
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != Rank::NUM {
            return Err(NotationError::RankCount(rows.len()));
        }

        let mut pos = Position::empty();
        for (row, rank) in rows.iter().zip(Rank::ALL.iter().rev()) {
            let mut file = 0usize;
            for c in row.chars() {
                if let Some(n) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                    file += n as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(NotationError::UnknownSymbol(c))?;
                // 9筋目以降への配置は段の筋数エラーとして下で検出する
                if file < File::NUM {
                    pos.put(Square::new(File::ALL[file], *rank), piece);
                }
                file += 1;
            }
            if file != File::NUM {
                return Err(NotationError::FileCount { rank: rank.to_char(), files: file });
            }
        }
        Ok(pos)
    }
}

/// 盤面記法を解析する。不正な入力は空の局面になる
pub fn decode(text: &str) -> Position {
    match Position::from_board_text(text) {
        Ok(pos) => pos,
        Err(e) => {
            log::debug!("malformed board notation {text:?}: {e}");
            Position::empty()
        }
    }
}

/// 局面を盤面記法に変換する
pub fn encode(pos: &Position) -> String {
    let mut out = String::with_capacity(STARTPOS_BOARD.len());
    for (i, rank) in Rank::ALL.iter().rev().enumerate() {
        if i > 0 {
            out.push('/');
        }
        let mut empty = 0u8;
        for file in File::ALL {
            match pos.piece_at(Square::new(file, *rank)) {
                Some(piece) => {
                    if empty > 0 {
                        out.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    out.push(piece.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push((b'0' + empty) as char);
        }
    }
    out
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode(self))
    }
}
