//! 基本型モジュール
//!
//! 盤面・指し手を表す値型をまとめる。いずれも不変の値オブジェクトで、
//! 新しい状態は常に新しい値を作ることで表す。

mod color;
mod compact_move;
mod file;
pub mod json;
mod moves;
mod piece;
mod rank;
mod square;
mod square_set;

pub use color::Color;
pub use compact_move::{CompactMove, CompactMoveError};
pub use file::File;
pub use moves::{CastleRule, CastleSide, Move, MoveAnnotations, MoveShape};
pub use piece::{Piece, PieceKind, PlacedPiece};
pub use rank::Rank;
pub use square::{Square, SquareParseError};
pub use square_set::SquareSet;
