//! boardsync-core
//!
//! センサー付きチェス盤とリモート対局サーバーの盤面を同期させるためのエンジン。
//!
//! - `types`: 升・駒・指し手などの値型
//! - `position`: 局面と盤面記法（FEN配置部）・ボードダンプのデコード
//! - `movegen`: 駒種ごとの到達可能升（幾何のみ）と、指し手の適用
//! - `inference`: 2局面の差分と、差分からの指し手推定
//! - `session`: ポーリング追従（履歴・待った・永続化）と指し手列のリプレイ
//!
//! エンジン本体は純粋関数の集まりで、内部に可変状態を持たない。
//! ポーリングの基準局面は呼び出し側（`session::BoardFollower`）が明示的に保持する。

pub mod inference;
pub mod movegen;
pub mod position;
pub mod session;
pub mod types;

pub use inference::{
    Classification, OccupancyDelta, classify, classify_with, diff, infer, infer_with,
};
pub use movegen::{ApplyError, apply, apply_str, candidates, is_reachable, try_apply};
pub use position::{NotationError, Position, STARTPOS_BOARD, decode, encode};
pub use session::{
    BoardFollower, FollowerOptions, GameResult, GameStatus, HistoryError, Observation,
    RejectReason, Replay, ReplayOptions, replay,
};
pub use types::{
    CastleRule, CastleSide, Color, CompactMove, CompactMoveError, File, Move, MoveAnnotations,
    MoveShape, Piece, PieceKind, PlacedPiece, Rank, Square, SquareSet,
};
