//! 指し手の幾何と適用
//!
//! - `reach`: 駒種ごとの到達候補升（遮蔽・王手を無視した幾何のみ）
//! - `apply`: CompactMove を局面に適用して新しい局面を作る
//!
//! どちらも合法性（王手・ピン・ステイルメイト）は扱わない。

mod apply;
mod reach;

pub use apply::{ApplyError, apply, apply_str, try_apply};
pub use reach::{candidates, is_reachable};
