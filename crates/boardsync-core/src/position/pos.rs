//! 局面本体

use crate::types::{Piece, PlacedPiece, Square};

/// 局面
///
/// 升インデックス順の配列で持つため、1升に2つ以上の駒が置かれることはない。
/// 生成後は変更せず、指し手の適用は常に新しい `Position` を返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Option<Piece>; Square::NUM],
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    /// 駒のない局面（解析失敗時の結果でもある）
    pub const fn empty() -> Position {
        Position { board: [None; Square::NUM] }
    }

    /// 初期局面
    pub fn startpos() -> Position {
        super::decode(super::STARTPOS_BOARD)
    }

    /// 駒の並びから局面を作る。同じ升に複数の駒があれば後のものが残る
    pub fn from_pieces<I: IntoIterator<Item = PlacedPiece>>(pieces: I) -> Position {
        let mut pos = Position::empty();
        for p in pieces {
            pos.board[p.square.index()] = Some(p.piece());
        }
        pos
    }

    /// 升の駒
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// 盤上の駒を走査順（a1, b1, …, h8）に列挙
    pub fn pieces(&self) -> impl Iterator<Item = PlacedPiece> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| p.at(sq)))
    }

    /// 盤上の駒数
    pub fn len(&self) -> usize {
        self.board.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.board.iter().all(Option::is_none)
    }

    /// 盤面記法に変換
    pub fn to_board_text(&self) -> String {
        super::encode(self)
    }

    // 以下は指し手適用（movegen::apply）用の非公開編集操作。
    // 公開 API からは常に新しい局面を作って返す。

    #[inline]
    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        self.board[sq.index()] = Some(piece);
    }

    #[inline]
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        self.board[sq.index()].take()
    }
}
