//! 升の集合（64bit のビット集合）

use super::Square;
use std::fmt;

/// 升の集合
///
/// bit i が `Square::from_index(i)` に対応する。到達可能升の列挙や、
/// 「盤面不一致」表示用の升集合に使う。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct SquareSet(u64);

impl SquareSet {
    /// 空集合
    pub const EMPTY: SquareSet = SquareSet(0);

    /// 生のビット列から生成
    #[inline]
    pub const fn from_bits(bits: u64) -> SquareSet {
        SquareSet(bits)
    }

    /// 生のビット列
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.index()) != 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 走査順に升を列挙
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl std::ops::BitOr for SquareSet {
    type Output = SquareSet;

    #[inline]
    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> SquareSet {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

/// `SquareSet` の升を下位ビットから順に取り出すイテレータ
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|sq| sq.to_string())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_square_set_insert_contains() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(sq("a1"));
        set.insert(sq("h8"));
        set.insert(sq("a1"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(sq("h8")));
        assert!(!set.contains(sq("e4")));
    }

    #[test]
    fn test_square_set_iter_in_scan_order() {
        let set: SquareSet = [sq("e4"), sq("a1"), sq("b1")].into_iter().collect();
        let squares: Vec<String> = set.iter().map(|s| s.to_string()).collect();
        assert_eq!(squares, vec!["a1", "b1", "e4"]);
    }
}
