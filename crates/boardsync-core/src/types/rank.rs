//! 段（Rank）

/// 段（1段〜8段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Rank1 = 0,
    Rank2 = 1,
    Rank3 = 2,
    Rank4 = 3,
    Rank5 = 4,
    Rank6 = 5,
    Rank7 = 6,
    Rank8 = 7,
}

impl Rank {
    /// 段の数
    pub const NUM: usize = 8;

    /// 全ての段
    pub const ALL: [Rank; 8] = [
        Rank::Rank1,
        Rank::Rank2,
        Rank::Rank3,
        Rank::Rank4,
        Rank::Rank5,
        Rank::Rank6,
        Rank::Rank7,
        Rank::Rank8,
    ];

    /// u8からRankに変換
    #[inline]
    pub const fn from_u8(n: u8) -> Option<Rank> {
        if n < 8 { Some(Rank::ALL[n as usize]) } else { None }
    }

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 盤端の段（1段目か8段目）かどうか。ポーンの成りに使う
    #[inline]
    pub const fn is_back_rank(self) -> bool {
        matches!(self, Rank::Rank1 | Rank::Rank8)
    }

    /// 記法の文字（'1'-'8'）に変換
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// 記法の文字からRankに変換
    #[inline]
    pub const fn from_char(c: char) -> Option<Rank> {
        if c.is_ascii() { Rank::from_u8((c as u8).wrapping_sub(b'1')) } else { None }
    }
}
