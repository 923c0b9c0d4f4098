use core::fmt;
use core::ops::{Index, IndexMut};

use crate::moves::moves::Direction;

use super::bitboard::Bitboard;

/// Square index: a1 = 0, h1 = 7, a8 = 56, h8 = 63
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Square(pub u8);

impl Square {
    pub const fn new(rank: u8, file: u8) -> Self {
        Self(rank * 8 + file)
    }

    /// Function checks whether a shift is valid before executing it
    pub fn checked_shift(self, dir: Direction) -> Option<Self> {
        let s = self.bitboard().shift(dir);
        (s != Bitboard::EMPTY).then(|| s.get_lsb())
    }

    /// Function does not check a shift's validity before returning it. Only to be used when the
    /// shifts validity has already been proven valid elsewhere
    pub fn shift(self, dir: Direction) -> Self {
        self.bitboard().shift(dir).get_lsb()
    }

    /// Rank is the horizontal row of the piece (y-coord)
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    /// File is the vertical column of the piece (x-coord)
    pub const fn file(self) -> u8 {
        self.0 & 0b111
    }

    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1 << self.0)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..64).map(Self)
    }

    /// Parses algebraic coordinates such as `e4`
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Square::new(rank as u8 - b'1', file as u8 - b'a'))
    }
}

impl<T, const N: usize> Index<Square> for [T; N] {
    type Output = T;

    fn index(&self, index: Square) -> &Self::Output {
        &self[index.0 as usize]
    }
}

impl<T, const N: usize> IndexMut<Square> for [T; N] {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.0 as usize]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}
