use std::{fmt, ops};

use crate::moves::{attack_boards::FILES, moves::Direction};

use super::square::Square;

/// One bit per square, bit `i` set when square `i` is occupied
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Returns the index of the lowest bit of a bitboard, and modifies the bitboard to exclude
    /// that bit
    pub fn pop_lsb(&mut self) -> Square {
        debug_assert!(*self != Bitboard::EMPTY);
        let lsb = self.get_lsb();
        self.0 &= self.0 - 1;
        lsb
    }

    pub const fn get_lsb(self) -> Square {
        Square(self.0.trailing_zeros() as u8)
    }

    pub fn is_empty(self) -> bool {
        self == Bitboard::EMPTY
    }

    pub fn square_occupied(self, sq: Square) -> bool {
        self & sq.bitboard() != Bitboard::EMPTY
    }

    pub fn square_is_empty(self, sq: Square) -> bool {
        !self.square_occupied(sq)
    }

    pub fn count_bits(self) -> u32 {
        self.0.count_ones()
    }

    /// Shifts every set bit one step in `dir`, dropping bits that would wrap around a file edge
    /// or fall off the board
    pub const fn shift(self, dir: Direction) -> Bitboard {
        match dir {
            Direction::North => Bitboard(self.0 << 8),
            Direction::NorthWest => Bitboard((self.0 << 7) & !FILES[7].0),
            Direction::West => Bitboard((self.0 >> 1) & !FILES[7].0),
            Direction::SouthWest => Bitboard((self.0 >> 9) & !FILES[7].0),
            Direction::South => Bitboard(self.0 >> 8),
            Direction::SouthEast => Bitboard((self.0 >> 7) & !FILES[0].0),
            Direction::East => Bitboard((self.0 << 1) & !FILES[0].0),
            Direction::NorthEast => Bitboard((self.0 << 9) & !FILES[0].0),
        }
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if *self == Bitboard::EMPTY {
            None
        } else {
            Some(self.pop_lsb())
        }
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in (0..8).rev() {
            for col in 0..8 {
                let index = row * 8 + col;
                let bit_is_set = self.0 & (1 << index) != 0;

                if bit_is_set {
                    write!(f, "X")?;
                } else {
                    write!(f, ".")?;
                }

                if col < 7 {
                    write!(f, " ")?;
                }
            }

            if row > 0 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

impl ops::Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

// Macros from carp
macro_rules! impl_math_ops {
    ($($trait:ident::$fn:ident),*) => {
        $(impl std::ops::$trait for Bitboard {
            type Output = Self;

            fn $fn(self, other: Self) -> Self::Output {
                Self(std::ops::$trait::$fn(self.0, other.0))
            }
        })*
    };
}

impl_math_ops! {
    BitAnd::bitand,
    BitOr::bitor,
    BitXor::bitxor
}

macro_rules! impl_math_assign_ops {
    ($($trait:ident::$fn:ident),*) => {
        $(impl std::ops::$trait for Bitboard {

            fn $fn(&mut self, other: Self) {
                std::ops::$trait::$fn(&mut self.0, other.0)
            }
        })*
    };
}

impl_math_assign_ops! {
    BitAndAssign::bitand_assign,
    BitOrAssign::bitor_assign,
    BitXorAssign::bitxor_assign
}

#[cfg(test)]
mod bitboard_tests {
    use super::*;

    #[test]
    fn test_iteration_order() {
        let bb = Square(3).bitboard() | Square(40).bitboard() | Square(17).bitboard();
        let squares: Vec<Square> = bb.collect();
        assert_eq!(squares, vec![Square(3), Square(17), Square(40)]);
    }

    #[test]
    fn test_shift_does_not_wrap() {
        let h_file = Square(7).bitboard();
        assert_eq!(h_file.shift(Direction::East), Bitboard::EMPTY);
        assert_eq!(h_file.shift(Direction::NorthEast), Bitboard::EMPTY);
        assert_eq!(h_file.shift(Direction::North), Square(15).bitboard());
        let a_file = Square(8).bitboard();
        assert_eq!(a_file.shift(Direction::West), Bitboard::EMPTY);
        assert_eq!(a_file.shift(Direction::SouthWest), Bitboard::EMPTY);
    }

    #[test]
    fn test_pop_lsb() {
        let mut bb = Bitboard(0b1010_0000);
        assert_eq!(bb.pop_lsb(), Square(5));
        assert_eq!(bb.pop_lsb(), Square(7));
        assert!(bb.is_empty());
    }
}
