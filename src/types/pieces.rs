use crate::impl_index;
use std::ops::{self, Index, IndexMut};

use strum_macros::EnumIter;

impl_index!(Color);
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

#[macro_export]
macro_rules! impl_index {
    ($enum_name:ident) => {
        impl<T, const N: usize> Index<$enum_name> for [T; N] {
            type Output = T;

            fn index(&self, index: $enum_name) -> &Self::Output {
                &self[index as usize]
            }
        }

        impl<T, const N: usize> IndexMut<$enum_name> for [T; N] {
            fn index_mut(&mut self, index: $enum_name) -> &mut Self::Output {
                &mut self[index as usize]
            }
        }
    };
}

impl Color {
    pub const fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl ops::Not for Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

pub const NUM_PIECES: usize = 6;
pub const NUM_COLORS: usize = 2;

impl_index!(PieceName);
#[derive(Debug, EnumIter, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceName {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceName {
    pub fn idx(self) -> usize {
        self as usize
    }

    pub(crate) fn try_from_u32(u: u32) -> Option<PieceName> {
        match u {
            5 => Some(PieceName::King),
            4 => Some(PieceName::Queen),
            3 => Some(PieceName::Rook),
            2 => Some(PieceName::Bishop),
            1 => Some(PieceName::Knight),
            0 => Some(PieceName::Pawn),
            _ => None,
        }
    }

    /// Lowercase letter used by position text and move notation
    pub fn to_char(self) -> char {
        match self {
            PieceName::Pawn => 'p',
            PieceName::Knight => 'n',
            PieceName::Bishop => 'b',
            PieceName::Rook => 'r',
            PieceName::Queen => 'q',
            PieceName::King => 'k',
        }
    }
}

/// A colored piece. Together the two enums close over all twelve piece kinds.
#[derive(Eq, Copy, Clone, PartialEq, Debug, Hash)]
pub struct Piece {
    pub name: PieceName,
    pub color: Color,
}

impl Piece {
    pub fn new(name: PieceName, color: Color) -> Self {
        Self { name, color }
    }

    /// Index in 0..12, white pieces first
    pub fn idx(self) -> usize {
        self.color.idx() * NUM_PIECES + self.name.idx()
    }

    pub(crate) fn try_from_idx(idx: u32) -> Option<Piece> {
        let color = match idx / NUM_PIECES as u32 {
            0 => Color::White,
            1 => Color::Black,
            _ => return None,
        };
        PieceName::try_from_u32(idx % NUM_PIECES as u32).map(|name| Piece::new(name, color))
    }

    /// Uppercase for white, lowercase for black
    pub fn to_char(self) -> char {
        let c = self.name.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let name = match c.to_ascii_lowercase() {
            'p' => PieceName::Pawn,
            'n' => PieceName::Knight,
            'b' => PieceName::Bishop,
            'r' => PieceName::Rook,
            'q' => PieceName::Queen,
            'k' => PieceName::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(name, color))
    }
}

#[cfg(test)]
mod piece_tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_piece_index_round_trip() {
        for color in Color::iter() {
            for name in PieceName::iter() {
                let p = Piece::new(name, color);
                assert!(p.idx() < 12);
                assert_eq!(Piece::try_from_idx(p.idx() as u32), Some(p));
                assert_eq!(Piece::from_char(p.to_char()), Some(p));
            }
        }
        assert_eq!(Piece::try_from_idx(12), None);
    }

    #[test]
    fn test_piece_chars() {
        assert_eq!(Piece::new(PieceName::Knight, Color::White).to_char(), 'N');
        assert_eq!(Piece::new(PieceName::Queen, Color::Black).to_char(), 'q');
        assert_eq!(Piece::from_char('x'), None);
    }
}
