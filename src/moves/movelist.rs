use arrayvec::ArrayVec;

use std::ops::Index;

use super::moves::Move;

/// Upper bound on the pseudo-legal moves of a position with at most 16 pieces per side. No piece
/// reaches more than the 27 squares of a centralised queen.
pub const MAX_LEN: usize = 16 * 27;

/// Fixed capacity list of moves, kept in generation order
#[derive(Clone, Debug, Default)]
pub struct MoveList {
    arr: ArrayVec<Move, MAX_LEN>,
}

impl MoveList {
    pub fn push(&mut self, m: Move) {
        self.arr.push(m);
    }

    pub fn len(&self) -> usize {
        self.arr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arr.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.arr.iter()
    }

    pub fn into_vec(self) -> Vec<Move> {
        self.arr.into_iter().collect()
    }

    /// Keeps only the moves for which `f` holds, preserving order
    pub fn retain(&mut self, mut f: impl FnMut(Move) -> bool) {
        self.arr.retain(|m| f(*m));
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        &self.arr[index]
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, MAX_LEN>;

    fn into_iter(self) -> Self::IntoIter {
        self.arr.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.arr.iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut move_list = MoveList::default();
        for m in iter {
            move_list.push(m);
        }
        move_list
    }
}
