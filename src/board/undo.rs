use crate::{
    moves::moves::Castle,
    types::{
        pieces::{Color, Piece},
        square::Square,
    },
};

/// Everything `make_move` destroys and `unmake_move` needs back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoRecord {
    pub captured: Option<(Piece, Square)>,
    pub castling: [bool; 4],
    pub en_passant_square: Option<Square>,
    pub castled: Option<Castle>,
    pub side_to_move: Color,
}

/// Stack of undo records, exactly one per applied move
#[derive(Clone, Debug, Default)]
pub struct UndoStack {
    arr: Vec<UndoRecord>,
}

impl UndoStack {
    #[inline(always)]
    pub fn push(&mut self, record: UndoRecord) {
        self.arr.push(record);
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.arr.pop()
    }

    pub fn len(&self) -> usize {
        self.arr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arr.is_empty()
    }
}
