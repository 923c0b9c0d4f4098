use strum::IntoEnumIterator;

use crate::{
    board::board::Board,
    search::CHECKMATE,
    types::pieces::{Color, PieceName},
};

/// Scores positions for the search. Scores are absolute: positive favours white, negative
/// favours black.
pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> i32;

    /// Score of a node where the side to move has no legal moves. `depth` is the remaining search
    /// depth, so mates found closer to the root score further from zero.
    fn evaluate_terminal(&self, board: &Board, depth: i32) -> i32 {
        let side = board.to_move();
        if !board.in_check(side) {
            return 0;
        }
        match side {
            Color::White => -(CHECKMATE + depth),
            Color::Black => CHECKMATE + depth,
        }
    }
}

const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20000];

impl PieceName {
    pub fn value(self) -> i32 {
        PIECE_VALUES[self]
    }
}

/// Material count: white material minus black material
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        PieceName::iter()
            .map(|name| {
                let white = board.bitboard(Color::White, name).count_bits() as i32;
                let black = board.bitboard(Color::Black, name).count_bits() as i32;
                (white - black) * name.value()
            })
            .sum()
    }
}
