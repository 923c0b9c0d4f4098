use log::{info, trace};
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

use crate::{board::board::Board, moves::movegenerator::generate_legal_moves};

/// Splits the root moves across the rayon pool. Every worker gets its own copy of the board.
pub fn multi_threaded_perft(mut board: Board, depth: i32) -> usize {
    let side = board.to_move();
    let moves = generate_legal_moves(&mut board, side);

    let total = moves
        .into_vec()
        .into_par_iter()
        .map(|m| {
            let mut new_b = board.clone();
            new_b.make_move(m);
            let count = count_moves(depth - 1, &mut new_b);
            trace!("{}: {}", m.to_lan(), count);
            count
        })
        .sum::<usize>();

    info!("Nodes searched: {}", total);
    total
}

pub fn perft(board: &mut Board, depth: i32) -> usize {
    let mut total = 0;
    let side = board.to_move();
    for m in generate_legal_moves(board, side) {
        board.make_move(m);
        let count = count_moves(depth - 1, board);
        board.unmake_move(m);
        trace!("{}: {}", m.to_lan(), count);
        total += count;
    }
    info!("Nodes searched: {}", total);
    total
}

/// Recursively counts the number of leaf positions down to a certain depth
pub fn count_moves(depth: i32, board: &mut Board) -> usize {
    if depth <= 0 {
        return 1;
    }
    let side = board.to_move();
    let moves = generate_legal_moves(board, side);
    if depth == 1 {
        return moves.len();
    }

    let mut count = 0;
    for m in moves {
        board.make_move(m);
        count += count_moves(depth - 1, board);
        board.unmake_move(m);
    }
    count
}
