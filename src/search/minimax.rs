use crate::{
    board::board::Board,
    eval::Evaluator,
    moves::{movegenerator::generate_legal_moves, moves::Move},
};

use super::{search_stats::SearchStats, INFINITY};

/// Exhaustive minimax over the full tree. Scores every node `alpha_beta` would, without pruning
/// or caching, and is kept as the reference the pruned search must agree with.
pub fn minimax<E: Evaluator + ?Sized>(
    board: &mut Board,
    depth: i32,
    maximizing: bool,
    evaluator: &E,
    stats: &mut SearchStats,
) -> (i32, Option<Move>) {
    stats.nodes_searched += 1;
    let side = board.to_move();

    if board.king_square(side).is_none() || depth <= 0 {
        return (evaluator.evaluate(board), None);
    }

    let moves = generate_legal_moves(board, side);
    if moves.is_empty() {
        return (evaluator.evaluate_terminal(board, depth), None);
    }

    let mut best_score = if maximizing { -INFINITY } else { INFINITY };
    let mut best_move = None;
    for m in moves {
        board.make_move(m);
        let (score, _) = minimax(board, depth - 1, !maximizing, evaluator, stats);
        board.unmake_move(m);

        let improves = if maximizing { score > best_score } else { score < best_score };
        if improves {
            best_score = score;
            best_move = Some(m);
        }
    }

    (best_score, best_move)
}
