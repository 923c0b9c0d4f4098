use crate::{
    board::board::Board,
    engine::transposition::{entry_flag, TranspositionTable},
    eval::Evaluator,
    moves::{movegenerator::generate_legal_moves, moves::Move},
};

use super::{search_stats::SearchStats, INFINITY};

/// State shared by every node of one top-level search
pub struct SearchContext<'a, E: Evaluator + ?Sized> {
    pub evaluator: &'a E,
    pub table: TranspositionTable,
    pub use_cache: bool,
    pub stats: SearchStats,
}

impl<'a, E: Evaluator + ?Sized> SearchContext<'a, E> {
    pub fn new(evaluator: &'a E, use_cache: bool) -> Self {
        Self {
            evaluator,
            table: TranspositionTable::default(),
            use_cache,
            stats: SearchStats::default(),
        }
    }
}

/// Minimax with alpha-beta pruning. White maximizes. Returns the node's score together with the
/// move that produced it, or `None` at leaves and terminal nodes. The board is left exactly as it
/// was passed in.
pub fn alpha_beta<E: Evaluator + ?Sized>(
    board: &mut Board,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    ctx: &mut SearchContext<E>,
) -> (i32, Option<Move>) {
    ctx.stats.nodes_searched += 1;
    let side = board.to_move();

    // A captured king ends the line
    if board.king_square(side).is_none() || depth <= 0 {
        return (ctx.evaluator.evaluate(board), None);
    }

    let key = board.position_key();
    if ctx.use_cache {
        if let Some(hit) = ctx.table.lookup(key, depth, maximizing).and_then(|e| e.usable(alpha, beta)) {
            ctx.stats.cache_hits += 1;
            return hit;
        }
    }

    let moves = generate_legal_moves(board, side);
    if moves.is_empty() {
        return (ctx.evaluator.evaluate_terminal(board, depth), None);
    }

    let (original_alpha, original_beta) = (alpha, beta);
    let mut best_score = if maximizing { -INFINITY } else { INFINITY };
    let mut best_move = None;

    for m in moves {
        board.make_move(m);
        let (score, _) = alpha_beta(board, depth - 1, alpha, beta, !maximizing, ctx);
        board.unmake_move(m);

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(m);
            }
            alpha = alpha.max(best_score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(m);
            }
            beta = beta.min(best_score);
        }

        if beta <= alpha {
            ctx.stats.cutoffs += 1;
            break;
        }
    }

    if ctx.use_cache {
        let flag = entry_flag(best_score, original_alpha, original_beta);
        ctx.table.store(key, depth, maximizing, best_score, best_move, flag);
    }

    (best_score, best_move)
}
