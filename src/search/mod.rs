use log::debug;

use crate::{board::board::Board, eval::Evaluator, moves::moves::Move, types::pieces::Color};

use self::{
    alpha_beta::{alpha_beta, SearchContext},
    minimax::minimax,
    search_stats::SearchStats,
};

pub mod alpha_beta;
pub mod minimax;
pub mod search_stats;

pub const INFINITY: i32 = 1_000_000;
/// Base score of a mate. Mates found with more depth remaining score further from zero.
pub const CHECKMATE: i32 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: i32,
    pub use_cache: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 4, use_cache: true }
    }
}

impl SearchConfig {
    pub fn new(depth: i32) -> Self {
        Self { depth, ..Default::default() }
    }

    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SearchResult {
    /// Absolute score, positive favours white
    pub score: i32,
    /// `None` when the side to move has no legal moves or the depth is zero
    pub best_move: Option<Move>,
    pub stats: SearchStats,
}

/// Searches the position for its side to move. White maximizes and black minimizes. Each call
/// owns a fresh transposition cache, so results never depend on earlier searches.
pub fn search<E: Evaluator + ?Sized>(board: &mut Board, config: &SearchConfig, evaluator: &E) -> SearchResult {
    let maximizing = board.to_move() == Color::White;
    let mut ctx = SearchContext::new(evaluator, config.use_cache);
    let (score, best_move) = alpha_beta(board, config.depth, -INFINITY, INFINITY, maximizing, &mut ctx);
    let stats = ctx.stats;

    debug!(
        "depth {} nodes {} cache hits {} cutoffs {} time {}ms nps {:.0} score {} bestmove {}",
        config.depth,
        stats.nodes_searched,
        stats.cache_hits,
        stats.cutoffs,
        stats.elapsed().as_millis(),
        stats.nodes_per_second(),
        score,
        best_move.map_or("none".to_string(), |m| m.to_lan())
    );

    SearchResult { score, best_move, stats }
}

/// Unpruned, uncached search of the same tree `search` explores
pub fn exhaustive_search<E: Evaluator + ?Sized>(board: &mut Board, depth: i32, evaluator: &E) -> SearchResult {
    let maximizing = board.to_move() == Color::White;
    let mut stats = SearchStats::default();
    let (score, best_move) = minimax(board, depth, maximizing, evaluator, &mut stats);
    SearchResult { score, best_move, stats }
}

#[cfg(test)]
mod search_tests {
    use super::*;
    use crate::{
        board::fen::{build_board, STARTING_FEN},
        eval::MaterialEvaluator,
    };

    const POSITIONS: [&str; 5] = [
        STARTING_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
    ];

    #[test]
    fn test_mate_in_one_for_white() {
        let mut board = build_board("6k1/5ppp/8/8/8/8/8/R5K1 w - -").unwrap();
        let result = search(&mut board, &SearchConfig::new(2), &MaterialEvaluator);
        assert_eq!(result.best_move.unwrap().to_lan(), "a1a8");
        assert_eq!(result.score, CHECKMATE + 1);
    }

    #[test]
    fn test_mate_in_one_for_black() {
        let mut board = build_board("r5k1/8/8/8/8/8/5PPP/6K1 b - -").unwrap();
        let result = search(&mut board, &SearchConfig::new(2), &MaterialEvaluator);
        assert_eq!(result.best_move.unwrap().to_lan(), "a8a1");
        assert_eq!(result.score, -(CHECKMATE + 1));
    }

    #[test]
    fn test_takes_hanging_queen() {
        let mut board = build_board("4k3/8/8/3q4/8/8/8/3RK3 w - -").unwrap();
        let result = search(&mut board, &SearchConfig::new(2), &MaterialEvaluator);
        assert_eq!(result.best_move.unwrap().to_lan(), "d1d5");
        assert_eq!(result.score, 500);
    }

    #[test]
    fn test_terminal_root() {
        let mut mated = build_board("R5k1/5ppp/8/8/8/8/8/6K1 b - -").unwrap();
        let result = search(&mut mated, &SearchConfig::new(3), &MaterialEvaluator);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, CHECKMATE + 3);

        let mut stalemate = build_board("7k/5Q2/6K1/8/8/8/8/8 b - -").unwrap();
        let result = search(&mut stalemate, &SearchConfig::new(3), &MaterialEvaluator);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_missing_king_is_terminal() {
        let mut board = build_board("8/8/8/8/8/8/8/4K3 b - -").unwrap();
        let result = search(&mut board, &SearchConfig::new(3), &MaterialEvaluator);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 20000);
        assert_eq!(result.stats.nodes_searched, 1);
    }

    #[test]
    fn test_zero_depth_returns_evaluation() {
        let mut board = build_board("4k3/8/8/8/8/8/8/R3K3 b - -").unwrap();
        let result = search(&mut board, &SearchConfig::new(0), &MaterialEvaluator);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 500);
    }

    #[test]
    fn test_side_override() {
        let mut board = build_board(STARTING_FEN).unwrap().with_side_to_move(Color::Black);
        let result = search(&mut board, &SearchConfig::new(2), &MaterialEvaluator);
        assert_eq!(result.best_move.unwrap().piece_moving().color, Color::Black);
    }

    #[test]
    fn test_search_restores_board() {
        for fen in POSITIONS {
            let mut board = build_board(fen).unwrap();
            let before = (board.to_fen(), board.zobrist_hash());
            search(&mut board, &SearchConfig::new(3), &MaterialEvaluator);
            assert_eq!((board.to_fen(), board.zobrist_hash()), before);
            assert_eq!(board.ply_count(), 0);
        }
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        for fen in POSITIONS {
            for depth in 1..=3 {
                let mut board = build_board(fen).unwrap();
                let reference = exhaustive_search(&mut board, depth, &MaterialEvaluator);
                let pruned = search(&mut board, &SearchConfig::new(depth).without_cache(), &MaterialEvaluator);
                assert_eq!(pruned.score, reference.score, "{fen} depth {depth}");
                assert_eq!(pruned.best_move, reference.best_move, "{fen} depth {depth}");
                assert!(pruned.stats.nodes_searched <= reference.stats.nodes_searched);
            }
        }
    }

    #[test]
    fn test_cache_is_transparent() {
        for fen in POSITIONS {
            for depth in 1..=3 {
                let mut board = build_board(fen).unwrap();
                let cached = search(&mut board, &SearchConfig::new(depth), &MaterialEvaluator);
                let uncached = search(&mut board, &SearchConfig::new(depth).without_cache(), &MaterialEvaluator);
                assert_eq!(cached.score, uncached.score, "{fen} depth {depth}");
                assert_eq!(cached.best_move, uncached.best_move, "{fen} depth {depth}");
                assert_eq!(uncached.stats.cache_hits, 0);
            }
        }
    }

    #[test]
    fn test_cache_is_transparent_deeper() {
        let mut board = build_board(STARTING_FEN).unwrap();
        let cached = search(&mut board, &SearchConfig::new(4), &MaterialEvaluator);
        let uncached = search(&mut board, &SearchConfig::new(4).without_cache(), &MaterialEvaluator);
        assert_eq!((cached.score, cached.best_move), (uncached.score, uncached.best_move));
    }

    #[test]
    fn test_config() {
        assert_eq!(SearchConfig::default(), SearchConfig { depth: 4, use_cache: true });
        assert_eq!(SearchConfig::new(6).without_cache(), SearchConfig { depth: 6, use_cache: false });
    }
}
