use rustc_hash::FxHashMap;

use crate::moves::moves::Move;

/// How the stored score relates to the true value of the node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryFlag {
    Exact,
    /// The search failed high: the true value is at least `score`
    LowerBound,
    /// The search failed low: the true value is at most `score`
    UpperBound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableEntry {
    score: i32,
    best_move: Option<Move>,
    flag: EntryFlag,
}

impl TableEntry {
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    pub fn flag(&self) -> EntryFlag {
        self.flag
    }

    /// Returns the stored result if it settles a node searched with the window (alpha, beta)
    pub fn usable(&self, alpha: i32, beta: i32) -> Option<(i32, Option<Move>)> {
        let settles = match self.flag {
            EntryFlag::Exact => true,
            EntryFlag::LowerBound => self.score >= beta,
            EntryFlag::UpperBound => self.score <= alpha,
        };
        settles.then_some((self.score, self.best_move))
    }
}

/// Cache of search results owned by a single top-level search. Entries are keyed by the full
/// position key together with the remaining depth and the side being maximized, so a result is
/// only ever reused for an identical subtree.
#[derive(Clone, Debug, Default)]
pub struct TranspositionTable {
    map: FxHashMap<(u64, i32, bool), TableEntry>,
}

impl TranspositionTable {
    pub fn lookup(&self, key: u64, depth: i32, maximizing: bool) -> Option<&TableEntry> {
        self.map.get(&(key, depth, maximizing))
    }

    pub fn store(&mut self, key: u64, depth: i32, maximizing: bool, score: i32, best_move: Option<Move>, flag: EntryFlag) {
        self.map.insert((key, depth, maximizing), TableEntry { score, best_move, flag });
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// Classifies a node's result against the window it was searched with
pub fn entry_flag(score: i32, original_alpha: i32, beta: i32) -> EntryFlag {
    if score <= original_alpha {
        EntryFlag::UpperBound
    } else if score >= beta {
        EntryFlag::LowerBound
    } else {
        EntryFlag::Exact
    }
}
