use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct SearchStats {
    pub nodes_searched: u64,
    pub cache_hits: u64,
    pub cutoffs: u64,
    start: Instant,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            nodes_searched: Default::default(),
            cache_hits: Default::default(),
            cutoffs: Default::default(),
            start: Instant::now(),
        }
    }
}

impl SearchStats {
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn nodes_per_second(&self) -> f64 {
        self.nodes_searched as f64 / self.elapsed().as_secs_f64().max(f64::EPSILON)
    }
}
