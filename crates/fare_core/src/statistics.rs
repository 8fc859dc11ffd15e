use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use rustc_hash::FxHashMap;

use crate::{
    constants::{Weight, MAX_WEIGHT, MIN_WEIGHT, NUM_BUCKETS},
    store::UpsertOutcome,
};

/// Counters of a per-record write loop
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    pub created: usize,
    pub modified: usize,
    pub unchanged: usize,
    /// Records that produced nothing to write
    pub skipped: usize,
    /// Records whose lookup or write failed
    pub failed: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl RunStats {
    pub fn init(&mut self) {
        *self = RunStats::default();
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }

    pub fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Modified => self.modified += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
        }
    }

    /// Records that reached the store successfully
    pub fn written(&self) -> usize {
        self.created + self.modified + self.unchanged
    }

    pub fn total(&self) -> usize {
        self.written() + self.skipped + self.failed
    }
}

impl Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} created, {} modified, {} unchanged, {} skipped, {} failed in {:?}",
            self.created, self.modified, self.unchanged, self.skipped, self.failed, self.duration
        )
    }
}

/// Number of airports per weight, index 0 holds weight 1
pub fn weight_distribution(weights: &FxHashMap<String, Weight>) -> [usize; NUM_BUCKETS] {
    let mut distribution = [0; NUM_BUCKETS];
    for weight in weights.values() {
        let idx = (*weight).clamp(MIN_WEIGHT, MAX_WEIGHT) as usize - 1;
        distribution[idx] += 1;
    }
    distribution
}
