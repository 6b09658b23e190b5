use std::time::Duration;

use serde::Serialize;

/// Run-level counters, summed across collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub collections_updated: usize,
    pub items_added: usize,
    pub items_removed: usize,
    pub errors: usize,
    pub duration: Duration,
}

impl RunStats {
    /// Sum counters. Durations are summed too; callers overwrite the run
    /// duration with wall-clock time.
    pub fn merge(&mut self, other: &RunStats) {
        self.collections_updated += other.collections_updated;
        self.items_added += other.items_added;
        self.items_removed += other.items_removed;
        self.errors += other.errors;
        self.duration += other.duration;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn record_sync(&mut self, added: usize, removed: usize) {
        self.collections_updated += 1;
        self.items_added += added;
        self.items_removed += removed;
    }

    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_order_independent() {
        let a = RunStats {
            collections_updated: 1,
            items_added: 3,
            ..Default::default()
        };
        let b = RunStats {
            items_removed: 2,
            errors: 1,
            ..Default::default()
        };

        let mut ab = RunStats::default();
        ab.merge(&a);
        ab.merge(&b);
        let mut ba = RunStats::default();
        ba.merge(&b);
        ba.merge(&a);

        assert_eq!(ab, ba);
        assert_eq!(ab.items_added, 3);
        assert_eq!(ab.errors, 1);
        assert!(!ab.is_success());
    }
}
