//! Kill-count levels

/// Level for a cumulative kill count
pub fn level_for(kill_count: u32, level_interval: u32) -> u32 {
    kill_count / level_interval.max(1)
}

/// Remembers the last level seen so each change is reported once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressionTracker {
    last_level: u32,
}

impl ProgressionTracker {
    pub fn last_level(&self) -> u32 {
        self.last_level
    }

    /// Returns the new level when it differs from the last one observed
    ///
    /// A jump of several levels in one tick is still a single change.
    pub fn check(&mut self, kill_count: u32, level_interval: u32) -> Option<u32> {
        let level = level_for(kill_count, level_interval);
        if level == self.last_level {
            return None;
        }
        self.last_level = level;
        Some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_derivation() {
        assert_eq!(level_for(12, 5), 2);
        assert_eq!(level_for(14, 5), 2);
        assert_eq!(level_for(15, 5), 3);
    }

    #[test]
    fn test_reports_each_change_once() {
        let mut tracker = ProgressionTracker::default();
        assert_eq!(tracker.check(4, 5), None);
        assert_eq!(tracker.check(5, 5), Some(1));
        assert_eq!(tracker.check(5, 5), None);
        assert_eq!(tracker.check(9, 5), None);
        // Multi-level jump is one change
        assert_eq!(tracker.check(17, 5), Some(3));
        assert_eq!(tracker.last_level(), 3);
    }

    proptest! {
        #[test]
        fn prop_level_monotonic(a in 0u32..10_000, b in 0u32..10_000, interval in 1u32..50) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(level_for(lo, interval) <= level_for(hi, interval));
        }
    }
}
