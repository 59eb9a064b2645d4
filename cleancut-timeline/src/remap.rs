//! Map timestamps from the original timeline into the edited one.
//!
//! Cutting every removal and splicing the rest together moves a timestamp
//! `t` left by the time removed before it:
//!
//! ```text
//! R(t)     = Σ (min(end_i, t) - start_i)   over removals with start_i < t
//! remap(t) = max(0, t - R(t))
//! ```
//!
//! The partial term handles a removal straddling `t`: a timestamp inside a
//! removal lands exactly where that removal begins in the edited timeline.
//! Callers that need an interior timestamp to survive must clip first (see
//! [`crate::clip`]).

use crate::interval::Interval;
use crate::removal::RemovalSet;

/// Map `t` into the edited timeline by scanning `removals`.
pub fn remap(t: f64, removals: &RemovalSet) -> f64 {
    let removed: f64 = removals
        .iter()
        .take_while(|r| r.start() < t)
        .map(|r| r.end().min(t) - r.start())
        .sum();

    (t - removed).max(0.0)
}

/// Prebuilt remapper answering each lookup with a binary search.
///
/// Agrees with [`remap`] up to rounding. Each removal is stored as the
/// point where it starts in the edited timeline, so timestamps inside a
/// removal map to exactly that point and the mapping stays monotone even
/// under floating-point rounding.
#[derive(Clone, Debug, Default)]
pub struct TimestampRemapper {
    starts: Vec<f64>,
    ends: Vec<f64>,
    /// Edited-timeline position of each removal's start
    anchors: Vec<f64>,
    total_removed: f64,
}

impl TimestampRemapper {
    pub fn new(removals: &RemovalSet) -> Self {
        let mut starts = Vec::with_capacity(removals.len());
        let mut ends = Vec::with_capacity(removals.len());
        let mut anchors = Vec::with_capacity(removals.len());
        let mut total_removed = 0.0;

        for removal in removals {
            starts.push(removal.start());
            ends.push(removal.end());
            anchors.push(removal.start() - total_removed);
            total_removed += removal.duration();
        }

        Self {
            starts,
            ends,
            anchors,
            total_removed,
        }
    }

    pub fn remap(&self, t: f64) -> f64 {
        // removals starting strictly before t
        let count = self.starts.partition_point(|&s| s < t);

        let Some(last) = count.checked_sub(1) else {
            return t.max(0.0);
        };

        (self.anchors[last] + (t - self.ends[last]).max(0.0)).max(0.0)
    }

    /// Map both ends of an interval.
    pub fn remap_interval(&self, interval: Interval) -> (f64, f64) {
        (self.remap(interval.start()), self.remap(interval.end()))
    }

    /// Total removed time.
    pub fn total_removed(&self) -> f64 {
        self.total_removed
    }
}
