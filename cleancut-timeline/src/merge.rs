//! Coalesce raw detections into a canonical [`RemovalSet`].

use crate::config::EditConfig;
use crate::error::{ConfigError, Result, non_negative};
use crate::interval::{Interval, LabeledInterval};
use crate::removal::{Removal, RemovalSet};
use crate::report::Report;
use std::collections::BTreeSet;

/// Sweep-line merger with a gap tolerance and optional symmetric padding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalMerger {
    gap_tolerance: f64,
    padding: f64,
}

/// Removal being grown by the sweep.
struct Open {
    start: f64,
    end: f64,
    labels: BTreeSet<String>,
}

impl Open {
    fn new(interval: Interval, labels: BTreeSet<String>) -> Self {
        Self {
            start: interval.start(),
            end: interval.end(),
            labels,
        }
    }

    /// Touching intervals always merge, whatever the tolerance.
    fn accepts(&self, next: &Interval, gap_tolerance: f64) -> bool {
        next.start() == self.end || next.start() <= self.end + gap_tolerance
    }

    fn absorb(&mut self, next: Interval, labels: BTreeSet<String>) {
        self.end = self.end.max(next.end());
        self.labels.extend(labels);
    }

    fn close(self) -> Removal {
        Removal::new(Interval::spanning(self.start, self.end), self.labels)
    }
}

impl IntervalMerger {
    /// Merger without padding.
    pub fn new(gap_tolerance: f64) -> Result<Self> {
        if !non_negative(gap_tolerance) {
            return Err(ConfigError::InvalidGapTolerance(gap_tolerance).into());
        }

        Ok(Self {
            gap_tolerance,
            padding: 0.0,
        })
    }

    /// Widen every valid detection by `padding` on both sides before merging.
    pub fn with_padding(mut self, padding: f64) -> Result<Self> {
        if !non_negative(padding) {
            return Err(ConfigError::InvalidPadding(padding).into());
        }

        self.padding = padding;
        Ok(self)
    }

    pub fn from_config(config: &EditConfig) -> Result<Self> {
        Self::new(config.gap_tolerance)?.with_padding(config.padding)
    }

    pub fn gap_tolerance(&self) -> f64 {
        self.gap_tolerance
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Merge detections from any number of sources.
    ///
    /// Invalid detections are dropped and reported; the result does not
    /// depend on input order.
    pub fn merge<I>(&self, detections: I) -> (RemovalSet, Report)
    where
        I: IntoIterator<Item = LabeledInterval>,
    {
        let mut report = Report::new();

        let valid: Vec<_> = detections
            .into_iter()
            .filter_map(|detection| match detection.interval() {
                Ok(interval) => {
                    let labels: BTreeSet<String> = detection.label.into_iter().collect();
                    Some((interval.dilate(self.padding), labels))
                }
                Err(diagnostic) => {
                    report.push(diagnostic);
                    None
                }
            })
            .collect();

        tracing::trace!(
            valid = valid.len(),
            dropped = report.invalid_intervals(),
            "merging detections"
        );

        (self.sweep(valid), report)
    }

    /// Merge several detector outputs at once.
    pub fn merge_sources<S, I>(&self, sources: S) -> (RemovalSet, Report)
    where
        S: IntoIterator<Item = I>,
        I: IntoIterator<Item = LabeledInterval>,
    {
        self.merge(sources.into_iter().flatten())
    }

    /// Re-run the sweep over an existing set without padding it again.
    ///
    /// With the same tolerance this returns an equal set.
    pub fn remerge(&self, removals: &RemovalSet) -> RemovalSet {
        self.sweep(removals.iter().cloned().map(Removal::into_parts).collect())
    }

    fn sweep(&self, mut intervals: Vec<(Interval, BTreeSet<String>)>) -> RemovalSet {
        // stable: equal starts keep insertion order
        intervals.sort_by(|(a, _), (b, _)| a.start().total_cmp(&b.start()));

        let mut intervals = intervals.into_iter();
        let Some((first, labels)) = intervals.next() else {
            return RemovalSet::default();
        };

        let mut removals = Vec::new();
        let mut current = Open::new(first, labels);

        for (interval, labels) in intervals {
            if current.accepts(&interval, self.gap_tolerance) {
                current.absorb(interval, labels);
            } else {
                removals.push(current.close());
                current = Open::new(interval, labels);
            }
        }
        removals.push(current.close());

        RemovalSet::from_canonical(removals)
    }
}
