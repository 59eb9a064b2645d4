//! The canonical removal set consumed by every downstream component.

use crate::interval::Interval;
use crate::report::{Diagnostic, Report};
use serde::Serialize;
use std::collections::BTreeSet;

/// One merged span to cut, with the labels of every detection folded into it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Removal {
    #[serde(flatten)]
    interval: Interval,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    labels: BTreeSet<String>,
}

impl Removal {
    pub(crate) fn new(interval: Interval, labels: BTreeSet<String>) -> Self {
        Self { interval, labels }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn start(&self) -> f64 {
        self.interval.start()
    }

    pub fn end(&self) -> f64 {
        self.interval.end()
    }

    pub fn duration(&self) -> f64 {
        self.interval.duration()
    }

    /// Labels in sorted order, duplicates removed.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Labels joined with `", "`, e.g. `"darn, heck"`.
    pub fn label_summary(&self) -> String {
        self.labels().collect::<Vec<_>>().join(", ")
    }

    pub(crate) fn into_parts(self) -> (Interval, BTreeSet<String>) {
        (self.interval, self.labels)
    }
}

/// Sorted, non-overlapping, non-touching removals.
///
/// Built by [`IntervalMerger`](crate::merge::IntervalMerger); every
/// transformation returns a new set.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RemovalSet {
    removals: Vec<Removal>,
}

impl RemovalSet {
    /// Wrap removals already in canonical order.
    pub(crate) fn from_canonical(removals: Vec<Removal>) -> Self {
        debug_assert!(
            removals.windows(2).all(|w| w[0].end() < w[1].start()),
            "removals must be sorted and disjoint"
        );
        Self { removals }
    }

    pub fn len(&self) -> usize {
        self.removals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Removal> {
        self.removals.iter()
    }

    pub fn as_slice(&self) -> &[Removal] {
        &self.removals
    }

    /// Bare intervals, in order.
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.removals.iter().map(Removal::interval)
    }

    /// Total removed time in seconds.
    pub fn total_duration(&self) -> f64 {
        self.removals.iter().map(Removal::duration).sum()
    }

    /// End of the last removal, if any.
    pub fn end(&self) -> Option<f64> {
        self.removals.last().map(Removal::end)
    }

    /// Whether `t` falls inside a removal.
    pub fn contains(&self, t: f64) -> bool {
        self.overlapping_range(t, t).any(|r| r.interval.contains(t))
    }

    /// Whether `interval` lies entirely inside a single removal.
    pub fn covers(&self, interval: &Interval) -> bool {
        self.overlapping(*interval).any(|r| r.interval.covers(interval))
    }

    /// Removals sharing at least one point with `interval`, in order.
    pub fn overlapping(&self, interval: Interval) -> impl Iterator<Item = &Removal> + '_ {
        let (start, end) = (interval.start(), interval.end());
        self.overlapping_range(start, end).filter(move |r| r.start() < end)
    }

    /// Removals ending after `start`, stopping at the first starting after `end`.
    fn overlapping_range(&self, start: f64, end: f64) -> impl Iterator<Item = &Removal> + '_ {
        let first = self.removals.partition_point(|r| r.end() <= start);
        self.removals[first..].iter().take_while(move |r| r.start() <= end)
    }

    /// Clamp every removal to `[0, duration)`.
    ///
    /// Removals ending past `duration` are truncated; removals starting at or
    /// after it are discarded. Both are reported as `DurationExceeded`.
    pub fn clamp_to(&self, duration: f64, report: &mut Report) -> RemovalSet {
        let mut clamped = Vec::with_capacity(self.removals.len());

        for removal in &self.removals {
            if removal.end() <= duration {
                clamped.push(removal.clone());
                continue;
            }

            report.push(Diagnostic::DurationExceeded {
                start: removal.start(),
                end: removal.end(),
                duration,
            });

            if removal.start() < duration {
                let interval = Interval::spanning(removal.start(), duration);
                clamped.push(Removal::new(interval, removal.labels.clone()));
            }
        }

        Self::from_canonical(clamped)
    }
}

impl<'a> IntoIterator for &'a RemovalSet {
    type Item = &'a Removal;
    type IntoIter = std::slice::Iter<'a, Removal>;

    fn into_iter(self) -> Self::IntoIter {
        self.removals.iter()
    }
}

impl IntoIterator for RemovalSet {
    type Item = Removal;
    type IntoIter = std::vec::IntoIter<Removal>;

    fn into_iter(self) -> Self::IntoIter {
        self.removals.into_iter()
    }
}
