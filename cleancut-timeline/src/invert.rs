//! Complement a removal set into the intervals to keep.

use crate::error::{ConfigError, Result, non_negative};
use crate::interval::Interval;
use crate::removal::RemovalSet;
use crate::report::{Diagnostic, Report};
use serde::Serialize;

/// Intervals of `[0, duration)` not covered by any removal.
///
/// Adjacent keep intervals never touch: a removal always lies between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct KeepSet {
    intervals: Vec<Interval>,
    duration: f64,
}

/// A keep interval together with where it lands in the edited timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Span in the original timeline
    pub source: Interval,
    /// Start of the span in the edited timeline
    pub edited_start: f64,
}

impl Placement {
    pub fn edited_end(&self) -> f64 {
        self.edited_start + self.source.duration()
    }
}

impl KeepSet {
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Nothing is kept: either the whole timeline was removed or it was empty.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Length of the original timeline.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Length of the edited timeline.
    pub fn edited_duration(&self) -> f64 {
        self.intervals.iter().map(Interval::duration).sum()
    }

    /// Keep intervals in order, each with its start in the edited timeline.
    ///
    /// This is the cut list a re-encoder concatenates.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        self.intervals.iter().scan(0.0, |edited, &source| {
            let placement = Placement {
                source,
                edited_start: *edited,
            };
            *edited += source.duration();
            Some(placement)
        })
    }
}

/// Invert `removals` over a timeline of `duration` seconds.
///
/// Removals extending past `duration` are clamped first (and reported). An
/// empty keep set is a valid outcome, flagged with
/// [`Diagnostic::EmptyKeepSet`].
pub fn invert(removals: &RemovalSet, duration: f64) -> Result<(KeepSet, Report)> {
    if !non_negative(duration) {
        return Err(ConfigError::InvalidDuration(duration).into());
    }

    let mut report = Report::new();
    let clamped = removals.clamp_to(duration, &mut report);
    let keep = complement(&clamped, duration, &mut report);

    Ok((keep, report))
}

/// Walk removals already clamped to `duration`.
pub(crate) fn complement(removals: &RemovalSet, duration: f64, report: &mut Report) -> KeepSet {
    let mut intervals = Vec::with_capacity(removals.len() + 1);
    let mut cursor = 0.0_f64;

    for removal in removals {
        if cursor < removal.start() {
            intervals.push(Interval::spanning(cursor, removal.start()));
        }
        cursor = cursor.max(removal.end());
    }

    if cursor < duration {
        intervals.push(Interval::spanning(cursor, duration));
    }

    if intervals.is_empty() && duration > 0.0 {
        report.push(Diagnostic::EmptyKeepSet { duration });
    }

    KeepSet {
        intervals,
        duration,
    }
}
