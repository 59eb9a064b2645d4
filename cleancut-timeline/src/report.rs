//! Non-fatal diagnostics returned alongside every editing result.

use thiserror::Error;

/// Something the editor corrected or dropped instead of failing.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Diagnostic {
    /// Interval with a negative bound, non-finite bound or `start >= end`; dropped
    #[error("invalid interval [{start}, {end}) dropped")]
    InvalidInterval { start: f64, end: f64 },

    /// Removal ending past the declared duration; clamped, or discarded when
    /// it starts at or after the end of the timeline
    #[error("removal [{start}, {end}) exceeds timeline duration {duration}s")]
    DurationExceeded { start: f64, end: f64, duration: f64 },

    /// Removals cover the whole timeline; nothing is left to keep
    #[error("entire timeline of {duration}s removed")]
    EmptyKeepSet { duration: f64 },

    /// Clipped record collapsed after remapping; its end was floored
    #[error("clipped record at {start}s collapsed, end floored to {end}s")]
    DegenerateClippedRecord { start: f64, end: f64 },
}

/// Diagnostic discriminant, used for counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    InvalidInterval,
    DurationExceeded,
    EmptyKeepSet,
    DegenerateClippedRecord,
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::InvalidInterval { .. } => DiagnosticKind::InvalidInterval,
            Diagnostic::DurationExceeded { .. } => DiagnosticKind::DurationExceeded,
            Diagnostic::EmptyKeepSet { .. } => DiagnosticKind::EmptyKeepSet,
            Diagnostic::DegenerateClippedRecord { .. } => DiagnosticKind::DegenerateClippedRecord,
        }
    }
}

/// Diagnostics accumulated by one editing call (or one whole run).
///
/// Reports are plain values: callers decide whether to log them, assert on
/// them or ignore them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::EmptyKeepSet { duration } => {
                tracing::warn!(duration = *duration, "removals cover the entire timeline");
            }
            d => tracing::debug!(kind = ?d.kind(), "{d}"),
        }

        self.diagnostics.push(diagnostic);
    }

    /// Append every diagnostic of `other`.
    pub fn merge(&mut self, other: Report) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// True when nothing was dropped, clamped or corrected.
    pub fn is_clean(&self) -> bool {
        self.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind() == kind).count()
    }

    pub fn invalid_intervals(&self) -> usize {
        self.count(DiagnosticKind::InvalidInterval)
    }

    pub fn duration_exceeded(&self) -> usize {
        self.count(DiagnosticKind::DurationExceeded)
    }

    pub fn degenerate_records(&self) -> usize {
        self.count(DiagnosticKind::DegenerateClippedRecord)
    }

    /// True when an inversion found nothing to keep.
    pub fn is_whole_timeline_removed(&self) -> bool {
        self.count(DiagnosticKind::EmptyKeepSet) > 0
    }
}

impl Extend<Diagnostic> for Report {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}

impl IntoIterator for Report {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
