//! Validated time intervals and raw detector output.

use crate::error::Result;
use crate::report::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open time range `[start, end)` in seconds.
///
/// Always satisfies `0 <= start < end` with both bounds finite; the only way to
/// obtain one from outside the crate is [`Interval::new`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: f64,
    end: f64,
}

#[derive(Deserialize)]
struct RawInterval {
    start: f64,
    end: f64,
}

impl TryFrom<RawInterval> for Interval {
    type Error = Diagnostic;

    fn try_from(raw: RawInterval) -> std::result::Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Validate and build an interval.
    pub fn new(start: f64, end: f64) -> std::result::Result<Self, Diagnostic> {
        if start.is_finite() && end.is_finite() && start >= 0.0 && start < end {
            Ok(Self { start, end })
        } else {
            Err(Diagnostic::InvalidInterval { start, end })
        }
    }

    /// Build from bounds the caller has already proven valid.
    pub(crate) fn spanning(start: f64, end: f64) -> Self {
        debug_assert!(start >= 0.0 && start < end, "invalid span [{start}, {end})");
        Self { start, end }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `t` lies in `[start, end)`.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    /// Whether the two half-open ranges share any point.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn covers(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Symmetric dilation, clamped so the start never goes below zero.
    pub(crate) fn dilate(self, padding: f64) -> Self {
        Self::spanning((self.start - padding).max(0.0), self.end + padding)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s)", self.start, self.end)
    }
}

/// Raw `(start, end, label?)` produced by a detector.
///
/// Bounds are not validated here; the merger drops invalid ones. The label is
/// carried for diagnostics only (matched words, detector name).
///
/// Deserializes from `{"start", "end", "label"?}` objects as well as
/// `[start, end]` and `[start, end, "label"]` arrays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "DetectionRepr")]
pub struct LabeledInterval {
    pub start: f64,
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Wire shapes accepted for a detection.
#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionRepr {
    Object {
        start: f64,
        end: f64,
        #[serde(default)]
        label: Option<String>,
    },
    Labeled(f64, f64, String),
    Bare(f64, f64),
}

impl From<DetectionRepr> for LabeledInterval {
    fn from(repr: DetectionRepr) -> Self {
        match repr {
            DetectionRepr::Object { start, end, label } => Self { start, end, label },
            DetectionRepr::Labeled(start, end, label) => Self::labeled(start, end, label),
            DetectionRepr::Bare(start, end) => Self::new(start, end),
        }
    }
}

impl LabeledInterval {
    /// Unlabeled detection.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            label: None,
        }
    }

    pub fn labeled(start: f64, end: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: Some(label.into()),
        }
    }

    /// Validate the bounds.
    pub fn interval(&self) -> std::result::Result<Interval, Diagnostic> {
        Interval::new(self.start, self.end)
    }
}

impl From<Interval> for LabeledInterval {
    fn from(interval: Interval) -> Self {
        Self::new(interval.start, interval.end)
    }
}

/// Parse a JSON array of detections.
pub fn detections_from_json(json: &str) -> Result<Vec<LabeledInterval>> {
    Ok(serde_json::from_str(json)?)
}
