//! Tunable parameters for one editing run.

use crate::error::{ConfigError, Result, non_negative};
use serde::{Deserialize, Serialize};

/// Default merge-gap tolerance in seconds
pub const DEFAULT_GAP_TOLERANCE: f64 = 0.5;

/// Default symmetric padding applied to detections in seconds
pub const DEFAULT_PADDING: f64 = 0.0;

/// Default floor for clipped records that collapse after remapping, in seconds
pub const DEFAULT_MIN_RECORD_DURATION: f64 = 0.1;

/// Editing configuration.
///
/// Missing JSON fields fall back to [`EditConfig::DEFAULT`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Detections separated by at most this gap are merged into one removal.
    pub gap_tolerance: f64,

    /// Widen every detection by this much on both sides before merging.
    ///
    /// - 0.0s: cut exactly what the detector reported
    /// - 0.15s: word-level speech hits, tight
    /// - 0.2s: caption-cue hits
    /// - 0.3s: word-level speech hits, safe
    pub padding: f64,

    /// Minimum length given to a clipped record whose remapped end does not
    /// come after its remapped start.
    pub min_record_duration: f64,
}

impl EditConfig {
    /// No padding, half-second merge gap.
    pub const DEFAULT: Self = Self {
        gap_tolerance: DEFAULT_GAP_TOLERANCE,
        padding: DEFAULT_PADDING,
        min_record_duration: DEFAULT_MIN_RECORD_DURATION,
    };

    /// Preset for word-level hits from a speech transcript.
    pub const SPEECH: Self = Self {
        padding: 0.15,
        ..Self::DEFAULT
    };

    /// Preset for cue-level hits from caption text.
    pub const CAPTIONS: Self = Self {
        padding: 0.2,
        ..Self::DEFAULT
    };

    /// Builder-style setter for the merge-gap tolerance.
    pub fn with_gap_tolerance(mut self, secs: f64) -> Self {
        self.gap_tolerance = secs;
        self
    }

    /// Builder-style setter for detection padding.
    pub fn with_padding(mut self, secs: f64) -> Self {
        self.padding = secs;
        self
    }

    /// Builder-style setter for the clipped-record floor.
    pub fn with_min_record_duration(mut self, secs: f64) -> Self {
        self.min_record_duration = secs;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !non_negative(self.gap_tolerance) {
            return Err(ConfigError::InvalidGapTolerance(self.gap_tolerance));
        }
        if !non_negative(self.padding) {
            return Err(ConfigError::InvalidPadding(self.padding));
        }
        if !(self.min_record_duration.is_finite() && self.min_record_duration > 0.0) {
            return Err(ConfigError::InvalidMinRecordDuration(
                self.min_record_duration,
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for EditConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
