//! One editing run: detections in, cut list and caption remapping out.

use crate::clip::{Record, RecordClipper};
use crate::config::EditConfig;
use crate::error::{ConfigError, Result, non_negative};
use crate::interval::{LabeledInterval, detections_from_json};
use crate::invert::{KeepSet, complement};
use crate::merge::IntervalMerger;
use crate::remap::TimestampRemapper;
use crate::removal::RemovalSet;
use crate::report::Report;
use serde::Serialize;
use std::fmt;

/// Merged removals, keep set and remapper for a timeline of known duration.
///
/// Removals are already clamped to the duration, so [`EditPlan::keep`] and
/// [`EditPlan::remap`] always agree.
#[derive(Clone, Debug)]
pub struct EditPlan {
    config: EditConfig,
    removals: RemovalSet,
    keep: KeepSet,
    remapper: TimestampRemapper,
    clipper: RecordClipper,
    report: Report,
}

/// Summary of how much of the timeline survives.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EditStats {
    pub original_duration: f64,
    pub removed_duration: f64,
    pub kept_duration: f64,
    pub removal_count: usize,
    pub keep_count: usize,
    /// Kept over original duration; `1.0` for an empty timeline
    pub keep_ratio: f64,
}

impl fmt::Display for EditStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kept {:.2}s of {:.2}s ({:.1}%) in {} segments, {} removals totaling {:.2}s",
            self.kept_duration,
            self.original_duration,
            self.keep_ratio * 100.0,
            self.keep_count,
            self.removal_count,
            self.removed_duration
        )
    }
}

impl EditPlan {
    /// Validate, merge, clamp and invert.
    ///
    /// Fails only on bad configuration or an invalid duration; everything
    /// else lands in [`EditPlan::report`].
    pub fn build<I>(detections: I, duration: f64, config: &EditConfig) -> Result<Self>
    where
        I: IntoIterator<Item = LabeledInterval>,
    {
        config.validate()?;
        if !non_negative(duration) {
            return Err(ConfigError::InvalidDuration(duration).into());
        }

        let merger = IntervalMerger::from_config(config)?;
        let clipper = RecordClipper::from_config(config)?;

        let (merged, mut report) = merger.merge(detections);
        let removals = merged.clamp_to(duration, &mut report);
        let keep = complement(&removals, duration, &mut report);
        let remapper = TimestampRemapper::new(&removals);

        let plan = Self {
            config: *config,
            removals,
            keep,
            remapper,
            clipper,
            report,
        };

        let stats = plan.stats();
        tracing::info!(
            removals = stats.removal_count,
            keeps = stats.keep_count,
            removed_secs = stats.removed_duration,
            kept_secs = stats.kept_duration,
            diagnostics = plan.report.len(),
            "built edit plan"
        );

        Ok(plan)
    }

    /// Build from a JSON array of detections.
    pub fn from_json(json: &str, duration: f64, config: &EditConfig) -> Result<Self> {
        Self::build(detections_from_json(json)?, duration, config)
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn duration(&self) -> f64 {
        self.keep.duration()
    }

    /// Removals clamped to the timeline.
    pub fn removals(&self) -> &RemovalSet {
        &self.removals
    }

    pub fn keep(&self) -> &KeepSet {
        &self.keep
    }

    pub fn remapper(&self) -> &TimestampRemapper {
        &self.remapper
    }

    /// Diagnostics from merging, clamping and inverting.
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn remap(&self, t: f64) -> f64 {
        self.remapper.remap(t)
    }

    pub fn clip(&self, record: &Record) -> (Vec<Record>, Report) {
        let mut report = Report::new();
        let pieces = self
            .clipper
            .clip_with(record, &self.removals, &self.remapper, &mut report);
        (pieces, report)
    }

    /// Clip records in input order against the plan's removals.
    pub fn clip_all<'a, I>(&self, records: I) -> (Vec<Record>, Report)
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut report = Report::new();

        let clipped: Vec<_> = records
            .into_iter()
            .flat_map(|record| {
                self.clipper
                    .clip_with(record, &self.removals, &self.remapper, &mut report)
            })
            .collect();

        tracing::debug!(
            records = clipped.len(),
            diagnostics = report.len(),
            "clipped records"
        );

        (clipped, report)
    }

    pub fn stats(&self) -> EditStats {
        let original_duration = self.keep.duration();
        let kept_duration = self.keep.edited_duration();

        EditStats {
            original_duration,
            removed_duration: self.removals.total_duration(),
            kept_duration,
            removal_count: self.removals.len(),
            keep_count: self.keep.len(),
            keep_ratio: if original_duration > 0.0 {
                kept_duration / original_duration
            } else {
                1.0
            },
        }
    }
}
