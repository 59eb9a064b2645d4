//! cleancut-timeline: cut detected spans out of a media timeline.
//!
//! Detectors (speech transcript, caption text, silence) report the spans to
//! drop as loose `(start, end, label?)` triples. This crate turns them into a
//! cut list for a re-encoder and keeps every caption record in sync with the
//! edited timeline.
//!
//! # Architecture
//!
//! - [`merge::IntervalMerger`]: coalesces detections into a canonical
//!   [`removal::RemovalSet`]
//! - [`invert::invert`]: complements the removals into the [`invert::KeepSet`]
//!   over `[0, duration)`
//! - [`remap::TimestampRemapper`]: maps original timestamps into the edited
//!   timeline
//! - [`clip::RecordClipper`]: drops the removed parts of a record and remaps
//!   what survives
//! - [`plan::EditPlan`]: all of the above for one run, driven by an
//!   [`config::EditConfig`]
//!
//! Nothing here fails on bad detector output. Invalid or out-of-range
//! intervals are corrected or dropped and recorded in a [`report::Report`]
//! returned next to the result.
//!
//! # Quick Start
//!
//! ```
//! use cleancut_timeline::{EditConfig, EditPlan, LabeledInterval, Record};
//!
//! let detections = vec![
//!     LabeledInterval::labeled(10.0, 12.0, "darn"),
//!     LabeledInterval::labeled(12.3, 15.0, "heck"),
//! ];
//!
//! let plan = EditPlan::build(detections, 100.0, &EditConfig::DEFAULT)?;
//!
//! for keep in plan.keep().iter() {
//!     println!("keep {keep}");
//! }
//!
//! let (records, _report) = plan.clip(&Record::new("hello", 14.0, 17.0));
//! assert_eq!(records, [Record::new("hello", 10.0, 12.0)]);
//! # Ok::<(), cleancut_timeline::Error>(())
//! ```

pub mod clip;
pub mod config;
pub mod error;
pub mod interval;
pub mod invert;
pub mod merge;
pub mod plan;
pub mod remap;
pub mod removal;
pub mod report;

pub use clip::{Record, RecordClipper};
pub use config::EditConfig;
pub use error::{ConfigError, Error, Result};
pub use interval::{Interval, LabeledInterval};
pub use invert::{KeepSet, invert};
pub use merge::IntervalMerger;
pub use plan::{EditPlan, EditStats};
pub use remap::{TimestampRemapper, remap};
pub use removal::{Removal, RemovalSet};
pub use report::{Diagnostic, DiagnosticKind, Report};
