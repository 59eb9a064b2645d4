//! cleancut-captions: keep SRT captions in sync with a cut-and-splice edit.
//!
//! Parses SRT cues into [`cleancut_timeline::Record`]s, clips and remaps them
//! against an [`cleancut_timeline::EditPlan`], and writes the survivors back
//! out renumbered.
//!
//! # Quick Start
//!
//! ```ignore
//! use cleancut_captions::retime::retime_srt_file;
//! use cleancut_timeline::{EditConfig, EditPlan};
//!
//! let detections = std::fs::read_to_string("detections.json")?;
//! let plan = EditPlan::from_json(&detections, 312.4, &EditConfig::CAPTIONS)?;
//!
//! let report = retime_srt_file("input.srt".as_ref(), "output.srt".as_ref(), &plan)?;
//! for diagnostic in &report {
//!     eprintln!("{diagnostic}");
//! }
//! ```

pub mod error;
pub mod retime;
pub mod srt;

pub use error::{Error, Result};
pub use retime::{retime_srt, retime_srt_file};
