//! SRT subtitle conversion utilities.
//!
//! Converts between SRT cues and timeline [`Record`]s. Times are seconds on the
//! timeline side and whole milliseconds on the SRT side.

use crate::error::Result;
use cleancut_timeline::{Diagnostic, Record};
use srtlib::{Subtitle, Subtitles, Timestamp};

/// Parse SRT content into records, in file order.
pub fn parse_srt(content: &str) -> Result<Vec<Record>> {
    let subtitles = Subtitles::parse_from_str(content.to_string())?;

    Ok(subtitles.to_vec().iter().map(to_record).collect())
}

/// Convert a subtitle to a record, dropping its cue number.
fn to_record(subtitle: &Subtitle) -> Record {
    Record::new(
        subtitle.text.clone(),
        timestamp_to_secs(&subtitle.start_time),
        timestamp_to_secs(&subtitle.end_time),
    )
}

fn timestamp_to_secs(timestamp: &Timestamp) -> f64 {
    let (hours, minutes, seconds, millis) = timestamp.get();

    f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + f64::from(seconds)
        + f64::from(millis) / 1000.0
}

/// Convert records to SRT subtitles numbered from 1.
pub fn to_subtitles(records: &[Record]) -> Vec<Subtitle> {
    records
        .iter()
        .zip(1..)
        .map(|(r, i)| create_subtitle(r, i))
        .collect()
}

/// Shortest cue written, in milliseconds
const MIN_CUE_MILLIS: u32 = 1;

/// Create a subtitle from a record, never with an empty time range.
fn create_subtitle(record: &Record, index: usize) -> Subtitle {
    let (start, end) = cue_millis(record);

    Subtitle::new(
        index,
        Timestamp::from_milliseconds(start),
        Timestamp::from_milliseconds(end),
        record.text.clone(),
    )
}

/// Whole-millisecond bounds of a record.
///
/// An end that rounds onto or before the start is pushed `MIN_CUE_MILLIS`
/// past it.
fn cue_millis(record: &Record) -> (u32, u32) {
    let start = secs_to_millis(record.start);
    let end = secs_to_millis(record.end).max(start.saturating_add(MIN_CUE_MILLIS));

    (start, end)
}

/// Round seconds to the nearest millisecond; negative times saturate to zero.
fn secs_to_millis(secs: f64) -> u32 {
    (secs * 1000.0).round() as u32
}

/// Records whose cue would collapse once rounded to whole milliseconds.
///
/// Each yields a `DegenerateClippedRecord` carrying the bounds actually
/// written by [`to_subtitles`].
pub fn collapsed_cues(records: &[Record]) -> impl Iterator<Item = Diagnostic> + '_ {
    records
        .iter()
        .filter(|record| secs_to_millis(record.end) <= secs_to_millis(record.start))
        .map(|record| {
            let (start, end) = cue_millis(record);
            Diagnostic::DegenerateClippedRecord {
                start: f64::from(start) / 1000.0,
                end: f64::from(end) / 1000.0,
            }
        })
}

/// Render records as SRT file content.
pub fn render_srt(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut content = Subtitles::new_from_vec(to_subtitles(records)).to_string();

    if !content.ends_with('\n') {
        content.push('\n');
    }

    content
}

/// Format subtitles as SRT file content.
pub fn display_subtitles(subtitles: &[Subtitle]) -> String {
    subtitles
        .iter()
        .map(Subtitle::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// First `head` and last `tail` subtitles with an ellipsis between, for logs.
pub fn preview_subtitles(subtitles: &[Subtitle], head: usize, tail: usize) -> String {
    let total = subtitles.len();

    if total <= head + tail {
        return display_subtitles(subtitles);
    }

    [
        display_subtitles(&subtitles[..head]),
        "...".to_string(),
        display_subtitles(&subtitles[total - tail..]),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n")
}
