//! Cut removed spans out of caption records and move the survivors into the
//! edited timeline.

use crate::config::{DEFAULT_MIN_RECORD_DURATION, EditConfig};
use crate::error::{ConfigError, Result};
use crate::interval::Interval;
use crate::remap::TimestampRemapper;
use crate::removal::RemovalSet;
use crate::report::{Diagnostic, Report};
use serde::{Deserialize, Serialize};

/// A timed piece of text, typically one caption cue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Cue text, never modified by clipping
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Record {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Validate the record's bounds.
    pub fn interval(&self) -> std::result::Result<Interval, Diagnostic> {
        Interval::new(self.start, self.end)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Parts of `interval` not covered by any removal, in order.
///
/// Empty when a single removal covers the whole interval. Times are still in
/// the original timeline.
pub fn surviving_pieces(interval: Interval, removals: &RemovalSet) -> Vec<Interval> {
    let mut pieces = Vec::new();
    let mut cursor = interval.start();

    for removal in removals.overlapping(interval) {
        if cursor < removal.start() {
            pieces.push(Interval::spanning(
                cursor,
                removal.start().min(interval.end()),
            ));
        }
        cursor = cursor.max(removal.end());
    }

    if cursor < interval.end() {
        pieces.push(Interval::spanning(cursor, interval.end()));
    }

    pieces
}

/// Clips records against a removal set and remaps the surviving pieces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordClipper {
    min_duration: f64,
}

impl Default for RecordClipper {
    fn default() -> Self {
        Self {
            min_duration: DEFAULT_MIN_RECORD_DURATION,
        }
    }
}

impl RecordClipper {
    /// `min_duration` is the length given to a piece that collapses after
    /// remapping.
    pub fn new(min_duration: f64) -> Result<Self> {
        if !(min_duration.is_finite() && min_duration > 0.0) {
            return Err(ConfigError::InvalidMinRecordDuration(min_duration).into());
        }

        Ok(Self { min_duration })
    }

    pub fn from_config(config: &EditConfig) -> Result<Self> {
        Self::new(config.min_record_duration)
    }

    pub fn min_duration(&self) -> f64 {
        self.min_duration
    }

    /// Clip one record. Each surviving piece keeps the record's text.
    pub fn clip(&self, record: &Record, removals: &RemovalSet) -> (Vec<Record>, Report) {
        let remapper = TimestampRemapper::new(removals);
        let mut report = Report::new();

        let pieces = self.clip_with(record, removals, &remapper, &mut report);

        (pieces, report)
    }

    /// Clip a batch of records in input order.
    pub fn clip_all<'a, I>(&self, records: I, removals: &RemovalSet) -> (Vec<Record>, Report)
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let remapper = TimestampRemapper::new(removals);
        let mut report = Report::new();

        let clipped = records
            .into_iter()
            .flat_map(|record| self.clip_with(record, removals, &remapper, &mut report))
            .collect();

        (clipped, report)
    }

    /// Clip with a remapper already built for `removals`.
    pub(crate) fn clip_with(
        &self,
        record: &Record,
        removals: &RemovalSet,
        remapper: &TimestampRemapper,
        report: &mut Report,
    ) -> Vec<Record> {
        let interval = match record.interval() {
            Ok(interval) => interval,
            Err(diagnostic) => {
                report.push(diagnostic);
                return Vec::new();
            }
        };

        surviving_pieces(interval, removals)
            .into_iter()
            .map(|piece| {
                let (start, end) = remapper.remap_interval(piece);
                let (start, end) = self.place(start, end, report);
                Record::new(record.text.clone(), start, end)
            })
            .collect()
    }

    /// Floor a remapped piece whose end does not come after its start.
    fn place(&self, start: f64, end: f64, report: &mut Report) -> (f64, f64) {
        if end > start {
            return (start, end);
        }

        report.push(Diagnostic::DegenerateClippedRecord { start, end });
        (start, start + self.min_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::LabeledInterval;
    use crate::merge::IntervalMerger;

    const EPS: f64 = 1e-9;

    fn removals(pairs: &[(f64, f64)]) -> RemovalSet {
        let merger = IntervalMerger::new(0.0).unwrap();
        let (set, _) = merger.merge(pairs.iter().map(|&(s, e)| LabeledInterval::new(s, e)));
        set
    }

    fn spans(records: &[Record]) -> Vec<(f64, f64)> {
        records.iter().map(|r| (r.start, r.end)).collect()
    }

    #[test]
    fn record_spanning_two_removals() {
        let set = removals(&[(10.0, 15.0), (20.0, 25.0)]);
        let record = Record::new("hi", 12.0, 22.0);

        let pieces = surviving_pieces(record.interval().unwrap(), &set);
        assert_eq!(pieces, [Interval::new(15.0, 20.0).unwrap()]);

        let (clipped, report) = RecordClipper::default().clip(&record, &set);
        assert_eq!(spans(&clipped), [(10.0, 15.0)]);
        assert_eq!(clipped[0].text, "hi");
        assert!(report.is_clean());
    }

    #[test]
    fn record_before_removal_is_untouched() {
        let set = removals(&[(10.0, 15.0)]);
        let record = Record::new("x", 5.0, 8.0);

        let (clipped, report) = RecordClipper::default().clip(&record, &set);

        assert_eq!(clipped, [record]);
        assert!(report.is_clean());
    }

    #[test]
    fn removal_inside_record_splits_it() {
        let set = removals(&[(10.0, 15.0), (20.0, 25.0)]);
        let record = Record::new("long cue", 5.0, 22.0);

        let (clipped, _) = RecordClipper::default().clip(&record, &set);

        assert_eq!(spans(&clipped), [(5.0, 10.0), (10.0, 15.0)]);
        assert!(clipped.iter().all(|r| r.text == "long cue"));
    }

    #[test]
    fn record_after_removals_is_shifted() {
        let set = removals(&[(10.0, 15.0), (20.0, 25.0)]);

        let (clipped, _) = RecordClipper::default().clip(&Record::new("late", 30.0, 32.5), &set);

        assert_eq!(spans(&clipped), [(20.0, 22.5)]);
    }

    #[test]
    fn contained_record_disappears() {
        let set = removals(&[(10.0, 15.0)]);

        for (start, end) in [(10.0, 15.0), (11.0, 12.0), (10.0, 10.5), (14.0, 15.0)] {
            let (clipped, report) =
                RecordClipper::default().clip(&Record::new("gone", start, end), &set);
            assert!(clipped.is_empty(), "({start}, {end}) survived: {clipped:?}");
            assert!(report.is_clean());
        }
    }

    #[test]
    fn partially_covered_records_are_trimmed() {
        let set = removals(&[(10.0, 15.0)]);
        let clipper = RecordClipper::default();

        let (head, _) = clipper.clip(&Record::new("head", 8.0, 12.0), &set);
        assert_eq!(spans(&head), [(8.0, 10.0)]);

        let (tail, _) = clipper.clip(&Record::new("tail", 13.0, 17.0), &set);
        assert_eq!(spans(&tail), [(10.0, 12.0)]);
    }

    #[test]
    fn identity_without_removals() {
        let set = RemovalSet::default();
        let record = Record::new("same", 1.25, 3.75);

        let (clipped, report) = RecordClipper::default().clip(&record, &set);

        assert_eq!(clipped, [record]);
        assert!(report.is_clean());
    }

    #[test]
    fn invalid_record_is_dropped() {
        let set = removals(&[(10.0, 15.0)]);
        let clipper = RecordClipper::default();

        for record in [
            Record::new("backwards", 4.0, 3.0),
            Record::new("empty", 4.0, 4.0),
            Record::new("negative", -1.0, 2.0),
            Record::new("nan", f64::NAN, 2.0),
        ] {
            let (clipped, report) = clipper.clip(&record, &set);
            assert!(clipped.is_empty());
            assert_eq!(report.invalid_intervals(), 1);
        }
    }

    #[test]
    fn degenerate_piece_gets_minimum_duration() {
        let clipper = RecordClipper::new(0.1).unwrap();
        let mut report = Report::new();

        let (start, end) = clipper.place(5.0, 5.0, &mut report);

        assert_eq!(start, 5.0);
        assert!((end - 5.1).abs() < EPS);
        assert_eq!(report.degenerate_records(), 1);

        let untouched = clipper.place(5.0, 6.0, &mut report);
        assert_eq!(untouched, (5.0, 6.0));
        assert_eq!(report.degenerate_records(), 1);
    }

    #[test]
    fn clip_floors_pieces_that_collapse_after_remapping() {
        // ulp is 2^-13 just below 2^40 and 2^-12 just above it, so both
        // remapped ends round onto 2^40
        let far = (1u64 << 40) as f64;
        let set = removals(&[(1.0 / 16384.0, 1.0 / 8192.0)]);
        let record = Record::new("far", far, far + 1.0 / 4096.0);

        let (clipped, report) = RecordClipper::new(0.1).unwrap().clip(&record, &set);

        assert_eq!(report.degenerate_records(), 1);
        match clipped.as_slice() {
            [piece] => {
                assert_eq!(piece.start, far);
                assert!((piece.end - (far + 0.1)).abs() < 1e-3);
                assert_eq!(piece.text, "far");
            }
            other => panic!("expected 1 piece, got {other:?}"),
        }
    }

    #[test]
    fn clip_all_keeps_input_order() {
        let set = removals(&[(10.0, 15.0)]);
        let records = vec![
            Record::new("one", 1.0, 2.0),
            Record::new("two", 11.0, 12.0),
            Record::new("three", 9.0, 16.0),
            Record::new("bad", 20.0, 19.0),
            Record::new("four", 20.0, 21.0),
        ];

        let (clipped, report) = RecordClipper::default().clip_all(&records, &set);

        let texts: Vec<_> = clipped.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["one", "three", "three", "four"]);
        assert_eq!(spans(&clipped), [(1.0, 2.0), (9.0, 10.0), (10.0, 11.0), (15.0, 16.0)]);
        assert_eq!(report.invalid_intervals(), 1);
    }

    #[test]
    fn rejects_non_positive_minimum() {
        assert!(RecordClipper::new(0.0).is_err());
        assert!(RecordClipper::new(-0.1).is_err());
        assert!(RecordClipper::new(f64::INFINITY).is_err());
        assert_eq!(
            RecordClipper::from_config(&EditConfig::DEFAULT)
                .unwrap()
                .min_duration(),
            DEFAULT_MIN_RECORD_DURATION
        );
    }
}
