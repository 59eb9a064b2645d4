//! End-to-end editing runs and timeline properties over fixed fixtures.

use cleancut_timeline::{
    EditConfig, EditPlan, IntervalMerger, LabeledInterval, Record, RecordClipper, RemovalSet,
    TimestampRemapper, invert, remap,
};
use std::sync::Once;

const EPS: f64 = 1e-6;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// Detection families covering touching, nested, unsorted and out-of-range input.
fn fixtures() -> Vec<(Vec<LabeledInterval>, f64)> {
    let bare = |pairs: &[(f64, f64)]| -> Vec<LabeledInterval> {
        pairs.iter().map(|&(s, e)| LabeledInterval::new(s, e)).collect()
    };

    vec![
        (bare(&[]), 30.0),
        (bare(&[(10.0, 12.0), (12.3, 13.0)]), 60.0),
        (bare(&[(10.0, 15.0), (20.0, 25.0)]), 100.0),
        (bare(&[(5.0, 6.0), (1.0, 2.0), (2.0, 3.0), (1.5, 2.5)]), 10.0),
        (bare(&[(0.0, 0.4), (0.9, 1.1), (58.0, 65.0)]), 60.0),
        (bare(&[(3.0, 40.0), (4.0, 5.0), (39.9, 41.0)]), 120.0),
        (bare(&[(0.0, 10.0)]), 10.0),
        (bare(&[(-2.0, 1.0), (4.0, 3.0), (7.25, 7.5)]), 9.0),
        (
            (0..50)
                .map(|i| LabeledInterval::new(i as f64 * 1.3, i as f64 * 1.3 + 0.45))
                .collect(),
            70.0,
        ),
    ]
}

#[test]
fn merging_twice_changes_nothing() {
    for config in [EditConfig::DEFAULT, EditConfig::SPEECH, EditConfig::CAPTIONS] {
        let merger = IntervalMerger::from_config(&config).unwrap();

        for (detections, _) in fixtures() {
            let (once, _) = merger.merge(detections);
            assert_eq!(merger.remerge(&once), once);
        }
    }
}

#[test]
fn keep_and_removals_cover_the_timeline() {
    for (detections, duration) in fixtures() {
        let plan = EditPlan::build(detections, duration, &EditConfig::SPEECH).unwrap();
        let stats = plan.stats();

        let total = stats.kept_duration + stats.removed_duration;
        assert!(
            (total - duration).abs() < EPS,
            "kept {} + removed {} != {duration}",
            stats.kept_duration,
            stats.removed_duration
        );
    }
}

#[test]
fn every_point_is_kept_or_removed_exactly_once() {
    for (detections, duration) in fixtures() {
        let plan = EditPlan::build(detections, duration, &EditConfig::DEFAULT).unwrap();

        let mut t = 0.0;
        while t < duration {
            let kept = plan.keep().iter().filter(|i| i.contains(t)).count();
            let removed = usize::from(plan.removals().contains(t));
            assert_eq!(kept + removed, 1, "t = {t}");
            t += 0.05;
        }
    }
}

#[test]
fn remap_is_monotone() {
    for (detections, duration) in fixtures() {
        let plan = EditPlan::build(detections, duration, &EditConfig::DEFAULT).unwrap();

        let mut previous = plan.remap(0.0);
        let mut t = 0.0;
        while t <= duration {
            let mapped = plan.remap(t);
            assert!(mapped >= previous, "remap({t}) = {mapped} < {previous}");
            assert!(mapped >= 0.0);
            previous = mapped;
            t += 0.01;
        }
    }
}

#[test]
fn keep_intervals_land_back_to_back() {
    for (detections, duration) in fixtures() {
        let plan = EditPlan::build(detections, duration, &EditConfig::DEFAULT).unwrap();

        for placement in plan.keep().placements() {
            let mapped = plan.remap(placement.source.start());
            assert!(
                (mapped - placement.edited_start).abs() < EPS,
                "{} starts at {mapped}, expected {}",
                placement.source,
                placement.edited_start
            );
        }
    }
}

#[test]
fn scan_and_prebuilt_remap_agree() {
    for (detections, duration) in fixtures() {
        let (removals, _) = IntervalMerger::new(0.5).unwrap().merge(detections);
        let remapper = TimestampRemapper::new(&removals);

        let mut t = 0.0;
        while t <= duration {
            assert!((remap(t, &removals) - remapper.remap(t)).abs() < EPS);
            t += 0.07;
        }
    }
}

#[test]
fn clip_is_identity_without_removals() {
    let removals = RemovalSet::default();
    let records = [
        Record::new("one", 0.0, 1.5),
        Record::new("two", 1.5, 4.25),
        Record::new("three", 100.0, 103.0),
    ];

    let (clipped, report) = RecordClipper::default().clip_all(&records, &removals);

    assert_eq!(clipped, records);
    assert!(report.is_clean());
}

#[test]
fn clip_empties_only_contained_records() {
    let (removals, _) = IntervalMerger::new(0.0)
        .unwrap()
        .merge([(10.0, 15.0), (20.0, 25.0)].map(|(s, e)| LabeledInterval::new(s, e)));
    let clipper = RecordClipper::default();

    for (start, end) in [
        (10.0, 15.0),
        (11.0, 14.0),
        (20.0, 21.0),
        (9.0, 11.0),
        (14.0, 16.0),
        (12.0, 22.0),
        (15.0, 20.0),
        (1.0, 30.0),
    ] {
        let record = Record::new("cue", start, end);
        let (clipped, _) = clipper.clip(&record, &removals);

        let contained = removals.covers(&record.interval().unwrap());
        assert_eq!(clipped.is_empty(), contained, "({start}, {end})");
    }
}

#[test]
fn clipped_records_stay_inside_the_edited_timeline() {
    init_tracing();

    let detections: Vec<_> = (0..20)
        .map(|i| LabeledInterval::labeled(i as f64 * 5.0 + 1.0, i as f64 * 5.0 + 2.5, "filler"))
        .collect();
    let plan = EditPlan::build(detections, 100.0, &EditConfig::CAPTIONS).unwrap();
    let edited = plan.keep().edited_duration();

    let records: Vec<_> = (0..50)
        .map(|i| Record::new(format!("cue {i}"), i as f64 * 2.0, i as f64 * 2.0 + 1.8))
        .collect();
    let (clipped, _) = plan.clip_all(&records);

    assert!(!clipped.is_empty());
    for record in &clipped {
        assert!(record.start >= 0.0);
        assert!(record.end > record.start);
        assert!(record.end <= edited + EPS, "{record:?} past {edited}");
    }
}

#[test]
fn merges_inverts_and_clips_end_to_end() {
    init_tracing();

    let plan = EditPlan::build(
        [(10.0, 12.0), (12.3, 15.0), (20.0, 25.0)].map(|(s, e)| LabeledInterval::new(s, e)),
        100.0,
        &EditConfig::DEFAULT,
    )
    .unwrap();

    let removals: Vec<_> = plan.removals().intervals().map(|i| (i.start(), i.end())).collect();
    assert_eq!(removals, [(10.0, 15.0), (20.0, 25.0)]);

    let (keep, report) = invert(plan.removals(), 100.0).unwrap();
    assert_eq!(&keep, plan.keep());
    assert!(report.is_clean());

    let (clipped, _) = plan.clip(&Record::new("hi", 12.0, 22.0));
    assert_eq!(clipped, [Record::new("hi", 10.0, 15.0)]);

    let (untouched, _) = plan.clip(&Record::new("x", 5.0, 8.0));
    assert_eq!(untouched, [Record::new("x", 5.0, 8.0)]);
}

#[test]
fn plan_is_shareable_across_threads() {
    let plan = EditPlan::build(
        [(10.0, 15.0)].map(|(s, e)| LabeledInterval::new(s, e)),
        60.0,
        &EditConfig::DEFAULT,
    )
    .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let plan = &plan;
                scope.spawn(move || plan.remap(20.0 + i as f64))
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let mapped = handle.join().unwrap();
            assert!((mapped - (15.0 + i as f64)).abs() < EPS);
        }
    });
}
