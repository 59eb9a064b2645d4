//! Resynchronize SRT captions with an edit plan.

use crate::error::Result;
use crate::srt;
use cleancut_timeline::{EditPlan, Report};
use eyre::Context;
use std::path::Path;

/// Clip and remap every cue of `content` against `plan`.
///
/// Cues falling entirely inside a removal disappear, cues spanning one are
/// split, and the survivors are renumbered from 1. Cues that collapse once
/// rounded to whole milliseconds are written one millisecond long and
/// reported.
pub fn retime_srt(content: &str, plan: &EditPlan) -> Result<(String, Report)> {
    let records = srt::parse_srt(content)?;
    let (clipped, mut report) = plan.clip_all(&records);
    report.extend(srt::collapsed_cues(&clipped));

    tracing::debug!(
        before = records.len(),
        after = clipped.len(),
        diagnostics = report.len(),
        "retimed captions"
    );

    Ok((srt::render_srt(&clipped), report))
}

/// Retime the SRT file at `input` and write the result to `output`.
pub fn retime_srt_file(input: &Path, output: &Path, plan: &EditPlan) -> eyre::Result<Report> {
    tracing::info!(
        input = ?input.display(),
        output = ?output.display(),
        "retiming captions"
    );

    let content = std::fs::read_to_string(input)
        .wrap_err_with(|| format!("failed to read srt: {:?}", input.display()))?;

    let (retimed, report) = retime_srt(&content, plan)
        .wrap_err_with(|| format!("failed to retime srt: {:?}", input.display()))?;

    std::fs::write(output, retimed)
        .wrap_err_with(|| format!("failed to write srt: {:?}", output.display()))?;

    if !report.is_clean() {
        tracing::warn!(diagnostics = report.len(), "captions retimed with corrections");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleancut_timeline::{EditConfig, LabeledInterval};

    #[test]
    fn drops_cues_inside_removals() {
        let plan = EditPlan::build(
            vec![LabeledInterval::labeled(10.0, 15.0, "darn")],
            100.0,
            &EditConfig::DEFAULT,
        )
        .unwrap();
        let content = "1
00:00:11,000 --> 00:00:14,000
darn it
";

        let (retimed, report) = retime_srt(content, &plan).unwrap();

        assert!(retimed.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn rejects_malformed_srt() {
        let plan = EditPlan::build(Vec::new(), 10.0, &EditConfig::DEFAULT).unwrap();

        assert!(retime_srt("1\nnot a timestamp\ntext\n", &plan).is_err());
    }
}
