//! Rendering helpers (markdown) for human-readable artifacts.

use screenfix_types::outcome::PatchOutcome;
use screenfix_types::report::RunReport;

pub fn render_run_md(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("# screenfix {}\n\n", report.rule));
    if report.dry_run {
        out.push_str("_Dry run: no files were written._\n\n");
    }
    out.push_str(&format!("- Directory: `{}`\n", report.root));
    out.push_str(&format!(
        "- Scanned: {}\n- Updated: {}\n- Patched legacy: {}\n- Skipped: {}\n\n",
        report.summary.scanned,
        report.summary.updated,
        report.summary.patched_legacy,
        report.summary.skipped
    ));

    out.push_str("## Files\n\n");
    if report.results.is_empty() {
        out.push_str("_No candidate files._\n");
        return out;
    }

    for (i, r) in report.results.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, r.file));
        out.push_str(&format!("- Outcome: `{}`\n", outcome_label(r.outcome)));
        if let Some(msg) = &r.message {
            out.push_str(&format!("- Message: {}\n", msg));
        }
        if let (Some(before), Some(after)) = (&r.sha256_before, &r.sha256_after) {
            out.push_str(&format!("- `{}` {} → {}\n", r.file, before, after));
        }
        out.push('\n');
    }

    out
}

fn outcome_label(outcome: PatchOutcome) -> &'static str {
    match outcome {
        PatchOutcome::Updated => "updated",
        PatchOutcome::FullyUpdated => "fully_updated",
        PatchOutcome::PatchedLegacy => "patched_legacy",
        PatchOutcome::AlreadyPatched => "already_patched",
        PatchOutcome::PatternNotFound => "pattern_not_found",
        PatchOutcome::AnchorNotFound => "anchor_not_found",
    }
}
