//! Sweep engine for screenfix rules.
//!
//! Responsibilities:
//! - Enumerate the screens directory (immediate entries only, sorted).
//! - Apply one rule per candidate file, writing back only when the content
//!   changed and the sweep is not a dry run.
//! - Record per-file outcomes with sha256 before/after in a [`RunReport`].
//! - Accumulate a unified diff preview of every rewrite.

mod error;

pub use error::{SweepError, SweepResult};

use anyhow::Context;
use camino::Utf8PathBuf;
use chrono::Utc;
use diffy::PatchFormatter;
use fs_err as fs;
use screenfix_rules::PatchRule;
use screenfix_types::outcome::PatchOutcome;
use screenfix_types::report::{FileReport, RunReport, ToolInfo};
use sha2::{Digest, Sha256};
use tracing::debug;

pub const DEFAULT_EXTENSION: &str = ".js";

/// Explicit sweep configuration: no hard-coded directory, no ambient state.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub screens_dir: Utf8PathBuf,
    pub extension: String,
    pub dry_run: bool,
}

impl SweepConfig {
    pub fn new(screens_dir: Utf8PathBuf) -> Self {
        Self {
            screens_dir,
            extension: DEFAULT_EXTENSION.to_string(),
            dry_run: false,
        }
    }
}

/// A completed sweep: the structured report plus the accumulated diff.
#[derive(Debug)]
pub struct SweepOutcome {
    pub report: RunReport,
    pub patch: String,
}

/// Run one rule over every candidate file in the screens directory.
///
/// Files whose name does not end in the configured extension are never
/// opened. One file is fully read, transformed, and written before the next
/// is considered; an I/O failure stops the sweep at the failing file.
pub fn sweep(
    config: &SweepConfig,
    rule: &dyn PatchRule,
    tool: ToolInfo,
) -> SweepResult<SweepOutcome> {
    if !config.screens_dir.exists() {
        return Err(SweepError::MissingDir {
            path: config.screens_dir.clone(),
        });
    }
    if !config.screens_dir.is_dir() {
        return Err(SweepError::NotADirectory {
            path: config.screens_dir.clone(),
        });
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(&config.screens_dir)
        .with_context(|| format!("read directory {}", config.screens_dir))?
    {
        let entry = entry.context("read directory entry")?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !entry.path().is_file() {
            debug!(name = %name, "skipping non-file entry");
            continue;
        }
        if !name.ends_with(&config.extension) {
            debug!(name = %name, "skipping non-candidate extension");
            continue;
        }
        candidates.push(name);
    }

    // Deterministic order matters.
    candidates.sort();

    let mut report = RunReport::new(tool, rule.name(), config.screens_dir.clone());
    report.dry_run = config.dry_run;

    let mut patch = String::new();
    let formatter = PatchFormatter::new();

    for name in candidates {
        let path = config.screens_dir.join(&name);
        let before = fs::read_to_string(&path).with_context(|| format!("read {}", path))?;

        let pass = rule.apply(&before);
        report.summary.scanned += 1;

        let mut file_report = FileReport {
            file: name.clone(),
            outcome: pass.outcome,
            message: None,
            sha256_before: Some(sha256_hex(before.as_bytes())),
            sha256_after: None,
        };

        match pass.content {
            Some(after) => {
                file_report.sha256_after = Some(sha256_hex(after.as_bytes()));
                append_diff(&mut patch, &formatter, &name, &before, &after);

                if !config.dry_run {
                    fs::write(&path, &after).with_context(|| format!("write {}", path))?;
                }

                match pass.outcome {
                    PatchOutcome::PatchedLegacy => report.summary.patched_legacy += 1,
                    _ => report.summary.updated += 1,
                }
            }
            None => {
                if pass.outcome == PatchOutcome::AnchorNotFound {
                    file_report.message =
                        Some("no insertion anchor; file left unmodified".to_string());
                }
                report.summary.skipped += 1;
            }
        }

        report.results.push(file_report);
    }

    report.run.ended_at = Some(Utc::now());
    Ok(SweepOutcome { report, patch })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn append_diff(
    out: &mut String,
    formatter: &PatchFormatter,
    name: &str,
    before: &str,
    after: &str,
) {
    out.push_str(&format!("diff --git a/{0} b/{0}\n", name));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", name));

    let patch = diffy::create_patch(before, after);
    out.push_str(&formatter.fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }
}
