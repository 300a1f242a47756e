use crate::outcome::PatchOutcome;
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// One sweep of one rule over one directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run_id: Uuid,

    #[serde(default)]
    pub run: RunInfo,

    /// Name of the rule that was swept (e.g. "migrate").
    pub rule: String,

    /// The directory that was enumerated.
    pub root: Utf8PathBuf,

    /// True when no file was written (preview only).
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub results: Vec<FileReport>,

    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(tool: ToolInfo, rule: &str, root: Utf8PathBuf) -> Self {
        Self {
            schema: crate::schema::SCREENFIX_RUN_V1.to_string(),
            tool,
            run_id: Uuid::new_v4(),
            run: RunInfo {
                started_at: Some(Utc::now()),
                ended_at: None,
            },
            rule: rule.to_string(),
            root,
            dry_run: false,
            results: vec![],
            summary: RunSummary::default(),
        }
    }
}

/// Per-file record within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// File name within the swept directory.
    pub file: String,

    pub outcome: PatchOutcome,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Candidate files enumerated (extension matched).
    pub scanned: u64,

    /// Files rewritten by the sweep.
    pub updated: u64,

    /// Files that received the narrow legacy widening patch.
    pub patched_legacy: u64,

    /// Files left untouched (already patched, pattern or anchor absent).
    pub skipped: u64,
}
