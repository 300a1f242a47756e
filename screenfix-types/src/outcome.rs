use serde::{Deserialize, Serialize};

/// Per-file outcome of applying a patch rule.
///
/// In screenfix terms:
/// - updated / fully_updated / patched_legacy: the file was rewritten
/// - already_patched / pattern_not_found / anchor_not_found: the file was
///   left byte-for-byte as found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOutcome {
    /// The call-site substitution matched and was rewritten (retrofit).
    Updated,
    /// The full balance block, imports, and display were injected (migrate).
    FullyUpdated,
    /// An old one-argument `fetchBalance` was widened in place.
    PatchedLegacy,
    /// Both idempotency markers present; nothing to do.
    AlreadyPatched,
    /// The substitution pattern did not occur in the file.
    PatternNotFound,
    /// None of the insertion anchors (or the structural fallback) matched.
    AnchorNotFound,
}

impl PatchOutcome {
    /// True when this outcome rewrote the file.
    pub fn is_change(self) -> bool {
        matches!(
            self,
            PatchOutcome::Updated | PatchOutcome::FullyUpdated | PatchOutcome::PatchedLegacy
        )
    }

    /// The per-file console line printed by the sweep subcommands.
    pub fn status_line(self, file: &str) -> String {
        match self {
            PatchOutcome::Updated => format!("Updated {file}"),
            PatchOutcome::FullyUpdated => format!("Fully Updated {file}"),
            PatchOutcome::PatchedLegacy => format!("Patched OLD fetchBalance in {file}"),
            PatchOutcome::AlreadyPatched => format!("Skipped {file} (Already updated)"),
            PatchOutcome::PatternNotFound => format!("Skipped {file} (Pattern not found)"),
            PatchOutcome::AnchorNotFound => format!("Skipped {file} (No insertion anchor)"),
        }
    }
}
