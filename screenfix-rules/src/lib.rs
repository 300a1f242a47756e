//! Patch rules for wallet-balance injection.
//!
//! Each rule is a pure text transform: a set of detection predicates paired
//! with a transformation, applied to one file's content at a time. The sweep
//! engine in `screenfix-edit` owns all filesystem traffic; nothing in this
//! crate reads or writes a file.

mod migrate;
mod retrofit;

pub use migrate::{DEFAULT_API_IMPORT, MigrateRule};
pub use retrofit::RetrofitRule;

use screenfix_types::outcome::PatchOutcome;

pub trait PatchRule {
    fn name(&self) -> &'static str;
    fn apply(&self, content: &str) -> RulePass;
}

/// Result of running one rule against one file's content.
#[derive(Debug, Clone)]
pub struct RulePass {
    pub outcome: PatchOutcome,

    /// New content when the rule changed the file, `None` otherwise.
    pub content: Option<String>,
}

impl RulePass {
    pub fn changed(outcome: PatchOutcome, content: String) -> Self {
        Self {
            outcome,
            content: Some(content),
        }
    }

    pub fn unchanged(outcome: PatchOutcome) -> Self {
        Self {
            outcome,
            content: None,
        }
    }
}

/// Static metadata for the CLI's rule listing.
pub struct RuleMeta {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const RULE_REGISTRY: &[RuleMeta] = &[
    RuleMeta {
        name: "migrate",
        title: "Inject wallet balance fetching into a screen",
        description: "Adds the AsyncStorage/useFocusEffect/getWalletBalance imports, the \
                      balance state, the fetchBalance function with its focus-effect \
                      registration, and rewrites the 0.0 balance placeholder. Screens that \
                      already fetch the balance are skipped; screens with the old \
                      one-argument call are widened in place.",
    },
    RuleMeta {
        name: "retrofit",
        title: "Widen an existing fetchBalance call site",
        description: "Rewrites the one-argument getWalletBalance(mobile) call site to also \
                      pass the stored user id, and widens the guard to require both stored \
                      values.",
    },
];
