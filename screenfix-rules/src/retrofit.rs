use crate::{PatchRule, RulePass};
use anyhow::Context;
use regex::{NoExpand, Regex};
use screenfix_types::outcome::PatchOutcome;
use std::borrow::Cow;

/// The pre-userId fetch sequence: mobile lookup, single-value guard,
/// one-argument call, strict-boolean status check. Whitespace between the
/// statements is tolerated so that screens with different indentation depths
/// all match.
const CALL_SITE_PATTERN: &str = r"const mobile = await AsyncStorage\.getItem\('userMobile'\);\s+if \(mobile\) \{\s+const response = await getWalletBalance\(mobile\);\s+if \(response && response\.status === true\) \{";

const CALL_SITE_REPLACEMENT: &str = "const mobile = await AsyncStorage.getItem('userMobile');\n      const userId = await AsyncStorage.getItem('userId');\n      if (mobile && userId) {\n        const response = await getWalletBalance(mobile, userId);\n        if (response && (response.status === true || response.status === 'true')) {";

/// Single-substitution rule: rewrite the old one-argument balance fetch to
/// the two-argument form.
pub struct RetrofitRule {
    pattern: Regex,
}

impl RetrofitRule {
    pub fn new() -> anyhow::Result<Self> {
        let pattern = Regex::new(CALL_SITE_PATTERN).context("compile call-site pattern")?;
        Ok(Self { pattern })
    }
}

impl PatchRule for RetrofitRule {
    fn name(&self) -> &'static str {
        "retrofit"
    }

    fn apply(&self, content: &str) -> RulePass {
        match self
            .pattern
            .replace_all(content, NoExpand(CALL_SITE_REPLACEMENT))
        {
            Cow::Borrowed(_) => RulePass::unchanged(PatchOutcome::PatternNotFound),
            Cow::Owned(new) => RulePass::changed(PatchOutcome::Updated, new),
        }
    }
}
