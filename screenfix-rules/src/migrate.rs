use crate::{PatchRule, RulePass};
use anyhow::Context;
use regex::{Captures, Regex};
use screenfix_types::outcome::PatchOutcome;

/// Idempotency markers: both present means the screen already fetches the
/// balance with the stored user id.
const CALL_MARKER: &str = "getWalletBalance";
const USER_ID_MARKER: &str = "userId";

/// The pre-userId call shape targeted by the narrow legacy widening.
const LEGACY_CALL: &str = "getWalletBalance(mobile)";
const WIDENED_CALL: &str = "getWalletBalance(mobile, userId)";
const LEGACY_GUARD: &str = "if (mobile) {";
const WIDENED_GUARD: &str =
    "const userId = await AsyncStorage.getItem('userId');\n      if (mobile && userId) {";

const ASYNC_STORAGE_IMPORT: &str =
    "import AsyncStorage from '@react-native-async-storage/async-storage';";
const FOCUS_EFFECT_IMPORT: &str = "import { useFocusEffect } from '@react-navigation/native';";

/// New imports land immediately before the React import; a screen without one
/// gets them before its first import line instead.
const REACT_IMPORT_ANCHOR: &str = "import React,";
const IMPORT_FALLBACK_ANCHOR: &str = "import ";

/// Opening delimiter of the React named-import group, for hook injection when
/// `useState` is not already imported.
const REACT_GROUP_OPEN: &str = "import React, {";

const DISPLAY_PLACEHOLDER: &str = ">0.0</Text>";
const DISPLAY_VALUE: &str = ">{balance.toFixed(1)}</Text>";

/// Insertion anchors for the balance block, tried in order.
const DESTRUCTURE_ANCHORS: [&str; 3] = [
    "const { gameName, gameCode } = route.params;",
    "const { gameName, gameType } = route.params;",
    "const { gameName } = route.params;",
];

/// Structural fallback anchor: the screen component's declaration line.
const COMPONENT_DECL_PATTERN: &str =
    r"export default function (\w+)\(\{ navigation, route \}\) \{";

pub const DEFAULT_API_IMPORT: &str = "../../api/auth";

const BALANCE_BLOCK: &str = r#"  const [balance, setBalance] = useState(0.0);

  const fetchBalance = async () => {
    try {
      const mobile = await AsyncStorage.getItem('userMobile');
      const userId = await AsyncStorage.getItem('userId');
      if (mobile && userId) {
        const response = await getWalletBalance(mobile, userId);
        if (response && (response.status === true || response.status === 'true')) {
          setBalance(parseFloat(response.balance));
        }
      }
    } catch (error) {
      console.error('Error fetching balance:', error);
    }
  };

  useFocusEffect(
    useCallback(() => {
      fetchBalance();
    }, [])
  );

"#;

/// Multi-step conditional insertion rule: make a screen fetch and display the
/// wallet balance on focus.
pub struct MigrateRule {
    component_decl: Regex,
    wallet_import: String,
}

impl MigrateRule {
    pub fn new(api_import: &str) -> anyhow::Result<Self> {
        let component_decl =
            Regex::new(COMPONENT_DECL_PATTERN).context("compile component declaration pattern")?;
        Ok(Self {
            component_decl,
            wallet_import: format!("import {{ getWalletBalance }} from '{api_import}';"),
        })
    }

    fn is_migrated(content: &str) -> bool {
        content.contains(CALL_MARKER) && content.contains(USER_ID_MARKER)
    }

    /// Narrow two-part patch for screens carrying the old one-argument
    /// `fetchBalance`: widen the call and the guard, leave the rest alone.
    fn widen_legacy(content: &str) -> String {
        content
            .replace(LEGACY_CALL, WIDENED_CALL)
            .replace(LEGACY_GUARD, WIDENED_GUARD)
    }

    fn inject_import(content: String, import: &str) -> String {
        if content.contains(import) {
            return content;
        }
        let anchor = content
            .find(REACT_IMPORT_ANCHOR)
            .or_else(|| content.find(IMPORT_FALLBACK_ANCHOR));
        match anchor {
            Some(at) => {
                let mut out = String::with_capacity(content.len() + import.len() + 1);
                out.push_str(&content[..at]);
                out.push_str(import);
                out.push('\n');
                out.push_str(&content[at..]);
                out
            }
            None => content,
        }
    }

    /// Ensure `useCallback` is imported: append after the `useState` sibling
    /// when present, otherwise open the React import group and add both.
    fn inject_hook(content: String) -> String {
        if content.contains("useCallback") {
            return content;
        }
        if content.contains("useState") {
            return content.replacen("useState", "useState, useCallback", 1);
        }
        content.replacen(
            REACT_GROUP_OPEN,
            "import React, { useState, useCallback,",
            1,
        )
    }

    fn inject_block(&self, content: &str) -> Option<String> {
        for anchor in DESTRUCTURE_ANCHORS {
            if let Some(at) = content.find(anchor) {
                let end = at + anchor.len();
                let mut out =
                    String::with_capacity(content.len() + BALANCE_BLOCK.len() + 1);
                out.push_str(&content[..end]);
                out.push('\n');
                out.push_str(BALANCE_BLOCK);
                out.push_str(&content[end..]);
                return Some(out);
            }
        }
        if self.component_decl.is_match(content) {
            let out = self
                .component_decl
                .replacen(content, 1, |caps: &Captures| {
                    format!("{}\n{}", &caps[0], BALANCE_BLOCK)
                });
            return Some(out.into_owned());
        }
        None
    }
}

impl PatchRule for MigrateRule {
    fn name(&self) -> &'static str {
        "migrate"
    }

    fn apply(&self, content: &str) -> RulePass {
        if Self::is_migrated(content) {
            if content.contains(LEGACY_CALL) {
                return RulePass::changed(PatchOutcome::PatchedLegacy, Self::widen_legacy(content));
            }
            return RulePass::unchanged(PatchOutcome::AlreadyPatched);
        }

        let mut next = content.to_string();
        next = Self::inject_import(next, ASYNC_STORAGE_IMPORT);
        next = Self::inject_import(next, FOCUS_EFFECT_IMPORT);
        next = Self::inject_import(next, &self.wallet_import);
        next = Self::inject_hook(next);

        // All edits to a screen commit together: a screen offering no
        // insertion point is reported and left exactly as found.
        next = match self.inject_block(&next) {
            Some(with_block) => with_block,
            None => return RulePass::unchanged(PatchOutcome::AnchorNotFound),
        };

        next = next.replace(DISPLAY_PLACEHOLDER, DISPLAY_VALUE);

        if next == content {
            return RulePass::unchanged(PatchOutcome::AlreadyPatched);
        }
        RulePass::changed(PatchOutcome::FullyUpdated, next)
    }
}
