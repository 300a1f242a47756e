//! Fixture tests for the full migration rule, covering each insertion step
//! and both idempotency paths.

use pretty_assertions::assert_eq;
use screenfix_rules::{DEFAULT_API_IMPORT, MigrateRule, PatchRule};
use screenfix_types::outcome::PatchOutcome;

const ASYNC_STORAGE_IMPORT: &str =
    "import AsyncStorage from '@react-native-async-storage/async-storage';";
const FOCUS_EFFECT_IMPORT: &str = "import { useFocusEffect } from '@react-navigation/native';";
const WALLET_IMPORT: &str = "import { getWalletBalance } from '../../api/auth';";

fn rule() -> MigrateRule {
    MigrateRule::new(DEFAULT_API_IMPORT).expect("construct migrate rule")
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// A screen that has never been touched: React import with `useState`,
/// the gameCode destructure, and the 0.0 balance placeholder.
fn unpatched_screen() -> &'static str {
    r#"import React, { useState, useEffect } from 'react';
import {
    View,
    Text,
    StyleSheet,
    TouchableOpacity,
} from 'react-native';

export default function OddEvenGame({ navigation, route }) {
  const { gameName, gameCode } = route.params;
  const [selected, setSelected] = useState(null);

  return (
    <View style={styles.container}>
      <View style={styles.balanceChip}>
        <Text style={styles.balanceText}>0.0</Text>
      </View>
      <Text style={styles.title}>{gameName}</Text>
      <Text style={styles.footerBalance}>0.0</Text>
    </View>
  );
}

const styles = StyleSheet.create({
  container: { flex: 1, backgroundColor: '#0d0d0d' },
  balanceChip: { borderRadius: 12, paddingHorizontal: 10 },
  balanceText: { color: '#fff', fontSize: 12, fontWeight: 'bold' },
  title: { color: '#ffb300', fontSize: 18 },
});
"#
}

#[test]
fn full_migration_injects_every_piece() {
    let pass = rule().apply(unpatched_screen());
    assert_eq!(pass.outcome, PatchOutcome::FullyUpdated);
    let content = pass.content.expect("rewritten content");

    // All four required names end up imported exactly once.
    assert_eq!(count(&content, ASYNC_STORAGE_IMPORT), 1);
    assert_eq!(count(&content, FOCUS_EFFECT_IMPORT), 1);
    assert_eq!(count(&content, WALLET_IMPORT), 1);
    assert_eq!(
        count(&content, "import React, { useState, useCallback, useEffect }"),
        1
    );

    // New imports sit immediately above the React import.
    let react_at = content.find("import React,").expect("react import");
    for import in [ASYNC_STORAGE_IMPORT, FOCUS_EFFECT_IMPORT, WALLET_IMPORT] {
        assert!(content.find(import).expect("injected import") < react_at);
    }

    // The block lands directly under the destructure anchor.
    assert!(content.contains(
        "const { gameName, gameCode } = route.params;\n  const [balance, setBalance] = useState(0.0);"
    ));
    assert!(content.contains("const fetchBalance = async () => {"));
    assert!(content.contains("useFocusEffect(\n    useCallback(() => {\n      fetchBalance();"));

    // Every placeholder display is rewritten, none left behind.
    assert_eq!(count(&content, ">0.0</Text>"), 0);
    assert_eq!(count(&content, ">{balance.toFixed(1)}</Text>"), 2);
}

#[test]
fn migration_is_a_no_op_the_second_time() {
    let first = rule().apply(unpatched_screen());
    let content = first.content.expect("rewritten content");

    let second = rule().apply(&content);
    assert_eq!(second.outcome, PatchOutcome::AlreadyPatched);
    assert!(second.content.is_none());
}

#[test]
fn game_type_anchor_and_group_open_hook_injection() {
    let screen = r#"import React, { useEffect } from 'react';
import { View, Text } from 'react-native';

export default function JodiBulkGame({ navigation, route }) {
  const { gameName, gameType } = route.params;
  return (
    <Text>{gameName}</Text>
  );
}
"#;

    let pass = rule().apply(screen);
    assert_eq!(pass.outcome, PatchOutcome::FullyUpdated);
    let content = pass.content.expect("rewritten content");

    // No useState sibling: both hooks are added at the group's opening brace.
    assert!(content.contains("import React, { useState, useCallback, useEffect } from 'react';"));
    assert!(content.contains(
        "const { gameName, gameType } = route.params;\n  const [balance, setBalance] = useState(0.0);"
    ));
}

#[test]
fn bare_game_name_anchor_is_the_last_resort_destructure() {
    let screen = r#"import React, { useState } from 'react';

export default function TimeTableScreen({ navigation, route }) {
  const { gameName } = route.params;
  return null;
}
"#;

    let pass = rule().apply(screen);
    assert_eq!(pass.outcome, PatchOutcome::FullyUpdated);
    let content = pass.content.expect("rewritten content");
    assert!(content.contains(
        "const { gameName } = route.params;\n  const [balance, setBalance] = useState(0.0);"
    ));
}

#[test]
fn component_declaration_is_the_structural_fallback() {
    let screen = r#"import React, { useState } from 'react';

export default function FundsScreen({ navigation, route }) {
  const [amount, setAmount] = useState('');
  return null;
}
"#;

    let pass = rule().apply(screen);
    assert_eq!(pass.outcome, PatchOutcome::FullyUpdated);
    let content = pass.content.expect("rewritten content");
    assert!(content.contains(
        "export default function FundsScreen({ navigation, route }) {\n  const [balance, setBalance] = useState(0.0);"
    ));
}

#[test]
fn screen_without_any_anchor_is_left_untouched() {
    let screen = r#"import React, { useState } from 'react';

const ChartScreen = ({ navigation }) => {
  return null;
};

export default ChartScreen;
"#;

    let pass = rule().apply(screen);
    assert_eq!(pass.outcome, PatchOutcome::AnchorNotFound);
    assert!(pass.content.is_none());
}

#[test]
fn screen_without_react_import_uses_the_first_import_as_anchor() {
    let screen = r#"import { View, Text } from 'react-native';

export default function HowToPlayScreen({ navigation, route }) {
  const { gameName } = route.params;
  return null;
}
"#;

    let pass = rule().apply(screen);
    assert_eq!(pass.outcome, PatchOutcome::FullyUpdated);
    let content = pass.content.expect("rewritten content");

    assert_eq!(count(&content, ASYNC_STORAGE_IMPORT), 1);
    assert_eq!(count(&content, FOCUS_EFFECT_IMPORT), 1);
    assert_eq!(count(&content, WALLET_IMPORT), 1);
    let native_at = content.find("import { View, Text }").expect("native import");
    assert!(content.find(ASYNC_STORAGE_IMPORT).expect("injected") < native_at);
}

#[test]
fn legacy_call_site_gets_the_narrow_widening_patch() {
    let screen = r#"import React, { useState, useCallback } from 'react';
import AsyncStorage from '@react-native-async-storage/async-storage';
import { useFocusEffect } from '@react-navigation/native';
import { getWalletBalance } from '../../api/auth';

export default function JodiGame({ navigation, route }) {
  const { gameName } = route.params;
  const [balance, setBalance] = useState(0.0);

  const fetchBalance = async () => {
    try {
      const mobile = await AsyncStorage.getItem('userMobile');
      if (mobile) {
        const response = await getWalletBalance(mobile);
        if (response && response.status === true) {
          setBalance(parseFloat(response.balance));
        }
      }
    } catch (error) {
      console.error('Error fetching balance:', error);
    }
  };

  const submitBid = async () => {
    const userId = await AsyncStorage.getItem('userId');
    console.log('placing bid for', userId);
  };

  useFocusEffect(
    useCallback(() => {
      fetchBalance();
    }, [])
  );

  return null;
}
"#;

    let pass = rule().apply(screen);
    assert_eq!(pass.outcome, PatchOutcome::PatchedLegacy);
    let content = pass.content.expect("rewritten content");

    assert!(content.contains("getWalletBalance(mobile, userId)"));
    assert!(!content.contains("getWalletBalance(mobile)"));
    assert!(content.contains(
        "const userId = await AsyncStorage.getItem('userId');\n      if (mobile && userId) {"
    ));

    // Widening once is enough.
    let second = rule().apply(&content);
    assert_eq!(second.outcome, PatchOutcome::AlreadyPatched);
    assert!(second.content.is_none());
}

#[test]
fn migrated_screen_is_recognized_by_its_markers() {
    let first = rule().apply(unpatched_screen());
    let migrated = first.content.expect("rewritten content");
    assert!(migrated.contains("getWalletBalance"));
    assert!(migrated.contains("userId"));

    let pass = rule().apply(&migrated);
    assert_eq!(pass.outcome, PatchOutcome::AlreadyPatched);
}

#[test]
fn api_import_path_is_configurable() {
    let rule = MigrateRule::new("../api/auth").expect("construct migrate rule");
    let pass = rule.apply(unpatched_screen());
    let content = pass.content.expect("rewritten content");
    assert!(content.contains("import { getWalletBalance } from '../api/auth';"));
    assert!(!content.contains(WALLET_IMPORT));
}
