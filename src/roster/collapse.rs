//! Persisted expand/collapse preferences for group and account rows.
//!
//! Rows are identified by a string such as `alice@example.org//Work::Team`.
//! Only a SHA-256 hex digest of that string is stored, so arbitrary group
//! names round-trip through the `:`-joined settings value safely.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Where the collapse string lives between runs.
pub trait CollapsePersistence {
    fn load_collapsed(&self) -> String;
    fn save_collapsed(&mut self, value: &str);
}

pub fn stable_key(identity: &str) -> String {
    hex::encode(Sha256::digest(identity.as_bytes()))
}

#[derive(Debug, Clone, Default)]
pub struct CollapseStateStore {
    // Ordered so the serialized string is stable.
    collapsed: BTreeMap<String, bool>,
}

impl CollapseStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, identity: &str) -> bool {
        self.collapsed
            .get(&stable_key(identity))
            .copied()
            .unwrap_or(false)
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&mut self, identity: &str) -> bool {
        let flag = self.collapsed.entry(stable_key(identity)).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn collapsed_count(&self) -> usize {
        self.collapsed.values().filter(|c| **c).count()
    }

    pub fn serialize(&self) -> String {
        self.collapsed
            .iter()
            .filter(|(_, collapsed)| **collapsed)
            .map(|(key, _)| key.as_str())
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Replaces all state with the keys listed in `value`.
    pub fn deserialize(&mut self, value: &str) {
        self.collapsed = value
            .split(':')
            .filter(|key| !key.is_empty())
            .map(|key| (key.to_string(), true))
            .collect();
    }

    pub fn restore_from(&mut self, persistence: &dyn CollapsePersistence) {
        self.deserialize(&persistence.load_collapsed());
    }

    pub fn save_to(&self, persistence: &mut dyn CollapsePersistence) {
        persistence.save_collapsed(&self.serialize());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_key_is_sha256_hex() {
        assert_eq!(
            stable_key(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(stable_key("acct//groupA").len(), 64);
        assert_eq!(stable_key("acct//groupA"), stable_key("acct//groupA"));
    }

    #[test]
    fn test_defaults_to_expanded() {
        let store = CollapseStateStore::new();
        assert!(!store.is_collapsed("acct//groupA"));
        assert_eq!(store.serialize(), "");
    }

    #[test]
    fn test_toggle_flips() {
        let mut store = CollapseStateStore::new();
        assert!(store.toggle("acct"));
        assert!(store.is_collapsed("acct"));
        assert!(!store.toggle("acct"));
        assert!(!store.is_collapsed("acct"));
        assert_eq!(store.serialize(), "");
    }

    #[test]
    fn test_collapse_survives_serialization() {
        let mut store = CollapseStateStore::new();
        store.toggle("acct//groupA");
        store.toggle("other@x");
        store.toggle("acct//groupB");
        store.toggle("acct//groupB");

        assert_eq!(store.collapsed_count(), 2);

        let mut fresh = CollapseStateStore::new();
        fresh.deserialize(&store.serialize());
        assert!(fresh.is_collapsed("acct//groupA"));
        assert!(fresh.is_collapsed("other@x"));
        assert!(!fresh.is_collapsed("acct//groupB"));
        assert_eq!(fresh.serialize(), store.serialize());
    }

    #[test]
    fn test_deserialize_discards_prior_state_and_empty_tokens() {
        let mut store = CollapseStateStore::new();
        store.toggle("acct");
        store.deserialize(&format!("::{}:", stable_key("x")));
        assert!(!store.is_collapsed("acct"));
        assert!(store.is_collapsed("x"));
        assert_eq!(store.serialize(), stable_key("x"));
    }

    struct Memory(String);

    impl CollapsePersistence for Memory {
        fn load_collapsed(&self) -> String {
            self.0.clone()
        }

        fn save_collapsed(&mut self, value: &str) {
            self.0 = value.to_string();
        }
    }

    #[test]
    fn test_round_trip_through_persistence() {
        let mut settings = Memory(String::new());
        let mut store = CollapseStateStore::new();
        store.toggle("acct//Friends");
        store.save_to(&mut settings);

        let mut restored = CollapseStateStore::new();
        restored.restore_from(&settings);
        assert!(restored.is_collapsed("acct//Friends"));
    }
}
