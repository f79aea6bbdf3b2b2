//! Nested group tree built from delimited group names.
//!
//! A peer in group `Work::Team` with delimiter `::` lands in the `Team` node
//! under `Work`. The tree borrows peers from a registry snapshot and lives for
//! exactly one rebuild.

use std::collections::{BTreeMap, BTreeSet};

use crate::registry::Peer;

#[derive(Debug, Default)]
pub struct Group<'a> {
    name: String,
    full_name: String,
    peers: Vec<&'a Peer>,
    // BTreeMap keeps sibling groups in name order
    groups: BTreeMap<String, Group<'a>>,
}

impl<'a> Group<'a> {
    /// The unnamed root that holds ungrouped peers.
    pub fn top_level() -> Self {
        Self::default()
    }

    fn child(name: &str, full_name: String) -> Self {
        Self {
            name: name.to_string(),
            full_name,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// Member peers in insertion order.
    pub fn peers(&self) -> &[&'a Peer] {
        &self.peers
    }

    /// Child groups, ordered by name.
    pub fn groups(&self) -> impl Iterator<Item = &Group<'a>> {
        self.groups.values()
    }

    #[cfg(test)]
    pub fn group(&self, name: &str) -> Option<&Group<'a>> {
        self.groups.get(name)
    }

    /// Files `peer` under every group it belongs to, creating intermediate
    /// nodes along the way. Peers without groups stay on this node. Names
    /// that reduce to the same path file the peer only once.
    pub fn insert(&mut self, peer: &'a Peer, delimiter: &str) {
        let mut paths: BTreeSet<Vec<&str>> = peer
            .groups
            .iter()
            .map(|name| split_group_name(name, delimiter))
            .collect();
        if paths.is_empty() {
            paths.insert(Vec::new());
        }

        for segments in paths {
            let mut node = &mut *self;
            for segment in segments {
                let full_name = if node.is_root() {
                    segment.to_string()
                } else {
                    format!("{}{}{}", node.full_name, delimiter, segment)
                };
                node = node
                    .groups
                    .entry(segment.to_string())
                    .or_insert_with(|| Group::child(segment, full_name));
            }
            node.peers.push(peer);
        }
    }
}

fn split_group_name<'s>(name: &'s str, delimiter: &str) -> Vec<&'s str> {
    if delimiter.is_empty() {
        return if name.is_empty() { vec![] } else { vec![name] };
    }
    name.split(delimiter).filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AccountId;

    fn peer(jid: &str, groups: &[&str]) -> Peer {
        let mut p = Peer::new(jid, AccountId::from("acct"));
        p.set_groups(groups.iter().copied());
        p
    }

    #[test]
    fn test_ungrouped_peers_stay_on_root() {
        let a = peer("a@x", &[]);
        let mut root = Group::top_level();
        root.insert(&a, "::");
        assert_eq!(root.peers().len(), 1);
        assert_eq!(root.groups().count(), 0);
    }

    #[test]
    fn test_nested_groups_follow_delimiter() {
        let a = peer("a@x", &["Work::Team", "Friends"]);
        let b = peer("b@x", &["Work"]);
        let mut root = Group::top_level();
        root.insert(&a, "::");
        root.insert(&b, "::");

        let names: Vec<_> = root.groups().map(|g| g.name()).collect();
        assert_eq!(names, vec!["Friends", "Work"]);

        let work = root.group("Work").unwrap();
        assert_eq!(work.peers().len(), 1);
        let team = work.group("Team").unwrap();
        assert_eq!(team.full_name(), "Work::Team");
        assert_eq!(team.peers()[0].jid, "a@x");
    }

    #[test]
    fn test_empty_delimiter_keeps_whole_name() {
        let a = peer("a@x", &["Work::Team"]);
        let mut root = Group::top_level();
        root.insert(&a, "");
        assert_eq!(root.group("Work::Team").unwrap().peers().len(), 1);
    }

    #[test]
    fn test_delimiter_only_name_falls_back_to_root() {
        let a = peer("a@x", &["::"]);
        let mut root = Group::top_level();
        root.insert(&a, "::");
        assert_eq!(root.peers().len(), 1);
    }

    #[test]
    fn test_equivalent_group_names_file_peer_once() {
        let a = peer("a@x", &["Work", "Work::", "::Work"]);
        let mut root = Group::top_level();
        root.insert(&a, "::");
        assert!(root.peers().is_empty());
        assert_eq!(root.groups().count(), 1);
        assert_eq!(root.group("Work").unwrap().peers().len(), 1);
    }

    #[test]
    fn test_delimiter_only_names_share_the_root() {
        let a = peer("a@x", &["::", "Work"]);
        let b = peer("b@x", &["::", "::::"]);
        let mut root = Group::top_level();
        root.insert(&a, "::");
        root.insert(&b, "::");
        let on_root: Vec<_> = root.peers().iter().map(|p| p.jid.as_str()).collect();
        assert_eq!(on_root, vec!["a@x", "b@x"]);
        assert_eq!(root.group("Work").unwrap().peers().len(), 1);
    }
}
