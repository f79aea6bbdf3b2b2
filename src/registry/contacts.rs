use std::collections::{BTreeMap, BTreeSet};

use super::peer::Peer;
use crate::roster::group::Group;

/// All peers known for one account, keyed by bare address.
#[derive(Debug, Clone, Default)]
pub struct ContactList {
    peers: BTreeMap<String, Peer>,
}

impl ContactList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, peer: Peer) {
        self.peers.insert(peer.jid.clone(), peer);
    }

    pub fn remove(&mut self, jid: &str) -> Option<Peer> {
        self.peers.remove(jid)
    }

    pub fn get(&self, jid: &str) -> Option<&Peer> {
        self.peers.get(jid)
    }

    pub fn get_mut(&mut self, jid: &str) -> Option<&mut Peer> {
        self.peers.get_mut(jid)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Peer> {
        self.peers.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Peer> {
        self.peers.values_mut()
    }

    pub fn group_names(&self) -> BTreeSet<String> {
        self.peers
            .values()
            .flat_map(|p| p.groups.iter().cloned())
            .collect()
    }

    /// A fresh group tree holding just this list.
    pub fn grouped(&self, delimiter: &str) -> Group<'_> {
        let mut top = Group::top_level();
        self.add_to(&mut top, delimiter);
        top
    }

    /// Merges this list into an existing tree.
    pub fn add_to<'a>(&'a self, group: &mut Group<'a>, delimiter: &str) {
        for peer in self.peers.values() {
            group.insert(peer, delimiter);
        }
    }
}

impl FromIterator<Peer> for ContactList {
    fn from_iter<I: IntoIterator<Item = Peer>>(iter: I) -> Self {
        let mut list = ContactList::new();
        for peer in iter {
            list.insert(peer);
        }
        list
    }
}
