//! Contact entries as the registry stores them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::account::AccountId;

/// Presence subscription state between an account and a peer.
///
/// `Unset` means the server never told us anything; `None` is the explicit
/// "no subscription" value. Both count as empty for visibility purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    #[default]
    #[serde(rename = "")]
    Unset,
    None,
    To,
    From,
    Both,
}

impl Subscription {
    pub fn is_established(self) -> bool {
        matches!(self, Subscription::To | Subscription::From | Subscription::Both)
    }
}

/// Presence sub-state advertised by a single resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Show {
    #[default]
    #[serde(alias = "")]
    Available,
    Chat,
    Away,
    Xa,
    Dnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub name: String,
    pub show: Show,
    pub priority: i8,
}

impl Resource {
    pub fn new(name: impl Into<String>, show: Show, priority: i8) -> Self {
        Self {
            name: name.into(),
            show,
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    /// Bare address, unique per account.
    pub jid: String,
    /// Name the server roster carries for this contact.
    pub name: Option<String>,
    /// Local nickname, takes precedence over `name`.
    pub nickname: Option<String>,
    pub groups: BTreeSet<String>,
    pub subscription: Subscription,
    /// Id of an inbound subscription request we have not answered yet.
    pub pending_subscribe_id: Option<String>,
    /// We asked this peer for a subscription and are waiting.
    pub asked: bool,
    pub resources: Vec<Resource>,
    pub belongs_to: AccountId,
}

impl Peer {
    pub fn new(jid: impl Into<String>, belongs_to: AccountId) -> Self {
        Self {
            jid: jid.into(),
            name: None,
            nickname: None,
            groups: BTreeSet::new(),
            subscription: Subscription::Unset,
            pending_subscribe_id: None,
            asked: false,
            resources: Vec::new(),
            belongs_to,
        }
    }

    pub fn name_for_presentation(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or(&self.jid)
    }

    pub fn is_online(&self) -> bool {
        !self.resources.is_empty()
    }

    pub fn has_resources(&self) -> bool {
        !self.resources.is_empty()
    }

    pub fn has_pending_request(&self) -> bool {
        self.pending_subscribe_id.is_some()
    }

    /// Show of the highest-priority resource, `None` when offline.
    pub fn main_status(&self) -> Option<Show> {
        self.resources
            .iter()
            .max_by(|a, b| {
                a.priority
                    .cmp(&b.priority)
                    .then_with(|| b.name.cmp(&a.name))
            })
            .map(|r| r.show)
    }

    pub fn resource_names(&self) -> Vec<String> {
        self.resources.iter().map(|r| r.name.clone()).collect()
    }

    pub fn set_groups<I, S>(&mut self, groups: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups
            .into_iter()
            .map(Into::into)
            .filter(|g: &String| !g.is_empty())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> Peer {
        Peer::new("bob@example.org", AccountId::from("acct"))
    }

    #[test]
    fn test_name_for_presentation_prefers_nickname() {
        let mut p = peer();
        assert_eq!(p.name_for_presentation(), "bob@example.org");
        p.name = Some("Robert".into());
        assert_eq!(p.name_for_presentation(), "Robert");
        p.nickname = Some("Bobby".into());
        assert_eq!(p.name_for_presentation(), "Bobby");
        p.nickname = Some(String::new());
        assert_eq!(p.name_for_presentation(), "Robert");
    }

    #[test]
    fn test_main_status_uses_highest_priority() {
        let mut p = peer();
        assert_eq!(p.main_status(), None);
        p.resources = vec![
            Resource::new("phone", Show::Away, 0),
            Resource::new("laptop", Show::Dnd, 5),
        ];
        assert_eq!(p.main_status(), Some(Show::Dnd));
        assert!(p.is_online());
    }

    #[test]
    fn test_subscription_established() {
        assert!(!Subscription::Unset.is_established());
        assert!(!Subscription::None.is_established());
        assert!(Subscription::To.is_established());
        assert!(Subscription::Both.is_established());
    }

    #[test]
    fn test_set_groups_drops_empty_names() {
        let mut p = peer();
        p.set_groups(["Friends", "", "Work"]);
        assert_eq!(p.groups.len(), 2);
    }
}
