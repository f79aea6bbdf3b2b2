//! Rebuilds the roster tree from a registry snapshot.
//!
//! Every redraw starts from scratch: the target is cleared, the registry is
//! read-locked for the walk, rows are emitted with their counters and
//! collapse decisions, and only after the lock is released does the target
//! get expanded and the recorded rows collapsed.

use std::sync::Arc;

use super::collapse::{CollapsePersistence, CollapseStateStore};
use super::counter::Counter;
use super::group::Group;
use super::row::{RenderTarget, Row, RowKind, RowNode, RowPath};
use super::sort::SortMode;
use super::status::{ColorKey, StatusClass, StatusIcon};
use super::visibility::{self, VisibilityFilter};
use crate::config::DisplayConfig;
use crate::error::RosterError;
use crate::registry::{Account, AccountId, AccountRegistry, Peer, RegistrySnapshot};

pub const ACCOUNT_WEIGHT: u16 = 700;
pub const GROUP_WEIGHT: u16 = 500;

const WAITING_FOR_APPROVAL: &str = " (waiting for approval)";

/// A row traced back to the registry entries it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRow {
    pub kind: RowKind,
    pub address: String,
    pub account: Account,
}

/// Outcome of activating a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    OpenConversation { account: Account, peer: String },
    Toggled { identity: String, collapsed: bool },
}

/// What a secondary click on a row offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextTarget {
    PeerMenu {
        account: Account,
        peer: String,
        resources: Vec<String>,
        can_send_files: bool,
    },
    AccountMenu {
        account: Account,
    },
}

pub struct RosterSynchronizer<T: RenderTarget> {
    registry: Arc<AccountRegistry>,
    target: T,
    collapse: CollapseStateStore,
    display: DisplayConfig,
}

impl<T: RenderTarget> RosterSynchronizer<T> {
    pub fn new(
        registry: Arc<AccountRegistry>,
        target: T,
        display: DisplayConfig,
        persistence: &dyn CollapsePersistence,
    ) -> Self {
        let mut collapse = CollapseStateStore::new();
        collapse.restore_from(persistence);
        Self {
            registry,
            target,
            collapse,
            display,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn collapse_state(&self) -> &CollapseStateStore {
        &self.collapse
    }

    pub fn registry(&self) -> &Arc<AccountRegistry> {
        &self.registry
    }

    /// Applies new display settings and rebuilds.
    pub fn set_display(&mut self, display: DisplayConfig) {
        self.display = display;
        self.redraw();
    }

    /// Full rebuild of the render target.
    pub fn redraw(&mut self) {
        self.target.clear();

        let (rows, to_collapse) = {
            let registry = Arc::clone(&self.registry);
            let snapshot = registry.read();
            let mut walk = Walk::new(&self.display, &self.collapse);
            let rows = if self.display.view_by_account {
                walk.separate(&snapshot)
            } else {
                walk.merged(&snapshot)
            };
            (rows, walk.to_collapse)
        };

        tracing::debug!(
            view_by_account = self.display.view_by_account,
            top_level = rows.len(),
            collapsed = to_collapse.len(),
            "roster rebuilt"
        );

        self.target.populate(rows);
        self.target.expand_all();
        for path in &to_collapse {
            self.target.collapse_row(path);
        }
    }

    /// Maps a row back to its account. `None` when the row or the account
    /// is gone, e.g. a click that raced a rebuild.
    pub fn resolve(&self, path: &RowPath) -> Option<ResolvedRow> {
        let row = &self.target.node(path)?.row;
        let account_id = row.account_id.as_ref()?;
        let snapshot = self.registry.read();
        let account = snapshot.account_by_id(account_id.as_str())?.clone();
        Some(ResolvedRow {
            kind: row.kind,
            address: row.id.clone(),
            account,
        })
    }

    /// Primary activation. Peer rows open a conversation; account and group
    /// rows flip their collapse preference, persist it and rebuild.
    pub fn activate(
        &mut self,
        path: &RowPath,
        persistence: &mut dyn CollapsePersistence,
    ) -> Option<Activation> {
        let row = &self.target.node(path)?.row;
        let (kind, identity) = (row.kind, row.id.clone());
        match kind {
            RowKind::Peer => {
                let resolved = self.resolve(path)?;
                Some(Activation::OpenConversation {
                    account: resolved.account,
                    peer: resolved.address,
                })
            }
            RowKind::Account | RowKind::Group => {
                let collapsed = self.toggle_collapse(&identity, persistence);
                Some(Activation::Toggled {
                    identity,
                    collapsed,
                })
            }
        }
    }

    pub fn toggle_collapse(
        &mut self,
        identity: &str,
        persistence: &mut dyn CollapsePersistence,
    ) -> bool {
        let collapsed = self.collapse.toggle(identity);
        tracing::trace!(identity, collapsed, "collapse toggled");
        self.collapse.save_to(persistence);
        self.redraw();
        collapsed
    }

    pub fn secondary_click(&self, path: &RowPath) -> Option<ContextTarget> {
        let resolved = self.resolve(path)?;
        match resolved.kind {
            RowKind::Peer => {
                let snapshot = self.registry.read();
                let peer = snapshot.peer(&resolved.account.id, &resolved.address)?;
                Some(ContextTarget::PeerMenu {
                    resources: peer.resource_names(),
                    can_send_files: peer.has_resources(),
                    peer: resolved.address,
                    account: resolved.account,
                })
            }
            RowKind::Account => Some(ContextTarget::AccountMenu {
                account: resolved.account,
            }),
            RowKind::Group => None,
        }
    }

    /// Changes nickname and groups of a peer, then rebuilds.
    pub fn update_peer(
        &mut self,
        account: &AccountId,
        jid: &str,
        nickname: &str,
        groups: &[String],
    ) -> Result<(), RosterError> {
        self.registry.update_peer(account, jid, nickname, groups)?;
        self.redraw();
        Ok(())
    }

    pub fn rename_peer(&mut self, account: &AccountId, jid: &str, nickname: &str) {
        self.registry.rename_peer(account, jid, nickname);
        self.redraw();
    }
}

impl<T: RenderTarget> Drop for RosterSynchronizer<T> {
    fn drop(&mut self) {
        self.target.release();
    }
}

/// State of a single rebuild.
struct Walk<'s> {
    display: &'s DisplayConfig,
    collapse: &'s CollapseStateStore,
    filter: VisibilityFilter,
    sort: SortMode,
    to_collapse: Vec<RowPath>,
}

impl<'s> Walk<'s> {
    fn new(display: &'s DisplayConfig, collapse: &'s CollapseStateStore) -> Self {
        Self {
            display,
            collapse,
            filter: VisibilityFilter {
                show_offline: !display.show_only_online,
                show_waiting: !display.show_only_confirmed,
            },
            sort: SortMode::from_sort_by_status(display.sort_by_status),
            to_collapse: Vec::new(),
        }
    }

    /// One tree across every account. Group identities carry no account
    /// prefix, so `Friends` on two accounts shares one row.
    fn merged(&mut self, snapshot: &RegistrySnapshot<'_>) -> Vec<RowNode> {
        let mut top = Group::top_level();
        for (account, contacts) in snapshot.sorted_accounts() {
            contacts.add_to(&mut top, &account.group_delimiter);
        }

        let mut rows = Vec::new();
        let mut account_counter = Counter::default();
        self.display_group(&top, &mut rows, &RowPath::root(), &mut account_counter, "");
        rows
    }

    /// One top-level row per account, each with its own group tree.
    fn separate(&mut self, snapshot: &RegistrySnapshot<'_>) -> Vec<RowNode> {
        let mut rows = Vec::new();
        for (account, contacts) in snapshot.sorted_accounts() {
            let path = RowPath::root().child(rows.len());
            let mut node = RowNode::new(account_row(account));
            let mut account_counter = Counter::default();

            let grouped = contacts.grouped(&account.group_delimiter);
            self.display_group(
                &grouped,
                &mut node.children,
                &path,
                &mut account_counter,
                &account.display_name,
            );

            let expanded = self.resolve_collapse(&account.display_name, &path);
            node.row.label = group_display_name(&account.display_name, &account_counter, expanded);
            rows.push(node);
        }
        rows
    }

    fn display_group(
        &mut self,
        group: &Group<'_>,
        parent: &mut Vec<RowNode>,
        parent_path: &RowPath,
        account_counter: &mut Counter,
        account_prefix: &str,
    ) {
        let group_id = format!("{}//{}", account_prefix, group.full_name());
        let is_empty = !group.peers().iter().any(|p| self.filter.should_display(p));
        let emit = !group.is_root() && (!is_empty || self.display.show_empty_groups);

        let mut group_node = emit.then(|| RowNode::new(group_row(&group_id)));
        let group_path = parent_path.child(parent.len());
        let mut group_counter = Counter::default();

        {
            let (children, path) = match group_node.as_mut() {
                Some(node) => (&mut node.children, &group_path),
                None => (&mut *parent, parent_path),
            };

            let mut peers = group.peers().to_vec();
            self.sort.sort(&mut peers);
            for peer in peers {
                let visible = self.filter.is_nominally_visible(peer);
                let online = visible && visibility::is_online(peer);
                account_counter.inc(visible, online);
                group_counter.inc(visible, online);

                if self.filter.should_display(peer) {
                    children.push(RowNode::new(peer_row(peer)));
                }
            }

            for child in group.groups() {
                self.display_group(child, children, path, account_counter, account_prefix);
            }
        }

        if let Some(mut node) = group_node {
            let expanded = self.resolve_collapse(&group_id, &group_path);
            node.row.label = group_display_name(group.full_name(), &group_counter, expanded);
            parent.push(node);
        }
    }

    /// Records `path` for collapsing when `identity` is collapsed. Returns
    /// whether the row stays expanded.
    fn resolve_collapse(&mut self, identity: &str, path: &RowPath) -> bool {
        if self.collapse.is_collapsed(identity) {
            self.to_collapse.push(path.clone());
            false
        } else {
            true
        }
    }
}

pub fn group_display_name(name: &str, counter: &Counter, is_expanded: bool) -> String {
    if is_expanded {
        format!("{} ({}/{})", name, counter.online, counter.total)
    } else {
        format!("[{}] ({}/{})", name, counter.online, counter.total)
    }
}

pub fn tooltip_for(peer: &Peer) -> String {
    let name = escape_markup(peer.name_for_presentation());
    let jid = escape_markup(&peer.jid);
    if name != jid {
        format!("{} ({})", name, jid)
    } else {
        jid
    }
}

fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

fn peer_row(peer: &Peer) -> Row {
    let extra = if peer.asked { WAITING_FOR_APPROVAL } else { "" };
    Row {
        kind: RowKind::Peer,
        id: peer.jid.clone(),
        label: format!("{}{}", peer.name_for_presentation(), extra),
        account_id: Some(peer.belongs_to.clone()),
        foreground: Some(ColorKey::peer_foreground(peer)),
        background: ColorKey::PeerBackground,
        weight: None,
        tooltip: Some(tooltip_for(peer)),
        icon: Some(StatusClass::classify(peer).icon()),
    }
}

fn group_row(group_id: &str) -> Row {
    Row {
        kind: RowKind::Group,
        id: group_id.to_string(),
        label: String::new(),
        account_id: None,
        foreground: None,
        background: ColorKey::GroupBackground,
        weight: Some(GROUP_WEIGHT),
        tooltip: None,
        icon: None,
    }
}

fn account_row(account: &Account) -> Row {
    Row {
        kind: RowKind::Account,
        id: account.display_name.clone(),
        label: String::new(),
        account_id: Some(account.id.clone()),
        foreground: None,
        background: ColorKey::account_background(account),
        weight: Some(ACCOUNT_WEIGHT),
        tooltip: None,
        icon: Some(StatusIcon::for_account(account)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ConnectionState, ContactList, Resource, Show, Subscription};
    use crate::roster::row::RowTree;

    #[derive(Default)]
    struct Memory(String);

    impl CollapsePersistence for Memory {
        fn load_collapsed(&self) -> String {
            self.0.clone()
        }

        fn save_collapsed(&mut self, value: &str) {
            self.0 = value.to_string();
        }
    }

    fn subscribed(account: &str, jid: &str, groups: &[&str], online: bool) -> Peer {
        let mut p = Peer::new(jid, AccountId::from(account));
        p.subscription = Subscription::Both;
        p.set_groups(groups.iter().copied());
        if online {
            p.resources.push(Resource::new("pc", Show::Available, 0));
        }
        p
    }

    fn account(id: &str, name: &str) -> Account {
        let mut a = Account::new(id, name);
        a.group_delimiter = "::".into();
        a.connection = ConnectionState::Connected;
        a
    }

    fn two_account_registry() -> Arc<AccountRegistry> {
        let registry = AccountRegistry::new();
        registry.add_account(
            account("a1", "alice@x"),
            [subscribed("a1", "bob@x", &["Friends"], true)].into_iter().collect(),
        );
        registry.add_account(
            account("a2", "carol@y"),
            [subscribed("a2", "dave@y", &["Friends"], true)].into_iter().collect(),
        );
        Arc::new(registry)
    }

    fn display(view_by_account: bool) -> DisplayConfig {
        DisplayConfig {
            view_by_account,
            ..DisplayConfig::default()
        }
    }

    fn synchronizer(
        registry: Arc<AccountRegistry>,
        display: DisplayConfig,
        settings: &Memory,
    ) -> RosterSynchronizer<RowTree> {
        let mut sync = RosterSynchronizer::new(registry, RowTree::new(), display, settings);
        sync.redraw();
        sync
    }

    fn labels(tree: &RowTree) -> Vec<(usize, String)> {
        tree.walk()
            .into_iter()
            .map(|(path, node)| (path.depth(), node.row.label.clone()))
            .collect()
    }

    #[test]
    fn test_merged_mode_shares_group_rows() {
        let sync = synchronizer(two_account_registry(), display(false), &Memory::default());
        let roots = sync.target().roots();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].row.kind, RowKind::Group);
        assert_eq!(roots[0].row.id, "//Friends");
        assert_eq!(roots[0].row.label, "Friends (2/2)");
        assert_eq!(roots[0].children.len(), 2);
        assert!(roots[0].children.iter().all(|n| n.row.kind == RowKind::Peer));
    }

    #[test]
    fn test_separate_mode_has_account_rows() {
        let sync = synchronizer(two_account_registry(), display(true), &Memory::default());
        let roots = sync.target().roots();
        assert_eq!(roots.len(), 2);
        for (root, name) in roots.iter().zip(["alice@x", "carol@y"]) {
            assert_eq!(root.row.kind, RowKind::Account);
            assert_eq!(root.row.id, name);
            assert_eq!(root.row.label, format!("{} (1/1)", name));
            assert_eq!(root.row.weight, Some(ACCOUNT_WEIGHT));
            assert_eq!(root.children.len(), 1);
            let group = &root.children[0];
            assert_eq!(group.row.id, format!("{}//Friends", name));
            assert_eq!(group.children.len(), 1);
        }
    }

    #[test]
    fn test_counts_follow_nominal_visibility() {
        let registry = AccountRegistry::new();
        let mut waiting = Peer::new("eve@x", AccountId::from("a1"));
        waiting.pending_subscribe_id = Some("sub-1".into());
        waiting.set_groups(["Friends"]);
        let contacts: ContactList = [
            subscribed("a1", "bob@x", &["Friends"], true),
            subscribed("a1", "carl@x", &["Friends"], false),
            waiting,
        ]
        .into_iter()
        .collect();
        registry.add_account(account("a1", "alice@x"), contacts);

        let mut sync = synchronizer(Arc::new(registry), display(false), &Memory::default());
        assert_eq!(sync.target().roots()[0].row.label, "Friends (1/3)");
        assert_eq!(sync.target().roots()[0].children.len(), 3);

        // Hiding offline peers drops rows but not totals.
        sync.set_display(DisplayConfig {
            show_only_online: true,
            ..DisplayConfig::default()
        });
        assert_eq!(sync.target().roots()[0].row.label, "Friends (1/3)");
        assert_eq!(sync.target().roots()[0].children.len(), 1);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let settings = Memory(crate::roster::collapse::stable_key("alice@x//Friends"));
        let mut sync = synchronizer(two_account_registry(), display(true), &settings);
        let first = sync.target().clone();
        sync.redraw();
        assert_eq!(&first, sync.target());
        assert_eq!(labels(&first), labels(sync.target()));
    }

    #[test]
    fn test_collapsed_rows_are_bracketed_and_collapsed() {
        let settings = Memory(crate::roster::collapse::stable_key("alice@x//Friends"));
        let sync = synchronizer(two_account_registry(), display(true), &settings);
        let alice = &sync.target().roots()[0];
        assert!(alice.expanded);
        assert_eq!(alice.children[0].row.label, "[Friends] (1/1)");
        assert!(!alice.children[0].expanded);
        let carol = &sync.target().roots()[1];
        assert!(carol.children[0].expanded);
    }

    #[test]
    fn test_activating_account_row_toggles_and_persists() {
        let mut settings = Memory::default();
        let mut sync = synchronizer(two_account_registry(), display(true), &settings);
        let path = RowPath::root().child(1);

        let outcome = sync.activate(&path, &mut settings);
        assert_eq!(
            outcome,
            Some(Activation::Toggled {
                identity: "carol@y".into(),
                collapsed: true
            })
        );
        assert_eq!(settings.0, crate::roster::collapse::stable_key("carol@y"));
        let carol = &sync.target().roots()[1];
        assert!(!carol.expanded);
        assert_eq!(carol.row.label, "[carol@y] (1/1)");

        sync.activate(&path, &mut settings);
        assert_eq!(settings.0, "");
        assert!(sync.target().roots()[1].expanded);
    }

    #[test]
    fn test_activating_peer_opens_conversation() {
        let mut settings = Memory::default();
        let mut sync = synchronizer(two_account_registry(), display(true), &settings);
        let outcome = sync.activate(&RowPath::from(vec![0, 0, 0]), &mut settings);
        match outcome {
            Some(Activation::OpenConversation { account, peer }) => {
                assert_eq!(account.id, AccountId::from("a1"));
                assert_eq!(peer, "bob@x");
            }
            other => panic!("unexpected activation {:?}", other),
        }
    }

    #[test]
    fn test_stale_rows_are_ignored() {
        let registry = two_account_registry();
        let mut settings = Memory::default();
        let mut sync = synchronizer(Arc::clone(&registry), display(true), &settings);

        assert!(sync.activate(&RowPath::from(vec![9]), &mut settings).is_none());

        // Account vanishes between the rebuild and the click.
        registry.set_contacts(&AccountId::from("a1"), ContactList::new()).unwrap();
        assert!(registry.remove_peer(&AccountId::from("a1"), "bob@x").is_none());
        let peer_path = RowPath::from(vec![0, 0, 0]);
        assert!(sync.resolve(&peer_path).is_some());
        assert!(sync.secondary_click(&peer_path).is_none());
    }

    #[test]
    fn test_secondary_click_targets() {
        let registry = two_account_registry();
        let sync = synchronizer(registry, display(true), &Memory::default());

        match sync.secondary_click(&RowPath::from(vec![0, 0, 0])) {
            Some(ContextTarget::PeerMenu {
                peer,
                resources,
                can_send_files,
                ..
            }) => {
                assert_eq!(peer, "bob@x");
                assert_eq!(resources, vec!["pc".to_string()]);
                assert!(can_send_files);
            }
            other => panic!("unexpected target {:?}", other),
        }
        assert!(matches!(
            sync.secondary_click(&RowPath::from(vec![1])),
            Some(ContextTarget::AccountMenu { .. })
        ));
        assert!(sync.secondary_click(&RowPath::from(vec![0, 0])).is_none());
    }

    #[test]
    fn test_empty_groups_setting() {
        let registry = AccountRegistry::new();
        registry.add_account(
            account("a1", "alice@x"),
            [subscribed("a1", "bob@x", &["Old"], false)].into_iter().collect(),
        );
        let registry = Arc::new(registry);
        let hidden = DisplayConfig {
            show_only_online: true,
            ..DisplayConfig::default()
        };
        let mut sync = synchronizer(registry, hidden.clone(), &Memory::default());
        assert!(sync.target().is_empty());

        sync.set_display(DisplayConfig {
            show_empty_groups: true,
            ..hidden
        });
        assert_eq!(sync.target().roots()[0].row.label, "Old (0/1)");
        assert!(sync.target().roots()[0].children.is_empty());
    }

    #[test]
    fn test_equivalent_group_names_count_peer_once() {
        let registry = AccountRegistry::new();
        registry.add_account(
            account("a1", "alice@x"),
            [subscribed("a1", "bob@x", &["Work", "Work::"], true)].into_iter().collect(),
        );
        let sync = synchronizer(Arc::new(registry), display(false), &Memory::default());
        let roots = sync.target().roots();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].row.label, "Work (1/1)");
        assert_eq!(roots[0].children.len(), 1);
    }

    #[test]
    fn test_nested_groups_and_sorting() {
        let registry = AccountRegistry::new();
        let mut carol = subscribed("a1", "carol@x", &["Work::Team"], false);
        carol.nickname = Some("Carol".into());
        let mut alice = subscribed("a1", "alice@x", &["Work::Team"], true);
        alice.nickname = Some("alice".into());
        let mut bob = subscribed("a1", "bob@x", &["Work::Team"], false);
        bob.nickname = Some("Bob".into());
        registry.add_account(account("a1", "me@x"), [carol, alice, bob].into_iter().collect());
        let registry = Arc::new(registry);

        // `Work` has no direct members, so only `Work::Team` gets a row.
        let mut sync = synchronizer(Arc::clone(&registry), display(false), &Memory::default());
        assert_eq!(sync.target().roots().len(), 1);
        let team = &sync.target().roots()[0];
        assert_eq!(team.row.id, "//Work::Team");
        assert_eq!(team.row.label, "Work::Team (1/3)");
        let names: Vec<_> = team.children.iter().map(|n| n.row.label.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Carol", "alice"]);

        sync.set_display(DisplayConfig {
            sort_by_status: true,
            show_empty_groups: true,
            ..DisplayConfig::default()
        });
        let work = &sync.target().roots()[0];
        assert_eq!(work.row.label, "Work (0/0)");
        assert_eq!(work.children[0].children[0].row.label, "alice");
    }

    #[test]
    fn test_update_peer_rebuilds() {
        let registry = two_account_registry();
        let mut sync = synchronizer(registry, display(true), &Memory::default());
        sync.update_peer(&AccountId::from("a1"), "bob@x", "Bobby", &["Work".to_string()])
            .unwrap();
        let alice = &sync.target().roots()[0];
        assert_eq!(alice.children[0].row.id, "alice@x//Work");
        assert_eq!(alice.children[0].children[0].row.label, "Bobby");

        assert!(sync
            .update_peer(&AccountId::from("a1"), "nobody@x", "X", &[])
            .is_err());
    }

    #[test]
    fn test_peer_row_details() {
        let mut p = subscribed("a1", "bob@x", &[], false);
        p.nickname = Some("<Bob>".into());
        p.asked = true;
        let row = peer_row(&p);
        assert_eq!(row.label, "<Bob> (waiting for approval)");
        assert_eq!(row.tooltip.as_deref(), Some("&lt;Bob&gt; (bob@x)"));
        assert_eq!(row.icon, Some(StatusIcon::Unknown));
        assert_eq!(row.foreground, Some(ColorKey::PeerOfflineForeground));
        assert_eq!(tooltip_for(&subscribed("a1", "bob@x", &[], false)), "bob@x");
    }

    #[test]
    fn test_drop_releases_target() {
        struct Probe<'a>(&'a std::cell::Cell<usize>, RowTree);

        impl RenderTarget for Probe<'_> {
            fn clear(&mut self) {
                self.1.clear()
            }
            fn populate(&mut self, rows: Vec<RowNode>) {
                self.1.populate(rows)
            }
            fn expand_all(&mut self) {
                self.1.expand_all()
            }
            fn collapse_row(&mut self, path: &RowPath) {
                self.1.collapse_row(path)
            }
            fn release(&mut self) {
                self.0.set(self.0.get() + 1)
            }
            fn node(&self, path: &RowPath) -> Option<&RowNode> {
                self.1.node(path)
            }
        }

        let released = std::cell::Cell::new(0);
        {
            let mut sync = RosterSynchronizer::new(
                two_account_registry(),
                Probe(&released, RowTree::new()),
                display(false),
                &Memory::default(),
            );
            sync.redraw();
        }
        assert_eq!(released.get(), 1);
    }
}
