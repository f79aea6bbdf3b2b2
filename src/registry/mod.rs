//! Shared account/contact registry.
//!
//! The registry is owned by whatever tracks live sessions and is shared with
//! the roster through an `Arc`. A rebuild holds the read lock for its whole
//! walk; mutations take the write lock briefly and then post a
//! [`RegistryEvent`] so the UI loop can schedule a fresh rebuild.

pub mod account;
pub mod contacts;
pub mod peer;

pub use account::{Account, AccountId, ConnectionState};
pub use contacts::ContactList;
pub use peer::{Peer, Resource, Show, Subscription};

use crate::error::RosterError;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;

/// Change notifications posted after every registry mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    AccountChanged { account: AccountId },
    ContactsChanged { account: AccountId },
    PresenceChanged { account: AccountId, jid: String },
}

#[derive(Debug)]
struct AccountEntry {
    account: Account,
    contacts: ContactList,
}

type Accounts = BTreeMap<AccountId, AccountEntry>;

pub struct AccountRegistry {
    accounts: RwLock<Accounts>,
    notify: Option<mpsc::UnboundedSender<RegistryEvent>>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(BTreeMap::new()),
            notify: None,
        }
    }

    pub fn with_notifier(notify: mpsc::UnboundedSender<RegistryEvent>) -> Self {
        Self {
            accounts: RwLock::new(BTreeMap::new()),
            notify: Some(notify),
        }
    }

    /// Takes the read lock. Hold the snapshot for as long as borrowed peers
    /// are in use and no longer.
    pub fn read(&self) -> RegistrySnapshot<'_> {
        RegistrySnapshot {
            accounts: self.accounts.read().unwrap_or_else(PoisonError::into_inner),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Accounts> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, event: RegistryEvent) {
        if let Some(tx) = &self.notify {
            // Receiver gone means the UI is shutting down.
            let _ = tx.send(event);
        }
    }

    pub fn add_account(&self, account: Account, contacts: ContactList) {
        let id = account.id.clone();
        self.write()
            .insert(id.clone(), AccountEntry { account, contacts });
        self.notify(RegistryEvent::AccountChanged { account: id });
    }

    /// Replaces the whole contact list of an account.
    pub fn set_contacts(&self, id: &AccountId, contacts: ContactList) -> Result<(), RosterError> {
        {
            let mut accounts = self.write();
            let entry = accounts
                .get_mut(id)
                .ok_or_else(|| RosterError::AccountNotFound(id.to_string()))?;
            entry.contacts = contacts;
        }
        self.notify(RegistryEvent::ContactsChanged { account: id.clone() });
        Ok(())
    }

    pub fn set_connection_state(
        &self,
        id: &AccountId,
        state: ConnectionState,
    ) -> Result<(), RosterError> {
        {
            let mut accounts = self.write();
            let entry = accounts
                .get_mut(id)
                .ok_or_else(|| RosterError::AccountNotFound(id.to_string()))?;
            entry.account.connection = state;
            if state == ConnectionState::Disconnected {
                for peer in entry.contacts.iter_mut() {
                    peer.resources.clear();
                }
            }
        }
        self.notify(RegistryEvent::AccountChanged { account: id.clone() });
        Ok(())
    }

    pub fn set_presence(
        &self,
        id: &AccountId,
        jid: &str,
        resources: Vec<Resource>,
    ) -> Result<(), RosterError> {
        self.with_peer_mut(id, jid, |peer| peer.resources = resources)?;
        self.notify(RegistryEvent::PresenceChanged {
            account: id.clone(),
            jid: jid.to_string(),
        });
        Ok(())
    }

    /// Sets nickname and group membership in one go, as the contact editor does.
    pub fn update_peer(
        &self,
        id: &AccountId,
        jid: &str,
        nickname: &str,
        groups: &[String],
    ) -> Result<(), RosterError> {
        self.with_peer_mut(id, jid, |peer| {
            peer.nickname = non_empty(nickname);
            peer.set_groups(groups.iter().cloned());
        })?;
        self.notify(RegistryEvent::ContactsChanged { account: id.clone() });
        Ok(())
    }

    /// Renames a peer. A peer that vanished in the meantime is ignored.
    pub fn rename_peer(&self, id: &AccountId, jid: &str, nickname: &str) {
        match self.with_peer_mut(id, jid, |peer| peer.nickname = non_empty(nickname)) {
            Ok(()) => self.notify(RegistryEvent::ContactsChanged { account: id.clone() }),
            Err(e) => tracing::debug!("rename ignored: {}", e),
        }
    }

    pub fn remove_peer(&self, id: &AccountId, jid: &str) -> Option<Peer> {
        let removed = self
            .write()
            .get_mut(id)
            .and_then(|entry| entry.contacts.remove(jid));
        if removed.is_some() {
            self.notify(RegistryEvent::ContactsChanged { account: id.clone() });
        }
        removed
    }

    fn with_peer_mut<F>(&self, id: &AccountId, jid: &str, f: F) -> Result<(), RosterError>
    where
        F: FnOnce(&mut Peer),
    {
        let mut accounts = self.write();
        let entry = accounts
            .get_mut(id)
            .ok_or_else(|| RosterError::AccountNotFound(id.to_string()))?;
        let peer = entry
            .contacts
            .get_mut(jid)
            .ok_or_else(|| RosterError::PeerNotFound {
                account: id.to_string(),
                jid: jid.to_string(),
            })?;
        f(peer);
        Ok(())
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Read-locked view of the registry.
pub struct RegistrySnapshot<'a> {
    accounts: RwLockReadGuard<'a, Accounts>,
}

impl<'a> RegistrySnapshot<'a> {
    /// Every account with its contacts, in id order.
    pub fn accounts(&self) -> impl Iterator<Item = (&Account, &ContactList)> {
        self.accounts.values().map(|e| (&e.account, &e.contacts))
    }

    /// Accounts ordered by display name, then id.
    pub fn sorted_accounts(&self) -> Vec<(&Account, &ContactList)> {
        let mut accounts: Vec<_> = self.accounts().collect();
        accounts.sort_by(|(a, _), (b, _)| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.id.cmp(&b.id))
        });
        accounts
    }

    pub fn account_by_id(&self, id: &str) -> Option<&Account> {
        self.accounts
            .get(&AccountId::from(id))
            .map(|e| &e.account)
    }

    pub fn contacts(&self, id: &AccountId) -> Option<&ContactList> {
        self.accounts.get(id).map(|e| &e.contacts)
    }

    pub fn peer(&self, id: &AccountId, jid: &str) -> Option<&Peer> {
        self.contacts(id).and_then(|c| c.get(jid))
    }

    /// Distinct group names across every account, sorted.
    pub fn all_group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .accounts
            .values()
            .flat_map(|e| e.contacts.group_names())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn group_names_for(&self, id: &AccountId) -> Vec<String> {
        self.contacts(id)
            .map(|c| c.group_names().into_iter().collect())
            .unwrap_or_default()
    }

    pub fn display_name_for(&self, id: &AccountId, jid: &str) -> String {
        self.peer(id, jid)
            .map(|p| p.name_for_presentation().to_string())
            .unwrap_or_else(|| jid.to_string())
    }
}
