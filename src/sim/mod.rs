//! Random presence changes for demo rosters.
//!
//! Stands in for live sessions: every tick one subscribed peer on a connected
//! account goes offline or comes back with a random show. Changes go through
//! the registry's write path, which posts the usual change notification.

use crate::registry::{AccountId, AccountRegistry, ConnectionState, Resource, Show};
use rand::RngExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const SHOWS: &[Option<Show>] = &[
    None,
    Some(Show::Available),
    Some(Show::Chat),
    Some(Show::Away),
    Some(Show::Xa),
    Some(Show::Dnd),
];

pub fn spawn_presence_simulator(registry: Arc<AccountRegistry>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let Some((account, jid, show)) = pick_change(&registry) else {
                continue;
            };
            let resources = show
                .map(|s| vec![Resource::new("crabroster", s, 0)])
                .unwrap_or_default();
            if let Err(e) = registry.set_presence(&account, &jid, resources) {
                tracing::debug!("presence change dropped: {}", e);
            }
        }
    })
}

/// Finishes a connection attempt after `delay`. An account that was
/// disconnected again in the meantime stays disconnected.
pub fn spawn_connect(registry: Arc<AccountRegistry>, account: AccountId, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let connecting = registry
            .read()
            .account_by_id(account.as_str())
            .map(|a| a.connection == ConnectionState::Connecting)
            .unwrap_or(false);
        if !connecting {
            return;
        }
        match registry.set_connection_state(&account, ConnectionState::Connected) {
            Ok(()) => tracing::info!(%account, "account connected"),
            Err(e) => tracing::debug!("connect dropped: {}", e),
        }
    })
}

fn candidates(registry: &AccountRegistry) -> Vec<(AccountId, String)> {
    let snapshot = registry.read();
    snapshot
        .accounts()
        .filter(|(account, contacts)| account.is_connected() && !contacts.is_empty())
        .flat_map(|(account, contacts)| {
            contacts
                .iter()
                .filter(|p| p.subscription.is_established())
                .map(move |p| (account.id.clone(), p.jid.clone()))
        })
        .collect()
}

fn pick_change(registry: &AccountRegistry) -> Option<(AccountId, String, Option<Show>)> {
    let mut candidates = candidates(registry);
    if candidates.is_empty() {
        return None;
    }
    let mut rng = rand::rng();
    let (account, jid) = candidates.swap_remove(rng.random_range(0..candidates.len()));
    let show = SHOWS[rng.random_range(0..SHOWS.len())];
    Some((account, jid, show))
}
