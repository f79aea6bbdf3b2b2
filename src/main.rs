mod app;
mod config;
mod error;
mod logging;
mod registry;
mod roster;
mod sim;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::*;
use crate::error::RosterError;
use crate::registry::{AccountRegistry, ConnectionState, RegistryEvent};
use crate::roster::StatusClass;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const CONNECT_DELAY_MS: u64 = 800;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config
    let cfg = config::load_config()?;

    // Logs go to a file; the terminal belongs to the UI.
    logging::init(&cfg.logging)?;
    tracing::info!(accounts = cfg.accounts.len(), "starting crabroster");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!("fatal: {:#}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (registry_tx, mut registry_rx) = mpsc::unbounded_channel::<RegistryEvent>();

    // Seed the registry from config
    let registry = Arc::new(AccountRegistry::with_notifier(registry_tx));
    for account in &cfg.accounts {
        let (account, contacts) = account.build();
        tracing::debug!(account = %account.id, contacts = contacts.len(), "account loaded");
        registry.add_account(account, contacts);
    }

    let simulation = cfg.simulation.clone();
    let mut state = AppState::new(cfg, Arc::clone(&registry));

    // Registry changes are redispatched onto the UI loop
    let fwd_tx = event_tx.clone();
    tokio::spawn(async move {
        while let Some(event) = registry_rx.recv().await {
            if fwd_tx.send(AppEvent::Registry(event)).is_err() {
                break;
            }
        }
    });

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task (4 Hz is plenty for expiring status messages)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    let simulator = simulation.enabled.then(|| {
        sim::spawn_presence_simulator(
            Arc::clone(&registry),
            Duration::from_millis(simulation.interval_ms.max(100)),
        )
    });

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);

        // Process actions
        for action in actions {
            match action {
                Action::OpenConversation { account, peer } => {
                    let (name, status) = {
                        let snapshot = registry.read();
                        let status = snapshot
                            .peer(&account.id, &peer)
                            .map(StatusClass::classify)
                            .unwrap_or(StatusClass::Unknown);
                        (snapshot.display_name_for(&account.id, &peer), status)
                    };
                    tracing::info!(account = %account.id, %peer, "conversation opened");
                    state.detail = Some(Detail::Conversation {
                        account,
                        peer,
                        name,
                        status,
                    });
                    state.dirty = true;
                }
                Action::ShowMenu(target) => {
                    state.detail = Some(Detail::Menu(target));
                    state.dirty = true;
                }
                Action::RenamePeer {
                    account,
                    jid,
                    nickname,
                } => {
                    state.roster.rename_peer(&account, &jid, &nickname);
                    let groups: Option<Vec<String>> = registry
                        .read()
                        .peer(&account, &jid)
                        .map(|p| p.groups.iter().cloned().collect());
                    match groups {
                        Some(groups) => {
                            state
                                .config
                                .save_peer_details(&account, &jid, &nickname, &groups);
                            save_config(&mut state);
                            state.set_status(format!("Renamed {}", jid));
                        }
                        None => state.set_status(format!("{} is no longer in the roster", jid)),
                    }
                    state.rebuild();
                }
                Action::EditGroups {
                    account,
                    jid,
                    groups,
                } => {
                    let nickname = registry
                        .read()
                        .peer(&account, &jid)
                        .and_then(|p| p.nickname.clone())
                        .unwrap_or_default();
                    match state.roster.update_peer(&account, &jid, &nickname, &groups) {
                        Ok(()) => {
                            state
                                .config
                                .save_peer_details(&account, &jid, &nickname, &groups);
                            save_config(&mut state);
                            state.set_status(format!("Updated groups of {}", jid));
                        }
                        Err(e) => {
                            tracing::debug!("group edit dropped: {}", e);
                            state.set_status(format!("{} is no longer in the roster", jid));
                        }
                    }
                    state.rebuild();
                }
                Action::RemovePeer { account, jid } => {
                    if registry.remove_peer(&account, &jid).is_some() {
                        state.config.remove_contact(&account, &jid);
                        save_config(&mut state);
                        state.set_status(format!("Removed {}", jid));
                    }
                }
                Action::ToggleConnection { account } => {
                    let connected = registry
                        .read()
                        .account_by_id(account.as_str())
                        .map(|a| !a.is_disconnected());
                    let result = match connected {
                        Some(true) => {
                            registry.set_connection_state(&account, ConnectionState::Disconnected)
                        }
                        Some(false) => registry
                            .set_connection_state(&account, ConnectionState::Connecting)
                            .map(|()| {
                                sim::spawn_connect(
                                    Arc::clone(&registry),
                                    account.clone(),
                                    Duration::from_millis(CONNECT_DELAY_MS),
                                );
                            }),
                        None => Err(RosterError::AccountNotFound(account.to_string())),
                    };
                    if let Err(e) = result {
                        tracing::debug!("connection toggle dropped: {}", e);
                    }
                }
                Action::ReloadContacts => match config::load_config() {
                    Ok(fresh) => {
                        reload_contacts(&registry, &fresh.accounts);
                        state.config.accounts = fresh.accounts;
                        state.set_status("Contacts reloaded");
                    }
                    Err(e) => {
                        tracing::warn!("failed to reload config: {:#}", e);
                        state.set_status("Could not reload contacts");
                    }
                },
                Action::SaveConfig => save_config(&mut state),
                Action::Quit => {
                    state.should_quit = true;
                }
            }
        }

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    if let Some(handle) = simulator {
        handle.abort();
    }
    tracing::info!("shutting down");

    Ok(())
}

/// Replaces contact lists of known accounts and adds new ones.
fn reload_contacts(registry: &AccountRegistry, accounts: &[config::model::AccountConfig]) {
    for account_cfg in accounts {
        let (account, contacts) = account_cfg.build();
        let known = registry.read().account_by_id(account.id.as_str()).is_some();
        if known {
            if let Err(e) = registry.set_contacts(&account.id, contacts) {
                tracing::warn!("reload skipped: {}", e);
            }
        } else {
            registry.add_account(account, contacts);
        }
    }
}

fn save_config(state: &mut AppState) {
    if let Err(e) = config::save_config(&state.config) {
        tracing::warn!("failed to save config: {:#}", e);
        state.set_status("Could not save settings");
    }
}
