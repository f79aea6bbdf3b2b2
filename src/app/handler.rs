use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::roster::Activation;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

const PAGE: usize = 10;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::Registry(event) => {
            tracing::trace!(?event, "registry changed");
            state.rebuild();
            vec![]
        }
        AppEvent::Tick => {
            state.expire_status(Instant::now());
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    match state.mode {
        InputMode::Normal => handle_roster_key(state, key),
        InputMode::Rename { .. } | InputMode::EditGroups { .. } => handle_input_key(state, key),
    }
}

fn handle_roster_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        return vec![Action::ReloadContacts];
    }

    match key.code {
        KeyCode::Char('q') => vec![Action::Quit],
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_up(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_down(1);
            vec![]
        }
        KeyCode::PageUp => {
            state.move_up(PAGE);
            vec![]
        }
        KeyCode::PageDown => {
            state.move_down(PAGE);
            vec![]
        }
        KeyCode::Home => {
            state.selected = 0;
            vec![]
        }
        KeyCode::End => {
            state.move_end();
            vec![]
        }
        KeyCode::Enter | KeyCode::Char(' ') => activate_selected(state),
        KeyCode::Char('m') => {
            let Some(path) = state.selected_path() else {
                return vec![];
            };
            match state.roster.secondary_click(&path) {
                Some(target) => vec![Action::ShowMenu(target)],
                None => vec![],
            }
        }
        KeyCode::Esc => {
            state.detail = None;
            vec![]
        }
        KeyCode::Char('v') => toggle_display(state, "view by account", |d| {
            d.view_by_account = !d.view_by_account;
            d.view_by_account
        }),
        KeyCode::Char('o') => toggle_display(state, "offline contacts hidden", |d| {
            d.show_only_online = !d.show_only_online;
            d.show_only_online
        }),
        KeyCode::Char('w') => toggle_display(state, "unconfirmed contacts hidden", |d| {
            d.show_only_confirmed = !d.show_only_confirmed;
            d.show_only_confirmed
        }),
        KeyCode::Char('s') => toggle_display(state, "sort by status", |d| {
            d.sort_by_status = !d.sort_by_status;
            d.sort_by_status
        }),
        KeyCode::Char('e') => toggle_display(state, "empty groups shown", |d| {
            d.show_empty_groups = !d.show_empty_groups;
            d.show_empty_groups
        }),
        KeyCode::Char('r') => {
            start_rename(state);
            vec![]
        }
        KeyCode::Char('g') => {
            start_edit_groups(state);
            vec![]
        }
        KeyCode::Char('x') => match state.selected_peer() {
            Some((account, jid)) => vec![Action::RemovePeer { account, jid }],
            None => {
                state.set_status("Only contacts can be removed");
                vec![]
            }
        },
        KeyCode::Char('c') => match state.selected_account() {
            Some(account) => vec![Action::ToggleConnection { account }],
            None => {
                state.set_status("Select an account or contact first");
                vec![]
            }
        },
        _ => vec![],
    }
}

fn activate_selected(state: &mut AppState) -> Vec<Action> {
    let Some(path) = state.selected_path() else {
        return vec![];
    };
    let outcome = state.roster.activate(&path, &mut state.config);
    match outcome {
        Some(Activation::OpenConversation { account, peer }) => {
            vec![Action::OpenConversation { account, peer }]
        }
        Some(Activation::Toggled { identity, collapsed }) => {
            tracing::debug!(%identity, collapsed, "row toggled");
            state.after_roster_change(Some(path));
            vec![Action::SaveConfig]
        }
        None => vec![],
    }
}

fn toggle_display<F>(state: &mut AppState, label: &str, f: F) -> Vec<Action>
where
    F: FnOnce(&mut crate::config::DisplayConfig) -> bool,
{
    let mut enabled = false;
    state.update_display(|d| enabled = f(d));
    state.set_status(format!("{}: {}", label, if enabled { "on" } else { "off" }));
    vec![Action::SaveConfig]
}

fn start_rename(state: &mut AppState) {
    let Some((account, jid)) = state.selected_peer() else {
        state.set_status("Only contacts can be renamed");
        return;
    };
    let current = {
        let snapshot = state.roster.registry().read();
        snapshot
            .peer(&account, &jid)
            .and_then(|p| p.nickname.clone())
            .unwrap_or_default()
    };
    state.input.set(&current);
    state.mode = InputMode::Rename { account, jid };
}

fn start_edit_groups(state: &mut AppState) {
    let Some((account, jid)) = state.selected_peer() else {
        state.set_status("Only contacts have groups");
        return;
    };
    let current = {
        let snapshot = state.roster.registry().read();
        snapshot
            .peer(&account, &jid)
            .map(|p| p.groups.iter().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default()
    };
    state.input.set(&current);
    state.mode = InputMode::EditGroups { account, jid };
}

/// Splits the comma-separated group editor text.
fn parse_groups(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc => {
            state.input.take_text();
            state.mode = InputMode::Normal;
            vec![]
        }
        KeyCode::Enter => {
            let text = state.input.take_text();
            match std::mem::replace(&mut state.mode, InputMode::Normal) {
                InputMode::Rename { account, jid } => vec![Action::RenamePeer {
                    account,
                    jid,
                    nickname: text.trim().to_string(),
                }],
                InputMode::EditGroups { account, jid } => vec![Action::EditGroups {
                    account,
                    jid,
                    groups: parse_groups(&text),
                }],
                InputMode::Normal => vec![],
            }
        }
        KeyCode::Backspace => {
            state.input.delete_back();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.input.move_home();
            vec![]
        }
        KeyCode::End => {
            state.input.move_end();
            vec![]
        }
        KeyCode::Char(c) => {
            state.input.insert_char(c);
            vec![]
        }
        _ => vec![],
    }
}
