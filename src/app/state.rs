use crate::config::{AppConfig, DisplayConfig};
use crate::registry::{Account, AccountId, AccountRegistry};
use crate::roster::{
    ContextTarget, RenderTarget, RowKind, RowPath, RowTree, RosterSynchronizer, StatusClass,
};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::{Duration, Instant};

const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Rename { account: AccountId, jid: String },
    EditGroups { account: AccountId, jid: String },
}

/// What the right-hand panel shows.
#[derive(Debug, Clone)]
pub enum Detail {
    Conversation {
        account: Account,
        peer: String,
        name: String,
        status: StatusClass,
    },
    Menu(ContextTarget),
}

/// Identity of the selected row, used to keep the cursor in place across rebuilds.
#[derive(Debug, Clone, PartialEq)]
struct SelectionKey {
    kind: RowKind,
    id: String,
    account: Option<AccountId>,
}

pub struct AppState {
    pub config: AppConfig,
    pub roster: RosterSynchronizer<RowTree>,
    pub selected: usize,
    pub input: InputState,
    pub mode: InputMode,
    pub detail: Option<Detail>,
    pub status_message: Option<(String, Instant)>,
    pub last_rebuild: Option<DateTime<Local>>,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig, registry: Arc<AccountRegistry>) -> Self {
        let roster = RosterSynchronizer::new(registry, RowTree::new(), config.display.clone(), &config);
        let mut state = Self {
            config,
            roster,
            selected: 0,
            input: InputState::new(),
            mode: InputMode::Normal,
            detail: None,
            status_message: None,
            last_rebuild: None,
            should_quit: false,
            dirty: true,
        };
        state.rebuild();
        state
    }

    /// Full roster rebuild that keeps the cursor on the same row when it survives.
    pub fn rebuild(&mut self) {
        let key = self.selection_key();
        self.roster.redraw();
        self.restore_selection(key);
        self.last_rebuild = Some(Local::now());
        self.dirty = true;
    }

    /// Cursor bookkeeping after the roster rebuilt itself (e.g. a collapse toggle).
    pub fn after_roster_change(&mut self, previous: Option<RowPath>) {
        let key = previous.and_then(|p| self.key_at(&p));
        self.restore_selection(key);
        self.last_rebuild = Some(Local::now());
        self.dirty = true;
    }

    pub fn visible_len(&self) -> usize {
        self.roster.target().visible_rows().len()
    }

    pub fn selected_path(&self) -> Option<RowPath> {
        self.roster
            .target()
            .visible_rows()
            .into_iter()
            .nth(self.selected)
            .map(|(path, _)| path)
    }

    pub fn move_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
        self.dirty = true;
    }

    pub fn move_down(&mut self, n: usize) {
        let len = self.visible_len();
        if len > 0 {
            self.selected = (self.selected + n).min(len - 1);
        }
        self.dirty = true;
    }

    pub fn move_end(&mut self) {
        self.selected = self.visible_len().saturating_sub(1);
        self.dirty = true;
    }

    /// Applies a display setting change and rebuilds.
    pub fn update_display<F>(&mut self, f: F)
    where
        F: FnOnce(&mut DisplayConfig),
    {
        f(&mut self.config.display);
        let key = self.selection_key();
        self.roster.set_display(self.config.display.clone());
        self.restore_selection(key);
        self.last_rebuild = Some(Local::now());
        self.dirty = true;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.dirty = true;
    }

    pub fn expire_status(&mut self, now: Instant) {
        if let Some((_, at)) = &self.status_message {
            if now.duration_since(*at) >= STATUS_MESSAGE_TTL {
                self.status_message = None;
                self.dirty = true;
            }
        }
    }

    pub fn status_line(&self) -> String {
        if let Some((msg, _)) = &self.status_message {
            return msg.clone();
        }
        let snapshot = self.roster.registry().read();
        let total = snapshot.accounts().count();
        let connected = snapshot.accounts().filter(|(a, _)| a.is_connected()).count();
        format!("Accounts: {}/{}", connected, total)
    }

    fn selection_key(&self) -> Option<SelectionKey> {
        self.selected_path().and_then(|p| self.key_at(&p))
    }

    /// Account and address of the selected row when it is a peer.
    pub fn selected_peer(&self) -> Option<(AccountId, String)> {
        let path = self.selected_path()?;
        let row = &self.roster.target().node(&path)?.row;
        if row.kind != RowKind::Peer {
            return None;
        }
        Some((row.account_id.clone()?, row.id.clone()))
    }

    /// Account of the selected row. Group rows in the merged view have none.
    pub fn selected_account(&self) -> Option<AccountId> {
        let path = self.selected_path()?;
        self.roster.target().node(&path)?.row.account_id.clone()
    }

    fn key_at(&self, path: &RowPath) -> Option<SelectionKey> {
        self.roster.target().node(path).map(|n| SelectionKey {
            kind: n.row.kind,
            id: n.row.id.clone(),
            account: n.row.account_id.clone(),
        })
    }

    fn restore_selection(&mut self, key: Option<SelectionKey>) {
        let rows = self.roster.target().visible_rows();
        let found = key.and_then(|key| {
            rows.iter().position(|(_, r)| {
                r.node.row.kind == key.kind
                    && r.node.row.id == key.id
                    && r.node.row.account_id == key.account
            })
        });
        self.selected = match found {
            Some(i) => i,
            None => self.selected.min(rows.len().saturating_sub(1)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_defaults() -> AppState {
        let config = AppConfig::default();
        let registry = Arc::new(AccountRegistry::new());
        for account in &config.accounts {
            let (account, contacts) = account.build();
            registry.add_account(account, contacts);
        }
        AppState::new(config, registry)
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut state = state_with_defaults();
        let len = state.visible_len();
        assert!(len > 0);
        state.move_down(1000);
        assert_eq!(state.selected, len - 1);
        state.move_up(1000);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_selection_survives_display_change() {
        let mut state = state_with_defaults();
        let target = state
            .roster
            .target()
            .visible_rows()
            .iter()
            .position(|(_, r)| r.node.row.id == "bob@corp.example")
            .unwrap();
        state.selected = target;
        state.update_display(|d| d.view_by_account = true);

        let path = state.selected_path().unwrap();
        assert_eq!(state.roster.target().node(&path).unwrap().row.id, "bob@corp.example");
    }

    #[test]
    fn test_input_editing() {
        let mut input = InputState::new();
        input.set("Bob");
        input.move_left();
        input.insert_char('x');
        assert_eq!(input.text, "Boxb");
        input.move_end();
        input.delete_back();
        assert_eq!(input.take_text(), "Box");
        assert_eq!(input.cursor, 0);
    }
}
