//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::registry::{
    Account, AccountId, ConnectionState, ContactList, Peer, Resource, Show, Subscription,
};
use crate::roster::CollapsePersistence;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default = "default_accounts")]
    pub accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            settings: SettingsConfig::default(),
            accounts: default_accounts(),
            logging: LoggingConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Persists nickname and groups for a contact, as edited in the roster.
    pub fn save_peer_details(&mut self, account: &AccountId, jid: &str, nickname: &str, groups: &[String]) {
        let Some(acct) = self.accounts.iter_mut().find(|a| a.id == account.as_str()) else {
            return;
        };
        let nickname = (!nickname.is_empty()).then(|| nickname.to_string());
        match acct.contacts.iter_mut().find(|c| c.jid == jid) {
            Some(contact) => {
                contact.nickname = nickname;
                contact.groups = groups.to_vec();
            }
            None => acct.contacts.push(ContactConfig {
                jid: jid.to_string(),
                nickname,
                groups: groups.to_vec(),
                ..ContactConfig::default()
            }),
        }
    }

    /// Drops a contact from its account. Returns whether anything was removed.
    pub fn remove_contact(&mut self, account: &AccountId, jid: &str) -> bool {
        let Some(acct) = self.accounts.iter_mut().find(|a| a.id == account.as_str()) else {
            return false;
        };
        let before = acct.contacts.len();
        acct.contacts.retain(|c| c.jid != jid);
        acct.contacts.len() != before
    }
}

/// The roster keeps its collapse string in `settings.collapsed`. Writing it
/// to disk is the caller's job (see `Action::SaveConfig`).
impl CollapsePersistence for AppConfig {
    fn load_collapsed(&self) -> String {
        self.settings.collapsed.clone()
    }

    fn save_collapsed(&mut self, value: &str) {
        self.settings.collapsed = value.to_string();
    }
}

/// How the roster is filtered, sorted and laid out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub show_only_online: bool,
    #[serde(default)]
    pub show_only_confirmed: bool,
    #[serde(default)]
    pub sort_by_status: bool,
    #[serde(default)]
    pub show_empty_groups: bool,
    /// One top-level row per account instead of a merged tree.
    #[serde(default)]
    pub view_by_account: bool,
}

/// UI preferences saved between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// `:`-joined digests of collapsed rows.
    #[serde(default)]
    pub collapsed: String,
}

/// One account and the contacts it starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub id: String,
    /// User-facing label, e.g. `"alice@example.org"`.
    pub display_name: String,
    #[serde(default = "default_group_delimiter")]
    pub group_delimiter: String,
    #[serde(default = "default_true")]
    pub auto_connect: bool,
    #[serde(default)]
    pub contacts: Vec<ContactConfig>,
}

impl AccountConfig {
    pub fn build(&self) -> (Account, ContactList) {
        let id = AccountId::from(self.id.as_str());
        let mut account = Account::new(id.clone(), self.display_name.clone());
        account.group_delimiter = self.group_delimiter.clone();
        account.connection = if self.auto_connect {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        };

        let contacts = self
            .contacts
            .iter()
            .map(|c| {
                let mut peer = c.to_peer(id.clone());
                if !self.auto_connect {
                    peer.resources.clear();
                }
                peer
            })
            .collect();
        (account, contacts)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    pub jid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub subscription: Subscription,
    #[serde(default)]
    pub asked: bool,
    #[serde(default)]
    pub pending_subscribe_id: Option<String>,
    /// Initial presence; absent means offline.
    #[serde(default)]
    pub presence: Option<Show>,
}

impl ContactConfig {
    pub fn to_peer(&self, account: AccountId) -> Peer {
        let mut peer = Peer::new(self.jid.clone(), account);
        peer.name = self.name.clone();
        peer.nickname = self.nickname.clone();
        peer.set_groups(self.groups.iter().cloned());
        peer.subscription = self.subscription;
        peer.asked = self.asked;
        peer.pending_subscribe_id = self.pending_subscribe_id.clone();
        if let Some(show) = self.presence {
            peer.resources.push(Resource::new("crabroster", show, 0));
        }
        peer
    }
}

/// Diagnostic log settings. The terminal belongs to the UI, so logs go to a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Random presence changes for demo rosters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_interval_ms(),
        }
    }
}

fn contact(jid: &str, nickname: Option<&str>, groups: &[&str], presence: Option<Show>) -> ContactConfig {
    ContactConfig {
        jid: jid.into(),
        nickname: nickname.map(Into::into),
        groups: groups.iter().map(|g| g.to_string()).collect(),
        subscription: Subscription::Both,
        presence,
        ..ContactConfig::default()
    }
}

fn default_accounts() -> Vec<AccountConfig> {
    vec![
        AccountConfig {
            id: "work".into(),
            display_name: "alice@corp.example".into(),
            group_delimiter: default_group_delimiter(),
            auto_connect: true,
            contacts: vec![
                contact("bob@corp.example", Some("Bob"), &["Team::Backend"], Some(Show::Available)),
                contact("carol@corp.example", Some("Carol"), &["Team::Backend"], Some(Show::Dnd)),
                contact("dan@corp.example", Some("Dan"), &["Team::Frontend"], None),
                contact("erin@corp.example", None, &["Team", "Friends"], Some(Show::Away)),
                contact("hr@corp.example", Some("HR"), &[], None),
                ContactConfig {
                    jid: "new.hire@corp.example".into(),
                    pending_subscribe_id: Some("sub-1".into()),
                    ..ContactConfig::default()
                },
            ],
        },
        AccountConfig {
            id: "home".into(),
            display_name: "alice@home.example".into(),
            group_delimiter: default_group_delimiter(),
            auto_connect: true,
            contacts: vec![
                contact("mallory@home.example", Some("mallory"), &["Friends"], Some(Show::Xa)),
                contact("trent@home.example", Some("Trent"), &["Friends"], None),
                contact("mum@home.example", Some("Mum"), &["Family"], Some(Show::Chat)),
                ContactConfig {
                    jid: "oscar@home.example".into(),
                    asked: true,
                    groups: vec!["Friends".into()],
                    ..ContactConfig::default()
                },
            ],
        },
    ]
}

fn default_true() -> bool {
    true
}
fn default_group_delimiter() -> String {
    "::".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crabroster")
        .join("crabroster.log")
}
fn default_interval_ms() -> u64 {
    1500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.accounts.len(), 2);
        assert!(!config.display.view_by_account);
        assert!(!config.display.show_only_online);
        assert_eq!(config.settings.collapsed, "");
        assert!(config.simulation.enabled);
    }

    #[test]
    fn test_parse_accounts() {
        let config: AppConfig = toml::from_str(
            r#"
            [display]
            sort_by_status = true
            view_by_account = true

            [settings]
            collapsed = "abc:def"

            [[accounts]]
            id = "a1"
            display_name = "me@x"
            group_delimiter = "/"
            auto_connect = false

            [[accounts.contacts]]
            jid = "bob@x"
            groups = ["Work/Team"]
            subscription = "both"
            presence = "dnd"
            "#,
        )
        .unwrap();

        assert!(config.display.sort_by_status);
        assert!(config.display.view_by_account);
        assert_eq!(config.load_collapsed(), "abc:def");

        let (account, contacts) = config.accounts[0].build();
        assert_eq!(account.group_delimiter, "/");
        assert!(account.is_disconnected());
        let bob = contacts.get("bob@x").unwrap();
        assert_eq!(bob.subscription, Subscription::Both);
        // Disconnected accounts start with everyone offline.
        assert!(!bob.is_online());
    }

    #[test]
    fn test_save_peer_details() {
        let mut config = AppConfig::default();
        let work = AccountId::from("work");
        config.save_peer_details(&work, "dan@corp.example", "Danny", &["Ops".to_string()]);
        config.save_peer_details(&work, "zoe@corp.example", "", &[]);

        let contacts = &config.accounts[0].contacts;
        let dan = contacts.iter().find(|c| c.jid == "dan@corp.example").unwrap();
        assert_eq!(dan.nickname.as_deref(), Some("Danny"));
        assert_eq!(dan.groups, vec!["Ops".to_string()]);
        let zoe = contacts.iter().find(|c| c.jid == "zoe@corp.example").unwrap();
        assert!(zoe.nickname.is_none());
    }

    #[test]
    fn test_remove_contact() {
        let mut config = AppConfig::default();
        let home = AccountId::from("home");
        assert!(config.remove_contact(&home, "mum@home.example"));
        assert!(!config.remove_contact(&home, "mum@home.example"));
        assert!(!config.remove_contact(&AccountId::from("nope"), "mum@home.example"));
        assert_eq!(config.accounts[1].contacts.len(), 3);
    }

    #[test]
    fn test_collapse_persistence_round_trip() {
        let mut config = AppConfig::default();
        config.save_collapsed("k1:k2");
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.load_collapsed(), "k1:k2");
    }
}
