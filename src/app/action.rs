use crate::registry::{Account, AccountId};
use crate::roster::ContextTarget;

#[derive(Debug)]
pub enum Action {
    OpenConversation { account: Account, peer: String },
    ShowMenu(ContextTarget),
    RenamePeer { account: AccountId, jid: String, nickname: String },
    EditGroups { account: AccountId, jid: String, groups: Vec<String> },
    RemovePeer { account: AccountId, jid: String },
    ToggleConnection { account: AccountId },
    ReloadContacts,
    SaveConfig,
    Quit,
}
