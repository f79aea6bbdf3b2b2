use thiserror::Error;

/// Lookup failures against the account registry.
///
/// These are the only failures the roster core produces. Event handlers
/// generally treat them as a stale click and drop the event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("account {0} not found")]
    AccountNotFound(String),

    #[error("could not find peer {jid} on account {account}")]
    PeerNotFound { account: String, jid: String },
}
