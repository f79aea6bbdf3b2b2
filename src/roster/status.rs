//! Semantic status classes for peers and accounts.

use crate::registry::{Account, ConnectionState, Peer, Show};

/// Status class of a peer. Variant order is the status sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusClass {
    Available,
    Away,
    ExtendedAway,
    Busy,
    Offline,
    Unknown,
}

impl StatusClass {
    pub fn classify(peer: &Peer) -> Self {
        if peer.has_pending_request() || peer.asked {
            return StatusClass::Unknown;
        }

        match peer.main_status() {
            None => StatusClass::Offline,
            Some(Show::Dnd) => StatusClass::Busy,
            Some(Show::Xa) => StatusClass::ExtendedAway,
            Some(Show::Away) => StatusClass::Away,
            Some(Show::Available | Show::Chat) => StatusClass::Available,
        }
    }

    pub fn icon(self) -> StatusIcon {
        match self {
            StatusClass::Available => StatusIcon::Available,
            StatusClass::Away => StatusIcon::Away,
            StatusClass::ExtendedAway => StatusIcon::ExtendedAway,
            StatusClass::Busy => StatusIcon::Busy,
            StatusClass::Offline => StatusIcon::Offline,
            StatusClass::Unknown => StatusIcon::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusClass::Available => "available",
            StatusClass::Away => "away",
            StatusClass::ExtendedAway => "extended-away",
            StatusClass::Busy => "busy",
            StatusClass::Offline => "offline",
            StatusClass::Unknown => "unknown",
        }
    }
}

/// Icon keys resolved by the theme at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusIcon {
    Available,
    Away,
    ExtendedAway,
    Busy,
    Offline,
    Unknown,
    Connecting,
}

impl StatusIcon {
    pub fn for_account(account: &Account) -> Self {
        match account.connection {
            ConnectionState::Disconnected => StatusIcon::Offline,
            ConnectionState::Connected => StatusIcon::Available,
            ConnectionState::Connecting => StatusIcon::Connecting,
        }
    }
}

/// Color keys resolved by the theme at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    PeerOnlineForeground,
    PeerOfflineForeground,
    PeerBackground,
    GroupBackground,
    AccountOnlineBackground,
    AccountOfflineBackground,
}

impl ColorKey {
    /// Foreground only distinguishes online from offline.
    pub fn peer_foreground(peer: &Peer) -> Self {
        if peer.is_online() {
            ColorKey::PeerOnlineForeground
        } else {
            ColorKey::PeerOfflineForeground
        }
    }

    pub fn account_background(account: &Account) -> Self {
        if account.is_disconnected() {
            ColorKey::AccountOfflineBackground
        } else {
            ColorKey::AccountOnlineBackground
        }
    }
}
