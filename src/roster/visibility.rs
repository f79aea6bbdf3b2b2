use crate::registry::Peer;

/// Which peers the display settings let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityFilter {
    pub show_offline: bool,
    pub show_waiting: bool,
}

impl VisibilityFilter {
    pub fn is_nominally_visible(self, peer: &Peer) -> bool {
        is_nominally_visible(peer, self.show_waiting)
    }

    pub fn should_display(self, peer: &Peer) -> bool {
        should_display(peer, self.show_offline, self.show_waiting)
    }
}

/// A peer counts toward totals when we have a subscription, or when we are
/// showing waiting requests and one is open in either direction.
pub fn is_nominally_visible(peer: &Peer, show_waiting: bool) -> bool {
    peer.subscription.is_established()
        || (show_waiting && (peer.has_pending_request() || peer.asked))
}

pub fn should_display(peer: &Peer, show_offline: bool, show_waiting: bool) -> bool {
    is_nominally_visible(peer, show_waiting) && (show_offline || peer.is_online() || peer.asked)
}

/// Online for counting purposes; an unanswered inbound request masks presence.
pub fn is_online(peer: &Peer) -> bool {
    !peer.has_pending_request() && peer.is_online()
}
