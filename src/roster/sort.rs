use crate::registry::Peer;

use super::status::StatusClass;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Raw string order of the presentation name, so case-sensitive.
    #[default]
    ByName,
    ByStatus,
}

impl SortMode {
    pub fn from_sort_by_status(sort_by_status: bool) -> Self {
        if sort_by_status {
            SortMode::ByStatus
        } else {
            SortMode::ByName
        }
    }

    /// Stable sort of a group's direct members.
    pub fn sort(self, peers: &mut [&Peer]) {
        match self {
            SortMode::ByName => {
                peers.sort_by(|a, b| a.name_for_presentation().cmp(b.name_for_presentation()))
            }
            SortMode::ByStatus => peers.sort_by_key(|p| StatusClass::classify(p)),
        }
    }
}
