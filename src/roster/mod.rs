//! Roster view-model: turns registry contents into a collapsible row tree.

pub mod collapse;
pub mod counter;
pub mod group;
pub mod row;
pub mod sort;
pub mod status;
pub mod sync;
pub mod visibility;

pub use collapse::CollapsePersistence;
pub use row::{RenderTarget, RowKind, RowPath, RowTree, VisibleRow};
pub use status::{ColorKey, StatusClass, StatusIcon};
pub use sync::{Activation, ContextTarget, RosterSynchronizer};
