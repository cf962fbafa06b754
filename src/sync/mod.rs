//! Admin list synchronization.
//!
//! Each admin grid owns a [`ListSync`] snapshot of its rows. Mutations apply
//! optimistically: the snapshot is reconciled from the mutation response the
//! moment the write succeeds, and a full refetch happens only to recover from
//! a failed reorder. Drag-and-drop ordering runs through a small state
//! machine that validates the drop, rewrites sort positions, and emits the
//! submission for the reorder endpoint.
//!
//! Concurrency is tracked per entity by [`InflightTracker`]: each mutation
//! gets a sequence ticket, and only the latest ticket for an entity may apply
//! its result, so a slow earlier response can never overwrite a newer one.

mod drag;
mod inflight;
mod list;
mod ordered;

pub use drag::{DragSession, DropOutcome, ReorderSubmission, SyncNotice};
pub use inflight::{InflightTracker, MutationTicket};
pub use list::{ListSync, SyncState};
pub use ordered::OrderedEntity;
