use std::fmt;

use uuid::Uuid;

/// An in-progress drag, opened by `begin_drag` and closed by `drop_at` or
/// `cancel_drag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub entity_id: Uuid,
    pub source_index: usize,
}

/// The ordering to persist after a successful drop.
///
/// `ordered_ids` lists every entity sharing the dragged entity's partition,
/// in final display order. The partition key travels with the submission so
/// the reorder endpoint can scope its batch update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderSubmission {
    pub partition: Option<Uuid>,
    pub ordered_ids: Vec<Uuid>,
}

/// Result of closing a drag session with a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing changed: no active drag, same position, or invalid target.
    Noop,
    /// The drop was refused before any state change.
    Rejected(SyncNotice),
    /// The snapshot was reordered; persist this submission.
    Submit(ReorderSubmission),
}

/// User-visible notification raised by the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncNotice {
    /// The drop target belongs to a different partition than the dragged
    /// entity; ordering across partitions is not allowed.
    CrossPartitionRejected,
    /// Persisting a reorder failed; the snapshot will be resynchronized
    /// from the server.
    ReorderFailed,
}

impl fmt::Display for SyncNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncNotice::CrossPartitionRejected => {
                write!(f, "items can only be reordered within their own category")
            }
            SyncNotice::ReorderFailed => {
                write!(f, "saving the new order failed; reloading the list")
            }
        }
    }
}
