use tracing::debug;
use uuid::Uuid;

use super::drag::{DragSession, DropOutcome, ReorderSubmission, SyncNotice};
use super::ordered::OrderedEntity;

/// List-level synchronization state.
///
/// Mutations to individual rows are tracked per entity by
/// [`super::InflightTracker`] and do not move this machine; only a reorder is
/// list-wide and therefore serialized through `PersistingReorder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    PersistingReorder,
}

/// Local snapshot of one admin grid, kept consistent with server truth by
/// reconciling mutation responses and, after a failed reorder, a full resync.
#[derive(Debug)]
pub struct ListSync<T: OrderedEntity> {
    items: Vec<T>,
    state: SyncState,
    drag: Option<DragSession>,
    needs_resync: bool,
}

impl<T: OrderedEntity> ListSync<T> {
    /// Build a snapshot from server rows, ordered by persisted sort position.
    pub fn seed(mut items: Vec<T>) -> Self {
        items.sort_by_key(|item| item.sort_order());
        Self {
            items,
            state: SyncState::Idle,
            drag: None,
            needs_resync: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn ordered_ids(&self) -> Vec<Uuid> {
        self.items.iter().map(|item| item.entity_id()).collect()
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn needs_resync(&self) -> bool {
        self.needs_resync
    }

    /// Reconcile a mutation response into the snapshot: replace the row in
    /// place when the id is present, append when it is new.
    pub fn merge(&mut self, record: T) {
        match self
            .items
            .iter_mut()
            .find(|item| item.entity_id() == record.entity_id())
        {
            Some(existing) => *existing = record,
            None => self.items.push(record),
        }
    }

    /// Drop a deleted row from the snapshot. Unknown ids are ignored.
    pub fn remove(&mut self, entity_id: Uuid) {
        self.items.retain(|item| item.entity_id() != entity_id);
    }

    /// Open a drag session for `entity_id`. Returns false when the entity is
    /// unknown or a reorder is already persisting.
    pub fn begin_drag(&mut self, entity_id: Uuid) -> bool {
        if self.state != SyncState::Idle || self.drag.is_some() {
            return false;
        }
        let Some(source_index) = self
            .items
            .iter()
            .position(|item| item.entity_id() == entity_id)
        else {
            return false;
        };
        self.drag = Some(DragSession {
            entity_id,
            source_index,
        });
        true
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Close the active drag session with a drop at `target_index`.
    ///
    /// A drop on the source position or outside the list is a no-op. A drop
    /// whose target row belongs to a different partition is rejected before
    /// any state change. Otherwise the snapshot is reordered synchronously,
    /// sort positions inside the affected partition are rewritten to match
    /// their new indices, and the ordering to persist is returned.
    pub fn drop_at(&mut self, target_index: usize) -> DropOutcome {
        let Some(drag) = self.drag.take() else {
            return DropOutcome::Noop;
        };

        if target_index >= self.items.len() || target_index == drag.source_index {
            return DropOutcome::Noop;
        }

        let partition = self.items[drag.source_index].partition_key();
        if self.items[target_index].partition_key() != partition {
            debug!(
                entity_id = %drag.entity_id,
                "cross-partition drop rejected"
            );
            return DropOutcome::Rejected(SyncNotice::CrossPartitionRejected);
        }

        let moved = self.items.remove(drag.source_index);
        self.items.insert(target_index, moved);

        // Rewrite sort positions inside the partition only; rows in other
        // partitions keep their relative order and persisted values.
        let mut position = 0i32;
        let mut ordered_ids = Vec::new();
        for item in &mut self.items {
            if item.partition_key() == partition {
                item.set_sort_order(position);
                ordered_ids.push(item.entity_id());
                position += 1;
            }
        }

        self.state = SyncState::PersistingReorder;
        DropOutcome::Submit(ReorderSubmission {
            partition,
            ordered_ids,
        })
    }

    /// The reorder endpoint confirmed the submitted ordering.
    pub fn reorder_succeeded(&mut self) {
        self.state = SyncState::Idle;
    }

    /// Persisting the reorder failed. The optimistic order stays on screen
    /// until the next resync brings back server truth; no precise rollback
    /// is attempted.
    pub fn reorder_failed(&mut self) -> SyncNotice {
        self.state = SyncState::Idle;
        self.needs_resync = true;
        SyncNotice::ReorderFailed
    }

    /// Replace the snapshot with freshly fetched server rows.
    pub fn resync(&mut self, mut items: Vec<T>) {
        items.sort_by_key(|item| item.sort_order());
        self.items = items;
        self.state = SyncState::Idle;
        self.drag = None;
        self.needs_resync = false;
    }
}
