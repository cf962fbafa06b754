//! Per-entity mutation tracking.
//!
//! Rapid repeated mutations to one entity may complete out of order on the
//! wire. Each mutation takes a ticket carrying a per-entity sequence number;
//! a completion only applies if its ticket is still the latest issued for
//! that entity, so a stale response can never overwrite a newer one.

use std::collections::HashMap;

use uuid::Uuid;

/// Handle for one issued mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationTicket {
    pub entity_id: Uuid,
    sequence: u64,
}

/// Tracks which entities have a mutation in flight and which sequence number
/// is current for each.
#[derive(Debug, Default)]
pub struct InflightTracker {
    sequences: HashMap<Uuid, u64>,
    in_flight: HashMap<Uuid, u64>,
}

impl InflightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new mutation against `entity_id`.
    ///
    /// Issuing a newer ticket supersedes any earlier in-flight mutation for
    /// the same entity: the earlier completion will be reported as stale.
    pub fn begin_mutation(&mut self, entity_id: Uuid) -> MutationTicket {
        let sequence = self
            .sequences
            .entry(entity_id)
            .and_modify(|s| *s += 1)
            .or_insert(1);
        let sequence = *sequence;
        self.in_flight.insert(entity_id, sequence);
        MutationTicket {
            entity_id,
            sequence,
        }
    }

    /// Report a completed mutation. Returns true when the result should be
    /// applied, false when a newer mutation superseded this ticket.
    pub fn complete_mutation(&mut self, ticket: MutationTicket) -> bool {
        match self.in_flight.get(&ticket.entity_id) {
            Some(current) if *current == ticket.sequence => {
                self.in_flight.remove(&ticket.entity_id);
                true
            }
            _ => false,
        }
    }

    /// Whether `entity_id` has a mutation outstanding. Views use this to
    /// disable that entity's controls without touching the rest of the grid.
    pub fn is_in_flight(&self, entity_id: Uuid) -> bool {
        self.in_flight.contains_key(&entity_id)
    }
}
