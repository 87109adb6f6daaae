use crate::{Participant, RaffleError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Positional identity of one pool entry, assigned at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(Uuid);

impl SlotId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub participant: Participant,
}

/// Immutable ordered copy of the pool handed to the spin engine.
#[derive(Debug, Clone)]
pub struct PoolSnapshot(Arc<[Slot]>);

impl PoolSnapshot {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.0.get(index)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.0.iter().any(|slot| slot.id == id)
    }
}

/// Remaining entrants in insertion order. Duplicate names are allowed,
/// each occupies its own slot.
#[derive(Debug, Default)]
pub struct ParticipantPool {
    slots: Vec<Slot>,
}

impl ParticipantPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot(self.slots.clone().into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    /// Replace the whole pool, giving every entry a fresh slot id.
    pub fn load(&mut self, participants: Vec<Participant>) -> Result<()> {
        if participants.is_empty() {
            return Err(RaffleError::EmptyParticipantList);
        }

        self.slots = participants
            .into_iter()
            .map(|participant| Slot {
                id: SlotId::new(),
                participant,
            })
            .collect();

        Ok(())
    }

    /// Remove exactly the slot with this id, leaving same-named entries alone.
    pub fn remove_slot(&mut self, id: SlotId) -> Result<Slot> {
        let position = self
            .slots
            .iter()
            .position(|slot| slot.id == id)
            .ok_or(RaffleError::SlotNotFound(id))?;

        Ok(self.slots.remove(position))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
