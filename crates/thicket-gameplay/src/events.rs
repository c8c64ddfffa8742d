//! Event bus for behavior notifications.
//!
//! Death, damage, and behavior-state transitions are delivered as
//! events rather than callbacks: entities publish, the scene (or the
//! excluded outer layers) drain.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use thicket_common::EntityId;

/// Event types that can be sent through the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Entity took damage
    Damaged {
        /// Entity that was hit
        entity: EntityId,
        /// Damage amount
        amount: i32,
        /// Attacking entity, if any
        source: Option<EntityId>,
    },
    /// Entity's hit points reached zero (published exactly once)
    Died {
        /// Entity that died
        entity: EntityId,
    },
    /// A dormant shambler came alive
    ShamblerWoke {
        /// The shambler
        entity: EntityId,
    },
    /// A hostile shambler went back to sleep
    ShamblerSlept {
        /// The shambler
        entity: EntityId,
    },
    /// The companion's fear rose
    CompanionScared {
        /// Fear added
        amount: i32,
        /// Resulting hysteria
        hysteria: i32,
    },
    /// The companion's fear fell
    CompanionCalmed {
        /// Resulting hysteria
        hysteria: i32,
    },
    /// The companion was wedged against an obstacle and refocused
    CompanionStuck {
        /// The companion
        entity: EntityId,
    },
}

/// Event bus for broadcasting events to subscribers.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: GameEvent) {
        // Non-blocking send - if full, event is dropped
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain() {
        let bus = EventBus::new(8);
        let id = EntityId::new();
        bus.publish(GameEvent::Died { entity: id });
        assert_eq!(bus.pending_count(), 1);

        let events = bus.drain();
        assert_eq!(events, vec![GameEvent::Died { entity: id }]);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_full_bus_drops_instead_of_blocking() {
        let bus = EventBus::new(1);
        let id = EntityId::new();
        bus.publish(GameEvent::Died { entity: id });
        bus.publish(GameEvent::Died { entity: id });
        assert_eq!(bus.drain().len(), 1);
    }
}
