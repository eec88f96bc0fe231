//! Event types and distribution bus
//!
//! Events are broadcast to in-process subscribers and serialized as-is for
//! SSE transmission, so connected UIs learn about batch refreshes and
//! favorite toggles without polling.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Which cached surface an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Dogs,
    Shorts,
    Changes,
}

/// BarkBoard event types
///
/// Broadcast via `EventBus`; every variant carries its own timestamp so
/// SSE clients can order events without trusting delivery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CatalogEvent {
    /// A surface was refreshed from the upstream feed
    CatalogRefreshed {
        surface: Surface,
        /// Records in the new snapshot
        records: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A refresh attempt failed; the previous snapshot stays in service
    RefreshFailed {
        surface: Surface,
        error: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A favorite was toggled
    FavoritesChanged {
        id: String,
        favorite: bool,
        /// Set size after the toggle
        count: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

// ========================================
// EventBus
// ========================================

/// Central event distribution bus
///
/// Wraps a tokio broadcast channel: non-blocking publish, any number of
/// subscribers, automatic cleanup when receivers drop. Slow subscribers
/// lag and skip rather than blocking the producer.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CatalogEvent>,
    capacity: usize,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` undelivered events per
    /// subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring whether anyone is listening
    pub fn emit(&self, event: CatalogEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_reach_subscribers() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();

        bus.emit(CatalogEvent::CatalogRefreshed {
            surface: Surface::Dogs,
            records: 42,
            timestamp: chrono::Utc::now(),
        });

        match rx.recv().await.unwrap() {
            CatalogEvent::CatalogRefreshed { surface, records, .. } => {
                assert_eq!(surface, Surface::Dogs);
                assert_eq!(records, 42);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn emit_without_subscribers_is_fine() {
        let bus = EventBus::new(4);
        bus.emit(CatalogEvent::FavoritesChanged {
            id: "58123".to_string(),
            favorite: true,
            count: 1,
            timestamp: chrono::Utc::now(),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn events_serialize_with_type_tags() {
        let event = CatalogEvent::RefreshFailed {
            surface: Surface::Shorts,
            error: "timeout".to_string(),
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"RefreshFailed\""));
        assert!(json.contains("\"surface\":\"shorts\""));
    }
}
