//! In-memory event bus.
//!
//! Keeps the most recent published envelopes in process and logs each one.
//! Used by the binary when no external broker is configured and by tests
//! for assertions.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

/// Number of envelopes retained by [`InMemoryEventBus::new`].
pub const DEFAULT_RETAINED_EVENTS: usize = 1_000;

/// In-memory event bus with bounded history.
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("assessment.scores_recalculated.v1"));
/// ```
pub struct InMemoryEventBus {
    published: RwLock<VecDeque<EventEnvelope>>,
    capacity: usize,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RETAINED_EVENTS)
    }

    /// Creates a bus that keeps at most `capacity` envelopes, dropping the oldest.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            published: RwLock::new(VecDeque::with_capacity(capacity.min(DEFAULT_RETAINED_EVENTS))),
            capacity: capacity.max(1),
        }
    }

    // === Inspection ===

    /// Returns retained events, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        match self.published.read() {
            Ok(events) => events.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.published_events().len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published_events().iter().any(|e| e.event_type == event_type)
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.published.write() {
            events.clear();
        }
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            correlation_id = ?event.metadata.correlation_id,
            "domain event published"
        );

        let mut events = self.published.write().map_err(|_| {
            DomainError::new(ErrorCode::InternalError, "event bus lock poisoned")
        })?;
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
