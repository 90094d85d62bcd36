//! Domain events and the envelope they travel in.
//!
//! Events are plain serializable structs implementing [`DomainEvent`]. The
//! event type string and aggregate type are associated constants, so an
//! event's routing identity is fixed at compile time. `to_envelope()` wraps
//! the serialized event for the [`EventPublisher`](crate::ports::EventPublisher).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::{DomainError, ErrorCode, Timestamp};

/// A fact emitted by an aggregate.
pub trait DomainEvent: Serialize + Send + Sync {
    /// Routing key with a `.vN` schema suffix, e.g. `"assessment.scores_recalculated.v1"`.
    const EVENT_TYPE: &'static str;

    /// Aggregate kind, e.g. `"SiteAssessment"`.
    const AGGREGATE_TYPE: &'static str;

    fn event_id(&self) -> &EventId;

    fn aggregate_id(&self) -> String;

    fn occurred_at(&self) -> Timestamp;

    /// Serializes the event into a transport envelope with empty metadata.
    fn to_envelope(&self) -> Result<EventEnvelope, DomainError> {
        let payload = serde_json::to_value(self).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize {}: {}", Self::EVENT_TYPE, e),
            )
        })?;

        Ok(EventEnvelope {
            event_id: self.event_id().clone(),
            event_type: Self::EVENT_TYPE.to_string(),
            schema_version: schema_version(Self::EVENT_TYPE),
            aggregate_id: self.aggregate_id(),
            aggregate_type: Self::AGGREGATE_TYPE.to_string(),
            occurred_at: self.occurred_at(),
            payload,
            metadata: EventMetadata::default(),
        })
    }
}

/// Schema version from the `.vN` suffix of an event type; 1 when absent.
fn schema_version(event_type: &str) -> u32 {
    event_type
        .rsplit_once(".v")
        .and_then(|(_, version)| version.parse().ok())
        .unwrap_or(1)
}

/// Unique event identifier, used by consumers for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request context carried alongside an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    /// User whose command produced the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Where the originating command came from ("api", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A serialized event ready for publishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub schema_version: u32,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Builds an envelope around an arbitrary payload.
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        aggregate_type: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        let event_type = event_type.into();
        Self {
            event_id: EventId::new(),
            schema_version: schema_version(&event_type),
            event_type,
            aggregate_id: aggregate_id.into(),
            aggregate_type: aggregate_type.into(),
            occurred_at: Timestamp::now(),
            payload,
            metadata: EventMetadata::default(),
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(id.into());
        self
    }

    pub fn with_user_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.user_id = Some(id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata.source = Some(source.into());
        self
    }
}
