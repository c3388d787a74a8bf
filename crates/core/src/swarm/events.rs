//! # Pipeline Events
//!
//! Progress events a host can observe while a run executes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of pipeline event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineEventKind {
    /// Run started
    PipelineStarted,
    /// Agent started working
    AgentStarted,
    /// Agent produced its expected output message
    AgentCompleted,
    /// Agent produced explanatory text instead of its output status
    AgentHalted,
    /// Run produced a finalized itinerary
    PipelineCompleted,
    /// Run halted before the Planner finished
    PipelineHalted,
}

/// An event in a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// Unique event ID
    pub id: String,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Kind of event
    pub kind: PipelineEventKind,
    /// Agent (or "coordinator") that produced this event
    pub agent: String,
    /// Associated data (JSON)
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl PipelineEvent {
    /// Create a new event
    pub fn new(kind: PipelineEventKind, agent: &str) -> Self {
        Self {
            id: event_id(),
            timestamp: Utc::now(),
            kind,
            agent: agent.to_string(),
            data: None,
        }
    }

    /// Add data to the event
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Generate a lightweight unique event ID
fn event_id() -> String {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos();
    format!("{:x}-{:x}", nanos, rand_u32())
}

/// Simple random number (not cryptographic)
fn rand_u32() -> u32 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};
    RandomState::new().build_hasher().finish() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = PipelineEvent::new(PipelineEventKind::AgentStarted, "scout-agent")
            .with_data(serde_json::json!({ "budget": 800 }));

        assert_eq!(event.agent, "scout-agent");
        assert_eq!(event.kind, PipelineEventKind::AgentStarted);
        assert!(event.data.is_some());
    }

    #[test]
    fn test_event_serialization() {
        let event = PipelineEvent::new(PipelineEventKind::PipelineHalted, "coordinator");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"pipeline_halted\""));
    }
}
