//! # Voyager Agents
//!
//! The three pipeline stages, each behind the same contract:
//!
//! ```text
//! User request → ScoutAgent → AnalystAgent → PlannerAgent → itinerary
//! ```
//!
//! Every agent receives one textual message and returns one textual
//! message. Protocol failures (wrong status tag, missing data) are
//! normal outcomes reported as explanatory message text, never `Err`;
//! `Err` is reserved for infrastructure-class failures.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::models::TripStatus;

pub mod analyst;
pub mod planner;
pub mod scout;

pub use analyst::AnalystAgent;
pub use planner::PlannerAgent;
pub use scout::ScoutAgent;

/// Static capability descriptor an agent advertises to its host.
#[derive(Debug, Clone, Serialize)]
pub struct AgentCard {
    /// Stable agent identifier (e.g., "scout-agent")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// What the agent does
    pub description: &'static str,
    /// Capability tags for discovery
    pub tags: &'static [&'static str],
    /// Example inputs the agent understands
    pub examples: &'static [&'static str],
}

/// Contract implemented by every pipeline stage.
///
/// `process` is message-in, message-out and takes `&self`: agents hold
/// only immutable configuration, so one instance may serve concurrent
/// pipeline runs.
#[async_trait]
pub trait TripAgent: Send + Sync {
    /// The agent's capability card.
    fn card(&self) -> AgentCard;

    /// Status tag this agent requires on incoming messages, if any.
    /// The Scout returns `None`: it also accepts raw natural language.
    fn expected_status(&self) -> Option<TripStatus>;

    /// Validate, extract, compute, and encode the next message.
    async fn process(&self, message: &str) -> Result<String>;
}
