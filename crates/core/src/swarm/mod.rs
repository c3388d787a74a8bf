//! # Swarm Orchestration
//!
//! Sequences the trip-planning agents.
//!
//! ## Pipeline Flow
//!
//! ```text
//! Trip request → Scout → Analyst → Planner → itinerary + TRIP_FINALIZED
//! ```

pub mod coordinator;
pub mod events;
pub mod pipeline;

pub use coordinator::{Coordinator, CoordinatorConfig, PipelineRun};
pub use events::{PipelineEvent, PipelineEventKind};
pub use pipeline::{Pipeline, PipelinePhase};
