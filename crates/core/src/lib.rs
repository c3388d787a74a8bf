//! # Voyager Core
//!
//! A three-agent trip-planning pipeline:
//!
//! 1. Scout Agent — searches for flight options (simulated provider)
//! 2. Analyst Agent — filters by budget, ranks by price
//! 3. Planner Agent — renders the final itinerary
//!
//! Agents exchange line-oriented wire messages
//! (`<STATUS> | <Sender> -> <Receiver>: <json>`); the coordinator
//! validates every hand-off against the protocol's status tags. Network
//! transport and remote hosting are the embedding host's concern — every
//! stage is a plain message-in/message-out async call.
//!
//! ## Architecture
//!
//! - `models` — domain types (TripRequest, FlightOption, TripStatus)
//! - `protocol` — wire-message codec and natural-language extraction
//! - `agents` — the stage contract and the three agent implementations
//! - `swarm` — pipeline orchestration and progress events
//!
//! ## Usage
//!
//! ```rust,ignore
//! let itinerary = voyager_core::run_pipeline("Paris", 800, "2026-03-10").await?;
//! println!("{itinerary}");
//! ```

pub mod agents;
pub mod models;
pub mod protocol;
pub mod swarm;

use anyhow::Result;
use swarm::{Coordinator, CoordinatorConfig};

/// Run the complete trip-planning pipeline with default configuration.
///
/// Synthesizes a natural-language request from the arguments, runs the
/// three agents in order, and returns the final combined text (the
/// itinerary plus the TRIP_FINALIZED message, or the halting stage's
/// explanation).
pub async fn run_pipeline(destination: &str, budget: u32, dates: &str) -> Result<String> {
    let mut coordinator = Coordinator::new(CoordinatorConfig::default());
    let run = coordinator.run(destination, budget, dates).await?;
    Ok(run.output)
}
