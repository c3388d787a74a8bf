//! # Pipeline Coordinator
//!
//! Sequences the three agents — Scout, Analyst, Planner — feeding each
//! stage's output message to the next stage, with every hand-off
//! validated against the protocol's status tags.
//!
//! A stage that answers with explanatory text instead of its output tag
//! HALTS the run: downstream validation would fail anyway, so the
//! stage's text becomes the run's final output. Halts are outcomes, not
//! errors; `run` only returns `Err` for infrastructure-class failures
//! (a stage producing nothing at all).

use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::agents::{AgentCard, AnalystAgent, PlannerAgent, ScoutAgent, TripAgent};
use crate::models::TripStatus;
use crate::protocol::extract_status;

use super::events::{PipelineEvent, PipelineEventKind};
use super::pipeline::Pipeline;

/// Configuration for the coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// How many ranked options the Analyst keeps
    pub top_n: usize,
    /// Simulated flight-search latency in milliseconds
    pub search_latency_ms: u64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            top_n: 2,
            search_latency_ms: 1000,
        }
    }
}

/// Outcome of a single pipeline run
#[derive(Debug)]
pub struct PipelineRun {
    /// Final text: the itinerary plus TRIP_FINALIZED message on
    /// success, or the halting stage's explanation
    pub output: String,
    /// Whether the run reached a finalized itinerary
    pub success: bool,
    /// Events that occurred
    pub events: Vec<PipelineEvent>,
}

/// The pipeline coordinator
pub struct Coordinator {
    /// Fixed ordered stage list: Scout, Analyst, Planner
    agents: Vec<Box<dyn TripAgent>>,
    pipeline: Pipeline,
    events: Vec<PipelineEvent>,
    event_tx: Option<mpsc::Sender<PipelineEvent>>,
}

impl Coordinator {
    /// Create a coordinator with its three agents built once; the same
    /// instances are reused across calls to [`run`](Self::run).
    pub fn new(config: CoordinatorConfig) -> Self {
        let agents: Vec<Box<dyn TripAgent>> = vec![
            Box::new(ScoutAgent::with_latency(Duration::from_millis(
                config.search_latency_ms,
            ))),
            Box::new(AnalystAgent::with_top_n(config.top_n)),
            Box::new(PlannerAgent::new()),
        ];

        for agent in &agents {
            debug!("Registered agent: {}", agent.card().id);
        }

        Self {
            agents,
            pipeline: Pipeline::new(),
            events: Vec::new(),
            event_tx: None,
        }
    }

    /// Set event channel for streaming events to a host
    pub fn with_event_channel(mut self, tx: mpsc::Sender<PipelineEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Capability cards of the registered agents, in pipeline order
    pub fn agent_cards(&self) -> Vec<AgentCard> {
        self.agents.iter().map(|a| a.card()).collect()
    }

    /// Emit an event
    async fn emit(&mut self, event: PipelineEvent) {
        self.events.push(event.clone());
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    /// Status tag the coordinator expects on a stage's output. The
    /// Planner's output is the combined itinerary plus TRIP_FINALIZED
    /// message, so it is checked by containment instead.
    fn hand_off_tag(index: usize) -> Option<TripStatus> {
        match index {
            0 => Some(TripStatus::FlightOptions),
            1 => Some(TripStatus::FilteredOptions),
            _ => None,
        }
    }

    /// Run the full pipeline for one trip request
    #[tracing::instrument(skip(self), fields(destination = %destination, budget = budget))]
    pub async fn run(&mut self, destination: &str, budget: u32, dates: &str) -> Result<PipelineRun> {
        self.pipeline = Pipeline::new();
        self.events.clear();

        self.emit(
            PipelineEvent::new(PipelineEventKind::PipelineStarted, "coordinator").with_data(
                serde_json::json!({
                    "destination": destination,
                    "budget": budget,
                    "dates": dates,
                }),
            ),
        )
        .await;

        // The initial request travels as natural language; the Scout's
        // parser accepts it directly.
        let mut message = format!(
            "Plan a trip to {} with budget ${} on {}",
            destination, budget, dates
        );

        for index in 0..self.agents.len() {
            let agent_id = self.agents[index].card().id;

            self.emit(PipelineEvent::new(PipelineEventKind::AgentStarted, agent_id))
                .await;
            info!("Stage {}: {} processing...", index + 1, agent_id);

            let output = self.agents[index].process(&message).await?;

            if output.trim().is_empty() {
                bail!("Agent {} produced no output", agent_id);
            }

            let delivered = match Self::hand_off_tag(index) {
                Some(expected) => extract_status(&output) == Some(expected),
                None => output.contains(TripStatus::TripFinalized.as_str()),
            };

            if !delivered {
                warn!("Pipeline halted at {}: {}", agent_id, output);
                self.pipeline.fail();
                self.emit(
                    PipelineEvent::new(PipelineEventKind::AgentHalted, agent_id)
                        .with_data(serde_json::json!({ "explanation": output })),
                )
                .await;
                self.emit(PipelineEvent::new(
                    PipelineEventKind::PipelineHalted,
                    "coordinator",
                ))
                .await;

                return Ok(PipelineRun {
                    output,
                    success: false,
                    events: self.events.clone(),
                });
            }

            self.emit(PipelineEvent::new(
                PipelineEventKind::AgentCompleted,
                agent_id,
            ))
            .await;
            self.pipeline.advance();
            message = output;
        }

        self.emit(PipelineEvent::new(
            PipelineEventKind::PipelineCompleted,
            "coordinator",
        ))
        .await;

        debug_assert!(self.pipeline.is_success());
        info!("Pipeline complete for {}", destination);

        Ok(PipelineRun {
            output: message,
            success: true,
            events: self.events.clone(),
        })
    }
}
