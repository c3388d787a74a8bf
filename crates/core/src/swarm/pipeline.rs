//! # Pipeline Phases
//!
//! Progress state machine for a single pipeline run.

use serde::{Deserialize, Serialize};

/// Phase of a trip-planning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    /// Scout searching for flights
    Searching,
    /// Analyst filtering and ranking
    Analyzing,
    /// Planner rendering the itinerary
    Planning,
    /// Complete
    Complete,
    /// Halted at a stage
    Failed,
}

/// The pipeline state machine. Strictly linear: a run only ever moves
/// forward or halts.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Current phase
    pub phase: PipelinePhase,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            phase: PipelinePhase::Searching,
        }
    }
}

impl Pipeline {
    /// Create a new pipeline at the first phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next phase
    pub fn advance(&mut self) {
        self.phase = match self.phase {
            PipelinePhase::Searching => PipelinePhase::Analyzing,
            PipelinePhase::Analyzing => PipelinePhase::Planning,
            PipelinePhase::Planning => PipelinePhase::Complete,
            PipelinePhase::Complete => PipelinePhase::Complete,
            PipelinePhase::Failed => PipelinePhase::Failed,
        };
    }

    /// Halt the pipeline at the current stage
    pub fn fail(&mut self) {
        self.phase = PipelinePhase::Failed;
    }

    /// Check if the run has ended (either way)
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, PipelinePhase::Complete | PipelinePhase::Failed)
    }

    /// Check if the run reached the Planner's output
    pub fn is_success(&self) -> bool {
        self.phase == PipelinePhase::Complete
    }
}
