//! # Voyager Models
//!
//! Domain types exchanged between the trip-planning agents.
//! These types travel inside the wire envelope built by the `protocol`
//! module; nothing here outlives a single pipeline run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status tags for the trip-planning pipeline.
///
/// Declaration order matters: `protocol::extract_status` scans the
/// variants in this order when prefix-matching an incoming message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripStatus {
    /// Initial user request, consumed by the Scout
    #[serde(rename = "PLAN_TRIP")]
    PlanTrip,
    /// Raw candidates from the Scout, consumed by the Analyst
    #[serde(rename = "FLIGHT_OPTIONS")]
    FlightOptions,
    /// Ranked subset from the Analyst, consumed by the Planner
    #[serde(rename = "FILTERED_OPTIONS")]
    FilteredOptions,
    /// Terminal message from the Planner
    #[serde(rename = "TRIP_FINALIZED")]
    TripFinalized,
}

impl TripStatus {
    /// All statuses in pipeline order (the scan order for decoding).
    pub fn all() -> [TripStatus; 4] {
        [
            TripStatus::PlanTrip,
            TripStatus::FlightOptions,
            TripStatus::FilteredOptions,
            TripStatus::TripFinalized,
        ]
    }

    /// Wire name of the status tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::PlanTrip => "PLAN_TRIP",
            TripStatus::FlightOptions => "FLIGHT_OPTIONS",
            TripStatus::FilteredOptions => "FILTERED_OPTIONS",
            TripStatus::TripFinalized => "TRIP_FINALIZED",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trip-planning request. Immutable once constructed; flows unchanged
/// through all three stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Destination city (e.g., "Paris")
    pub destination: String,
    /// Maximum budget in whole dollars
    pub budget: u32,
    /// Travel date, free-form or ISO (no calendar validation)
    pub dates: String,
}

impl TripRequest {
    pub fn new(destination: impl Into<String>, budget: u32, dates: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            budget,
            dates: dates.into(),
        }
    }
}

/// A single flight option produced by the Scout's search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOption {
    pub airline: String,
    /// Ticket price in whole dollars
    pub price: u32,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    /// Number of layovers
    pub stops: u32,
    /// "Economy", "Premium", "Luxury"
    pub comfort_rating: String,
}

/// JSON payload body of a wire envelope.
///
/// `details` is always present; the typed fields appear only when the
/// sending stage has data for them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripPayload {
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_request: Option<TripRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flights: Option<Vec<FlightOption>>,
}
