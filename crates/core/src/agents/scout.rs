//! # Scout Agent
//!
//! The "eyes and ears" of the pipeline: turns a trip request into a
//! candidate list of flights. The search itself is simulated — a fixed
//! catalog behind an awaitable delay standing in for a remote flight
//! provider.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::agents::{AgentCard, TripAgent};
use crate::models::{FlightOption, TripStatus};
use crate::protocol::{build_trip_message, parse_trip_request};

/// Default simulated search latency.
const DEFAULT_LATENCY: Duration = Duration::from_secs(1);

/// Searches for flight options matching a trip request.
///
/// Accepts either a `PLAN_TRIP` envelope or a raw natural-language
/// request; emits a `FLIGHT_OPTIONS` message for the Analyst.
pub struct ScoutAgent {
    latency: Duration,
}

impl ScoutAgent {
    pub fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }

    /// Override the simulated search latency (tests use zero).
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Simulate a call to a flight-search provider.
    ///
    /// Sleeps for the configured latency — an independent suspension
    /// point per call, so concurrent pipeline runs are not serialized —
    /// then returns a deterministic five-option catalog spanning the
    /// price and comfort range.
    async fn search_flights(&self, destination: &str, dates: &str) -> Vec<FlightOption> {
        info!("Searching flights to {} on {}...", destination, dates);

        tokio::time::sleep(self.latency).await;

        let flights = vec![
            // Cheap and good
            FlightOption {
                airline: "Delta".to_string(),
                price: 450,
                departure_time: "08:00 AM".to_string(),
                arrival_time: "04:30 PM".to_string(),
                duration: "8h 30m".to_string(),
                stops: 1,
                comfort_rating: "Economy".to_string(),
            },
            // Over budget for most requests
            FlightOption {
                airline: "Emirates".to_string(),
                price: 1200,
                departure_time: "10:00 AM".to_string(),
                arrival_time: "06:00 PM".to_string(),
                duration: "8h 00m".to_string(),
                stops: 0,
                comfort_rating: "Premium".to_string(),
            },
            // Moderate
            FlightOption {
                airline: "United".to_string(),
                price: 600,
                departure_time: "02:00 PM".to_string(),
                arrival_time: "10:30 PM".to_string(),
                duration: "8h 30m".to_string(),
                stops: 1,
                comfort_rating: "Economy".to_string(),
            },
            // Very cheap, uncomfortable
            FlightOption {
                airline: "Spirit".to_string(),
                price: 150,
                departure_time: "05:30 AM".to_string(),
                arrival_time: "05:00 PM".to_string(),
                duration: "11h 30m".to_string(),
                stops: 2,
                comfort_rating: "Economy".to_string(),
            },
            // Way over budget
            FlightOption {
                airline: "Private Jet Charter".to_string(),
                price: 5000,
                departure_time: "Flexible".to_string(),
                arrival_time: "Flexible".to_string(),
                duration: "6h 00m".to_string(),
                stops: 0,
                comfort_rating: "Luxury".to_string(),
            },
        ];

        info!("Found {} flight options", flights.len());
        flights
    }
}

impl Default for ScoutAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TripAgent for ScoutAgent {
    fn card(&self) -> AgentCard {
        AgentCard {
            id: "scout-agent",
            name: "Scout Agent",
            description: "Searches for flight options by interfacing with \
                          flight-search providers and returns candidates for analysis.",
            tags: &["travel", "flights", "search"],
            examples: &[
                "Plan a trip to Paris with budget $800 on 2026-03-10",
                "Find flights to Tokyo with a $1000 budget for March 15",
            ],
        }
    }

    fn expected_status(&self) -> Option<TripStatus> {
        // The Scout is the entry stage: PLAN_TRIP envelopes and raw
        // natural language are both acceptable.
        None
    }

    async fn process(&self, message: &str) -> Result<String> {
        let Some(trip_request) = parse_trip_request(message.trim()) else {
            return Ok("Scout Agent: Unable to parse trip request. \
                       Please provide destination, budget, and dates."
                .to_string());
        };

        let flights = self
            .search_flights(&trip_request.destination, &trip_request.dates)
            .await;

        Ok(build_trip_message(
            TripStatus::FlightOptions,
            "Scout",
            "Analyst",
            Some(&trip_request),
            Some(&flights),
            &format!(
                "Found {} flights to {}",
                flights.len(),
                trip_request.destination
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{extract_flights, extract_status, extract_trip_request};

    fn scout() -> ScoutAgent {
        ScoutAgent::with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_scout_returns_five_deterministic_candidates() {
        let output = scout()
            .process("Plan a trip to Paris with budget $800 on 2026-03-10")
            .await
            .unwrap();

        assert_eq!(extract_status(&output), Some(TripStatus::FlightOptions));

        let flights = extract_flights(&output);
        assert_eq!(flights.len(), 5);

        let airlines: Vec<&str> = flights.iter().map(|f| f.airline.as_str()).collect();
        assert_eq!(
            airlines,
            ["Delta", "Emirates", "United", "Spirit", "Private Jet Charter"]
        );
        assert_eq!(flights[0].price, 450);
        assert_eq!(flights[3].price, 150);
        assert_eq!(flights[4].comfort_rating, "Luxury");
    }

    #[tokio::test]
    async fn test_scout_carries_request_forward() {
        let output = scout()
            .process("Plan a trip to Paris with budget $800 on 2026-03-10")
            .await
            .unwrap();

        let request = extract_trip_request(&output).unwrap();
        assert_eq!(request.destination, "Paris");
        assert_eq!(request.budget, 800);
        assert_eq!(request.dates, "2026-03-10");
    }

    #[tokio::test]
    async fn test_scout_accepts_structured_plan_trip_message() {
        let incoming = build_trip_message(
            TripStatus::PlanTrip,
            "User",
            "Scout",
            Some(&crate::models::TripRequest::new("Tokyo", 1000, "2026-04-15")),
            None,
            "",
        );
        let output = scout().process(&incoming).await.unwrap();
        assert_eq!(extract_status(&output), Some(TripStatus::FlightOptions));
        assert_eq!(extract_trip_request(&output).unwrap().destination, "Tokyo");
    }

    #[test]
    fn test_scout_card_advertises_search_capability() {
        let card = scout().card();
        assert_eq!(card.id, "scout-agent");
        assert!(card.tags.contains(&"search"));
        assert!(!card.examples.is_empty());
    }

    #[tokio::test]
    async fn test_scout_unparseable_input_is_explanatory_text() {
        let output = scout().process("gibberish with no trip in it").await.unwrap();
        assert!(extract_status(&output).is_none());
        assert!(output.contains("Unable to parse trip request"));
    }
}
