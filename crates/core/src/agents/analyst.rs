//! # Analyst Agent
//!
//! The "brain" of the pipeline: applies the budget constraint, ranks the
//! survivors by price, and keeps only the best few for the Planner.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::agents::{AgentCard, TripAgent};
use crate::models::{FlightOption, TripStatus};
use crate::protocol::{build_trip_message, extract_flights, extract_status, extract_trip_request};

/// How many ranked options survive by default.
const DEFAULT_TOP_N: usize = 2;

/// Filters and ranks flight options against the request's budget.
///
/// Requires a `FLIGHT_OPTIONS` message; emits `FILTERED_OPTIONS` with at
/// most `top_n` flights, cheapest first.
pub struct AnalystAgent {
    top_n: usize,
}

impl AnalystAgent {
    pub fn new() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Override how many options survive ranking.
    pub fn with_top_n(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Retain flights with `price <= budget`. The comparison is
    /// inclusive: an option costing exactly the budget is kept.
    fn filter_by_budget(&self, flights: Vec<FlightOption>, budget: u32) -> Vec<FlightOption> {
        let considered = flights.len();
        let filtered: Vec<FlightOption> =
            flights.into_iter().filter(|f| f.price <= budget).collect();
        info!(
            "Filtered {} flights to {} within budget ${}",
            considered,
            filtered.len(),
            budget
        );
        filtered
    }

    /// Ascending by price; `sort_by_key` is stable, so equal prices keep
    /// their original relative order.
    fn sort_by_price(&self, mut flights: Vec<FlightOption>) -> Vec<FlightOption> {
        flights.sort_by_key(|f| f.price);
        flights
    }
}

impl Default for AnalystAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TripAgent for AnalystAgent {
    fn card(&self) -> AgentCard {
        AgentCard {
            id: "analyst-agent",
            name: "Analyst Agent",
            description: "Applies budget constraints to flight options, ranks them \
                          by price, and selects the best candidates.",
            tags: &["travel", "flights", "ranking"],
            examples: &["FLIGHT_OPTIONS | Scout -> Analyst: {\"details\": \"...\"}"],
        }
    }

    fn expected_status(&self) -> Option<TripStatus> {
        Some(TripStatus::FlightOptions)
    }

    async fn process(&self, message: &str) -> Result<String> {
        let raw = message.trim();

        let status = extract_status(raw);
        if status != Some(TripStatus::FlightOptions) {
            return Ok(format!(
                "Analyst Agent: Expected FLIGHT_OPTIONS message. Received status: {}",
                status.map_or_else(|| "none".to_string(), |s| s.to_string())
            ));
        }

        let Some(trip_request) = extract_trip_request(raw) else {
            return Ok(
                "Analyst Agent: Unable to extract trip request from message.".to_string(),
            );
        };

        let flights = extract_flights(raw);
        if flights.is_empty() {
            return Ok("Analyst Agent: No flight options found in message.".to_string());
        }

        info!(
            "Analyst processing {} flights for budget ${}",
            flights.len(),
            trip_request.budget
        );

        let considered = flights.len();
        let within_budget = self.filter_by_budget(flights, trip_request.budget);

        if within_budget.is_empty() {
            return Ok(format!(
                "Analyst Agent: No flights found within budget ${}. \
                 Consider increasing your budget.",
                trip_request.budget
            ));
        }

        let dropped = considered - within_budget.len();
        let mut ranked = self.sort_by_price(within_budget);
        ranked.truncate(self.top_n);

        let details = format!(
            "Analyzed {} options, dropped {} over budget. \
             Selected top {} best-value flights.",
            considered,
            dropped,
            ranked.len()
        );

        Ok(build_trip_message(
            TripStatus::FilteredOptions,
            "Analyst",
            "Planner",
            Some(&trip_request),
            Some(&ranked),
            &details,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ScoutAgent;
    use crate::models::TripRequest;
    use std::time::Duration;

    fn flight(airline: &str, price: u32) -> FlightOption {
        FlightOption {
            airline: airline.to_string(),
            price,
            departure_time: "08:00 AM".to_string(),
            arrival_time: "04:00 PM".to_string(),
            duration: "8h 00m".to_string(),
            stops: 1,
            comfort_rating: "Economy".to_string(),
        }
    }

    fn options_message(budget: u32, flights: &[FlightOption]) -> String {
        build_trip_message(
            TripStatus::FlightOptions,
            "Scout",
            "Analyst",
            Some(&TripRequest::new("Paris", budget, "2026-03-10")),
            Some(flights),
            "",
        )
    }

    async fn scout_output(budget: u32) -> String {
        ScoutAgent::with_latency(Duration::ZERO)
            .process(&format!(
                "Plan a trip to Paris with budget ${} on 2026-03-10",
                budget
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_analyst_ranks_catalog_for_paris_800() {
        let output = AnalystAgent::new()
            .process(&scout_output(800).await)
            .await
            .unwrap();

        assert_eq!(extract_status(&output), Some(TripStatus::FilteredOptions));

        // Within $800: Spirit $150, Delta $450, United $600; top 2 cheapest win
        let flights = extract_flights(&output);
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].airline, "Spirit");
        assert_eq!(flights[1].airline, "Delta");

        let payload = crate::protocol::extract_payload(&output);
        assert!(payload.details.contains("Analyzed 5 options"));
        assert!(payload.details.contains("dropped 2 over budget"));
        assert!(payload.details.contains("Selected top 2"));
    }

    #[tokio::test]
    async fn test_analyst_output_sorted_and_capped() {
        let flights = vec![
            flight("C", 300),
            flight("A", 100),
            flight("B", 200),
            flight("D", 250),
        ];
        let output = AnalystAgent::new()
            .process(&options_message(1000, &flights))
            .await
            .unwrap();

        let ranked = extract_flights(&output);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].airline, "A");
        assert_eq!(ranked[1].airline, "B");
        assert!(ranked.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[tokio::test]
    async fn test_analyst_inclusive_budget_boundary() {
        let flights = vec![flight("Exact", 450), flight("Over", 451)];
        let output = AnalystAgent::new()
            .process(&options_message(450, &flights))
            .await
            .unwrap();

        let ranked = extract_flights(&output);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].airline, "Exact");
    }

    #[tokio::test]
    async fn test_analyst_stable_sort_on_price_ties() {
        let flights = vec![flight("First", 200), flight("Second", 200)];
        let output = AnalystAgent::new()
            .process(&options_message(500, &flights))
            .await
            .unwrap();

        let ranked = extract_flights(&output);
        assert_eq!(ranked[0].airline, "First");
        assert_eq!(ranked[1].airline, "Second");
    }

    #[tokio::test]
    async fn test_analyst_under_budget_explanation() {
        let output = AnalystAgent::new()
            .process(&scout_output(100).await)
            .await
            .unwrap();

        assert!(extract_status(&output).is_none());
        assert!(output.contains("No flights found within budget $100"));
    }

    #[tokio::test]
    async fn test_analyst_rejects_wrong_status() {
        let output = AnalystAgent::new()
            .process("TRIP_FINALIZED | Planner -> User: {\"details\": \"\"}")
            .await
            .unwrap();
        assert!(extract_status(&output).is_none());
        assert!(output.contains("Expected FLIGHT_OPTIONS"));
    }

    #[tokio::test]
    async fn test_analyst_requires_flights() {
        let msg = build_trip_message(
            TripStatus::FlightOptions,
            "Scout",
            "Analyst",
            Some(&TripRequest::new("Paris", 800, "2026-03-10")),
            None,
            "",
        );
        let output = AnalystAgent::new().process(&msg).await.unwrap();
        assert!(output.contains("No flight options found"));
    }

    #[tokio::test]
    async fn test_analyst_requires_trip_request() {
        let msg = build_trip_message(
            TripStatus::FlightOptions,
            "Scout",
            "Analyst",
            None,
            Some(&[flight("A", 100)]),
            "",
        );
        let output = AnalystAgent::new().process(&msg).await.unwrap();
        assert!(output.contains("Unable to extract trip request"));
    }
}
