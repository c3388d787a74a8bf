//! # Planner Agent
//!
//! The "voice" of the pipeline: renders the approved options as a
//! human-readable itinerary with a savings summary, and emits the final
//! `TRIP_FINALIZED` message for downstream systems.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::agents::{AgentCard, TripAgent};
use crate::models::{FlightOption, TripRequest, TripStatus};
use crate::protocol::{build_trip_message, extract_flights, extract_status, extract_trip_request};

/// Formats ranked flights into the final itinerary.
///
/// Requires a `FILTERED_OPTIONS` message. An empty flight list is valid
/// terminal input and renders a "no flights available" notice.
pub struct PlannerAgent;

impl PlannerAgent {
    pub fn new() -> Self {
        Self
    }

    fn format_flight_card(flight: &FlightOption, rank: usize) -> String {
        let marker = if rank == 1 { "★ BEST" } else { "      " };
        format!(
            "\n  Option {} {}\n\
             \x20 +------------------------------------------+\n\
             \x20 |  Airline:    {:<28}|\n\
             \x20 |  Price:      ${:<27}|\n\
             \x20 |  Departure:  {:<28}|\n\
             \x20 |  Arrival:    {:<28}|\n\
             \x20 |  Duration:   {:<28}|\n\
             \x20 |  Stops:      {:<28}|\n\
             \x20 |  Class:      {:<28}|\n\
             \x20 +------------------------------------------+",
            rank,
            marker,
            flight.airline,
            flight.price,
            flight.departure_time,
            flight.arrival_time,
            flight.duration,
            flight.stops,
            flight.comfort_rating,
        )
    }

    /// Render the full itinerary: header, one card per flight in rank
    /// order, savings summary, and a recommendation for the rank-1
    /// option (or a notice when nothing survived ranking).
    fn format_itinerary(request: &TripRequest, flights: &[FlightOption]) -> String {
        let best_price = flights.first().map(|f| f.price).unwrap_or(0);
        let savings = request.budget as i64 - best_price as i64;
        // Guard the zero-budget division
        let savings_pct = if request.budget > 0 {
            savings as f64 / request.budget as f64 * 100.0
        } else {
            0.0
        };

        let header = format!(
            "\n==================================================================\n\
             \x20   YOUR TRIP TO {}\n\
             ==================================================================\n\
             \x20 Travel date: {}\n\
             \x20 Your budget: ${}\n\
             ==================================================================\n",
            request.destination.to_uppercase(),
            request.dates,
            request.budget,
        );

        let cards: String = flights
            .iter()
            .enumerate()
            .map(|(i, f)| Self::format_flight_card(f, i + 1))
            .collect();

        let savings_section = format!(
            "\n\n  ---------------- SAVINGS SUMMARY ----------------\n\
             \x20 Your budget:        ${}\n\
             \x20 Best flight price:  ${}\n\
             \x20 You save:           ${} ({:.2}%)\n\
             \x20 -------------------------------------------------\n",
            request.budget, best_price, savings, savings_pct,
        );

        let recommendation = match flights.first() {
            Some(best) => format!(
                "\n  RECOMMENDATION: Book {} for ${}.\n\
                 \x20 Departs {}, arrives {}.\n\
                 \x20 That leaves ${} of your ${} budget.\n\n\
                 \x20 Happy travels to {}!\n",
                best.airline,
                best.price,
                best.departure_time,
                best.arrival_time,
                savings,
                request.budget,
                request.destination,
            ),
            None => "\n  No flights available within your budget.\n".to_string(),
        };

        header + &cards + &savings_section + &recommendation
    }
}

impl Default for PlannerAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TripAgent for PlannerAgent {
    fn card(&self) -> AgentCard {
        AgentCard {
            id: "planner-agent",
            name: "Planner Agent",
            description: "Creates the final user-facing itinerary from approved \
                          flight options, with savings calculations.",
            tags: &["travel", "itinerary", "presentation"],
            examples: &["FILTERED_OPTIONS | Analyst -> Planner: {\"details\": \"...\"}"],
        }
    }

    fn expected_status(&self) -> Option<TripStatus> {
        Some(TripStatus::FilteredOptions)
    }

    async fn process(&self, message: &str) -> Result<String> {
        let raw = message.trim();

        let status = extract_status(raw);
        if status != Some(TripStatus::FilteredOptions) {
            return Ok(format!(
                "Planner Agent: Expected FILTERED_OPTIONS message. Received status: {}",
                status.map_or_else(|| "none".to_string(), |s| s.to_string())
            ));
        }

        let Some(trip_request) = extract_trip_request(raw) else {
            return Ok(
                "Planner Agent: Unable to extract trip request from message.".to_string(),
            );
        };

        let flights = extract_flights(raw);

        info!("Planner creating itinerary for {}", trip_request.destination);

        let itinerary = Self::format_itinerary(&trip_request, &flights);

        // Human-facing side channel; the itinerary is also returned
        println!("{}", itinerary);

        let details = match flights.first() {
            Some(best) => format!(
                "Trip to {} finalized! Best option: {} at ${}, saving ${} from budget.",
                trip_request.destination,
                best.airline,
                best.price,
                trip_request.budget as i64 - best.price as i64,
            ),
            None => "No suitable flights found.".to_string(),
        };

        let finalized = build_trip_message(
            TripStatus::TripFinalized,
            "Planner",
            "User",
            Some(&trip_request),
            Some(&flights),
            &details,
        );

        Ok(format!(
            "{}\n\n---\nStructured Output:\n{}",
            itinerary, finalized
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(airline: &str, price: u32) -> FlightOption {
        FlightOption {
            airline: airline.to_string(),
            price,
            departure_time: "08:00 AM".to_string(),
            arrival_time: "04:30 PM".to_string(),
            duration: "8h 30m".to_string(),
            stops: 1,
            comfort_rating: "Economy".to_string(),
        }
    }

    fn filtered_message(request: &TripRequest, flights: &[FlightOption]) -> String {
        build_trip_message(
            TripStatus::FilteredOptions,
            "Analyst",
            "Planner",
            Some(request),
            Some(flights),
            "",
        )
    }

    #[tokio::test]
    async fn test_planner_recommends_rank_one_with_savings() {
        let request = TripRequest::new("Paris", 800, "2026-03-10");
        let flights = vec![flight("Delta", 450), flight("United", 600)];
        let output = PlannerAgent::new()
            .process(&filtered_message(&request, &flights))
            .await
            .unwrap();

        assert!(output.contains("RECOMMENDATION: Book Delta for $450"));
        assert!(output.contains("$350 (43.75%)"));
        assert!(output.contains("YOUR TRIP TO PARIS"));
        assert!(output.contains("TRIP_FINALIZED | Planner -> User:"));

        // The finalized envelope still carries request and flights
        let tail = output
            .lines()
            .last()
            .expect("structured output line present");
        assert_eq!(extract_status(tail), Some(TripStatus::TripFinalized));
        assert_eq!(extract_flights(tail).len(), 2);
        assert_eq!(extract_trip_request(tail).unwrap(), request);
    }

    #[tokio::test]
    async fn test_planner_zero_budget_does_not_divide() {
        let request = TripRequest::new("Paris", 0, "2026-03-10");
        let output = PlannerAgent::new()
            .process(&filtered_message(&request, &[flight("Freebird", 0)]))
            .await
            .unwrap();

        assert!(output.contains("$0 (0.00%)"));
        assert!(output.contains("TRIP_FINALIZED"));
    }

    #[tokio::test]
    async fn test_planner_empty_flight_list_is_valid_terminal_output() {
        let request = TripRequest::new("Paris", 800, "2026-03-10");
        let output = PlannerAgent::new()
            .process(&filtered_message(&request, &[]))
            .await
            .unwrap();

        assert!(output.contains("No flights available within your budget."));
        assert!(!output.contains("RECOMMENDATION"));
        // Not an error: the run still finalizes
        assert!(output.contains("TRIP_FINALIZED"));
        assert!(output.contains("No suitable flights found."));
    }

    #[tokio::test]
    async fn test_planner_rejects_wrong_status() {
        let output = PlannerAgent::new()
            .process("FLIGHT_OPTIONS | Scout -> Analyst: {\"details\": \"\"}")
            .await
            .unwrap();
        assert!(output.contains("Expected FILTERED_OPTIONS"));
        assert!(output.contains("Received status: FLIGHT_OPTIONS"));
        assert!(!output.contains("TRIP_FINALIZED"));
    }

    #[tokio::test]
    async fn test_planner_requires_trip_request() {
        let output = PlannerAgent::new()
            .process("FILTERED_OPTIONS | Analyst -> Planner: {\"details\": \"\"}")
            .await
            .unwrap();
        assert!(output.contains("Unable to extract trip request"));
    }

    #[test]
    fn test_flight_card_marks_rank_one() {
        let card = PlannerAgent::format_flight_card(&flight("Delta", 450), 1);
        assert!(card.contains("★ BEST"));
        let card2 = PlannerAgent::format_flight_card(&flight("United", 600), 2);
        assert!(!card2.contains("★ BEST"));
    }
}
