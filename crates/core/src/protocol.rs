//! # Message Protocol
//!
//! Codec for the line-oriented wire message the agents pass between
//! stages:
//!
//! ```text
//! <STATUS> | <Sender> -> <Receiver>: <json payload>
//! ```
//!
//! Encoding is exact; decoding is deliberately forgiving. A malformed
//! payload decodes to an empty [`TripPayload`] rather than an error, so
//! callers must treat "no data" as absence, not as a failure signal.
//! [`parse_trip_request`] additionally falls back to heuristic
//! natural-language extraction for raw user input.

use regex::Regex;
use tracing::debug;

use crate::models::{FlightOption, TripPayload, TripRequest, TripStatus};

/// Build a wire message for agent-to-agent communication.
pub fn build_trip_message(
    status: TripStatus,
    sender: &str,
    receiver: &str,
    trip_request: Option<&TripRequest>,
    flights: Option<&[FlightOption]>,
    details: &str,
) -> String {
    let payload = TripPayload {
        details: details.to_string(),
        trip_request: trip_request.cloned(),
        flights: flights.map(|f| f.to_vec()),
    };

    let json = serde_json::to_string(&payload).unwrap_or_else(|_| "{}".to_string());
    format!("{} | {} -> {}: {}", status, sender, receiver, json)
}

/// Extract the status tag from a message.
///
/// Scans the tags in declaration order and returns the first whose wire
/// name is a literal prefix of the trimmed message. This is a prefix
/// match, not a field parse: a decoded status says nothing about whether
/// the payload is well-formed, and a message body that happens to start
/// with another tag's text would mis-scan. Kept as-is for wire
/// compatibility with existing senders.
pub fn extract_status(message: &str) -> Option<TripStatus> {
    let trimmed = message.trim();
    TripStatus::all()
        .into_iter()
        .find(|status| trimmed.starts_with(status.as_str()))
}

/// Extract the JSON payload from a message.
///
/// Locates the trailing `{...}` after a colon and deserializes it.
/// Returns an empty payload on any parse failure; never errors.
pub fn extract_payload(message: &str) -> TripPayload {
    let locator = match Regex::new(r"(?s):\s*(\{.*\})\s*$") {
        Ok(re) => re,
        Err(_) => return TripPayload::default(),
    };

    match locator.captures(message) {
        Some(caps) => serde_json::from_str(&caps[1]).unwrap_or_else(|e| {
            debug!("Payload did not parse as TripPayload: {}", e);
            TripPayload::default()
        }),
        None => TripPayload::default(),
    }
}

/// Extract the embedded [`TripRequest`], if any.
pub fn extract_trip_request(message: &str) -> Option<TripRequest> {
    extract_payload(message).trip_request
}

/// Extract the embedded flight list; empty when absent.
pub fn extract_flights(message: &str) -> Vec<FlightOption> {
    extract_payload(message).flights.unwrap_or_default()
}

/// Parse a trip request from either a structured message or free text.
///
/// Structured extraction wins; otherwise an ordered list of patterns is
/// tried for each field, first match wins. This is a heuristic, not a
/// guarantee: unless destination, budget, AND dates all extract, the
/// result is `None` — a valid "could not parse" outcome, not an error.
///
/// Accepted shapes include:
/// - `Plan a trip to Paris with budget $800 on 2026-03-10`
/// - `PLAN_TRIP | User -> Scout: {"details": "...", "trip_request": {...}}`
pub fn parse_trip_request(message: &str) -> Option<TripRequest> {
    if let Some(request) = extract_trip_request(message) {
        return Some(request);
    }

    let lower = message.to_lowercase();

    let dest_patterns = [
        r"trip to (\w+)",
        r"destination[:\s]+(\w+)",
        r"fly to (\w+)",
        r"going to (\w+)",
    ];
    let destination = first_capture(&dest_patterns, &lower).map(|d| capitalize(&d));

    let budget_patterns = [r"budget[:\s]*\$?(\d+)", r"\$(\d+)", r"(\d+)\s*dollars"];
    let budget = first_capture(&budget_patterns, &lower).and_then(|b| b.parse::<u32>().ok());

    // Dates keep their original casing (e.g., "March 10")
    let date_patterns = [r"(\d{4}-\d{2}-\d{2})", r"on (\w+ \d+)", r"dates?[:\s]+(\S+)"];
    let dates = first_capture(&date_patterns, message);

    match (destination, budget, dates) {
        (Some(destination), Some(budget), Some(dates)) => {
            Some(TripRequest::new(destination, budget, dates))
        }
        _ => None,
    }
}

/// Run an ordered pattern list against `text`, returning the first
/// pattern's first capture group.
fn first_capture(patterns: &[&str], text: &str) -> Option<String> {
    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(caps) = re.captures(text) {
                return Some(caps[1].to_string());
            }
        }
    }
    None
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
