//! Prediction aggregation and SMS body rendering.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::registry::{is_watched_route, BUS_STOPS};
use crate::wmata::{Prediction, TransitApi};

/// Formatted prediction lines keyed by the upstream-returned stop name.
pub type PredictionReport = BTreeMap<String, Vec<String>>;

/// Fetch predictions for every registered stop, keeping the watched routes.
///
/// Each entry is keyed by the `StopName` the API reports for the queried
/// stop id, not by the registry key. Stops with no matching predictions
/// still appear with an empty list. Lines keep the upstream order; nothing
/// is deduplicated or sorted. A failed fetch for any stop aborts the whole
/// aggregation.
pub async fn bus_stop_predictions<T: TransitApi>(transit: &T) -> Result<PredictionReport> {
    let mut report = PredictionReport::new();

    for (stop, stop_id) in BUS_STOPS {
        let response = transit.next_bus_prediction(stop_id).await?;

        let lines: Vec<String> = response
            .predictions
            .iter()
            .filter(|prediction| is_watched_route(&prediction.route_id))
            .map(format_prediction)
            .collect();

        debug!(
            stop,
            stop_id,
            returned = response.predictions.len(),
            kept = lines.len(),
            "fetched stop predictions"
        );

        report.insert(response.stop_name, lines);
    }

    Ok(report)
}

/// Format one prediction as a report line.
pub fn format_prediction(prediction: &Prediction) -> String {
    format!(
        "{} minutes: {} {}",
        prediction.minutes, prediction.route_id, prediction.direction_text
    )
}

/// Concatenate the report into a single SMS body: the stop name line, then
/// each prediction line, per stop in report order. Every line is
/// newline-terminated.
pub fn render_message(report: &PredictionReport) -> String {
    let mut body = String::new();
    for (stop_name, lines) in report {
        body.push_str(stop_name);
        body.push('\n');
        for line in lines {
            body.push_str(line);
            body.push('\n');
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::FakeTransit;

    fn prediction(route_id: &str, direction: &str, minutes: i64) -> Prediction {
        Prediction {
            route_id: route_id.to_string(),
            direction_text: direction.to_string(),
            minutes,
        }
    }

    #[test]
    fn line_shape_is_exact() {
        let line = format_prediction(&prediction("64", "NORTH", 5));
        assert_eq!(line, "5 minutes: 64 NORTH");
    }

    #[tokio::test]
    async fn keeps_watched_routes_and_drops_the_rest() {
        let transit = FakeTransit::empty_for_registry().with_stop(
            1002008,
            "11th St NW + Irving St NW",
            vec![
                prediction("64", "NORTH", 5),
                prediction("H2", "WEST", 2),
                prediction("E4", "EAST", 9),
                prediction("64", "NORTH", 21),
            ],
        );

        let report = bus_stop_predictions(&transit).await.unwrap();
        assert_eq!(
            report["11th St NW + Irving St NW"],
            vec![
                "5 minutes: 64 NORTH",
                "9 minutes: E4 EAST",
                "21 minutes: 64 NORTH",
            ]
        );
    }

    #[tokio::test]
    async fn stop_without_matches_keeps_an_empty_entry() {
        let transit = FakeTransit::empty_for_registry().with_stop(
            1003435,
            "Fort Totten Station Bus Bay K",
            vec![prediction("H2", "WEST", 3)],
        );

        let report = bus_stop_predictions(&transit).await.unwrap();
        assert_eq!(report["Fort Totten Station Bus Bay K"], Vec::<String>::new());
    }

    #[tokio::test]
    async fn report_has_one_key_per_returned_stop_name() {
        let transit = FakeTransit::empty_for_registry();

        let report = bus_stop_predictions(&transit).await.unwrap();
        // The fake names each response after the registry key, so all four
        // distinct stop names appear.
        assert_eq!(report.len(), 4);
        assert!(report.contains_key("MISSOURI_AVE_2ND_ST_EASTBOUND"));
    }

    #[tokio::test]
    async fn one_failed_stop_aborts_the_aggregation() {
        let transit = FakeTransit::empty_for_registry().failing_on(1003900);

        let err = bus_stop_predictions(&transit).await.unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { .. }));
    }

    #[test]
    fn rendered_message_lists_each_stop_then_its_lines() {
        let mut report = PredictionReport::new();
        report.insert(
            "Stop A".to_string(),
            vec!["5 minutes: 64 NORTH".to_string()],
        );
        report.insert("Stop B".to_string(), Vec::new());

        let body = render_message(&report);
        assert_eq!(body, "Stop A\n5 minutes: 64 NORTH\nStop B\n");
    }
}
