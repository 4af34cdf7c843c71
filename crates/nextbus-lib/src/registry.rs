//! Fixed stop and route registry.
//!
//! The SMS reply always covers the same stops and routes; neither set is
//! configurable at runtime.

/// Routes included in the SMS report. Predictions for any other route are
/// dropped.
pub const ROUTES: [&str; 2] = ["E4", "64"];

/// Watched stops: human-readable key mapped to the WMATA numeric stop id.
///
/// The key only selects which stop id to query. The report is keyed by the
/// `StopName` the API returns, which may differ textually from the key.
pub const BUS_STOPS: [(&str, u32); 4] = [
    ("11TH_ST_IRVING_ST_NORTHBOUND", 1002008),
    ("MISSOURI_AVE_2ND_ST_EASTBOUND", 1003900),
    ("FORT_TOTTEN_STATION_BUS_BAY_K", 1003435),
    ("NEW_HAMPSHIRE_AVE_1ST_ST_SOUTHBOND", 1002570),
];

/// Pure membership test against the route filter.
pub fn is_watched_route(route_id: &str) -> bool {
    ROUTES.contains(&route_id)
}
