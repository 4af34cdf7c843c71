//! Core library for the nextbus SMS reply Lambda.
//!
//! This crate provides everything the handler composes:
//!
//! - [`params`]: secret resolution from AWS SSM Parameter Store behind the
//!   [`ParameterStore`] seam
//! - [`wmata`]: a thin client for the WMATA bus API behind the
//!   [`TransitApi`] seam
//! - [`predictions`]: per-stop prediction aggregation, route filtering, and
//!   SMS body rendering
//! - [`twilio`]: outbound SMS delivery behind the [`MessageSender`] seam
//! - [`registry`]: the fixed stop and route tables
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides in-memory fakes for all three seam
//! traits. Enable the `test-utils` feature to access it from dependent
//! crates.

pub mod error;
pub mod params;
pub mod predictions;
pub mod registry;
pub mod twilio;
pub mod wmata;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use params::{
    ParameterStore, SsmStore, TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN, WMATA_API_KEY,
};
pub use predictions::{bus_stop_predictions, format_prediction, render_message, PredictionReport};
pub use registry::{is_watched_route, BUS_STOPS, ROUTES};
pub use twilio::{MessageSender, Twilio};
pub use wmata::{Prediction, PredictionResponse, TransitApi, Wmata};

/// User-agent sent by every HTTP client in this crate.
pub(crate) fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
