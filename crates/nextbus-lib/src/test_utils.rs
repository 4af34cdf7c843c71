//! In-memory fakes for the seam traits.
//!
//! Available to dependent crates through the `test-utils` feature so
//! handler tests can run without AWS, WMATA, or Twilio access.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::params::ParameterStore;
use crate::registry::BUS_STOPS;
use crate::twilio::MessageSender;
use crate::wmata::{Prediction, PredictionResponse, TransitApi};

/// Parameter store backed by a fixed map. Absent names return the same
/// distinct error the SSM-backed store does.
#[derive(Debug, Default)]
pub struct FakeStore {
    values: HashMap<String, String>,
}

impl FakeStore {
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }
}

impl ParameterStore for FakeStore {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ParameterNotFound {
                name: name.to_string(),
            })
    }
}

/// Transit API serving canned prediction responses per stop id.
#[derive(Debug, Default)]
pub struct FakeTransit {
    responses: HashMap<u32, PredictionResponse>,
    fail_on: HashSet<u32>,
}

impl FakeTransit {
    /// An empty prediction list for every registry stop, each named after
    /// its registry key.
    pub fn empty_for_registry() -> Self {
        let mut fake = Self::default();
        for (stop, stop_id) in BUS_STOPS {
            fake = fake.with_stop(stop_id, stop, Vec::new());
        }
        fake
    }

    pub fn with_stop(
        mut self,
        stop_id: u32,
        stop_name: &str,
        predictions: Vec<Prediction>,
    ) -> Self {
        self.responses.insert(
            stop_id,
            PredictionResponse {
                stop_name: stop_name.to_string(),
                predictions,
            },
        );
        self
    }

    /// Make the fetch for the given stop id fail.
    pub fn failing_on(mut self, stop_id: u32) -> Self {
        self.fail_on.insert(stop_id);
        self
    }
}

impl TransitApi for FakeTransit {
    async fn next_bus_prediction(&self, stop_id: u32) -> Result<PredictionResponse> {
        if self.fail_on.contains(&stop_id) {
            return Err(Error::UnexpectedResponse {
                context: "next bus prediction",
                message: format!("simulated upstream failure for stop {stop_id}"),
            });
        }

        self.responses
            .get(&stop_id)
            .cloned()
            .ok_or_else(|| Error::UnexpectedResponse {
                context: "next bus prediction",
                message: format!("no canned response for stop {stop_id}"),
            })
    }
}

/// Message sender that records every send instead of calling a provider.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<SentMessage>>,
    fail: bool,
}

/// One recorded send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub from: String,
    pub body: String,
}

impl RecordingMessenger {
    /// A messenger whose every send fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Snapshot of everything sent so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl MessageSender for RecordingMessenger {
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<String> {
        if self.fail {
            return Err(Error::UnexpectedResponse {
                context: "message create",
                message: "simulated provider failure".to_string(),
            });
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMessage {
            to: to.to_string(),
            from: from.to_string(),
            body: body.to_string(),
        });
        Ok(format!("SMfake{:04}", sent.len()))
    }
}
