//! Secret resolution from AWS SSM Parameter Store.
//!
//! Every lookup is a fresh remote call; nothing is cached across
//! invocations. A missing name surfaces as the distinct
//! [`Error::ParameterNotFound`] so callers can tell absent configuration
//! apart from a failing store.

use aws_sdk_ssm::Client;
use tracing::debug;

use crate::error::{Error, Result};

/// Parameter name of the WMATA API key.
pub const WMATA_API_KEY: &str = "/wmata/API_KEY";

/// Parameter name of the Twilio account SID.
pub const TWILIO_ACCOUNT_SID: &str = "/twilio/ACCOUNT_SID";

/// Parameter name of the Twilio auth token.
pub const TWILIO_AUTH_TOKEN: &str = "/twilio/ACCOUNT_AUTH_TOKEN";

/// Key-value lookup of configuration secrets by hierarchical name.
///
/// Implemented by [`SsmStore`] in production and by in-memory fakes in
/// tests. Handlers receive the store as an explicit argument instead of
/// reaching for a process-wide client.
#[allow(async_fn_in_trait)]
pub trait ParameterStore {
    /// Return the stored value of the named parameter.
    async fn get_parameter(&self, name: &str) -> Result<String>;
}

/// Parameter store backed by AWS SSM.
#[derive(Debug, Clone)]
pub struct SsmStore {
    client: Client,
}

impl SsmStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a store from the ambient AWS environment (region, credentials).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

impl ParameterStore for SsmStore {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .send()
            .await
            .map_err(|err| {
                let not_found = err
                    .as_service_error()
                    .is_some_and(|service| service.is_parameter_not_found());
                if not_found {
                    Error::ParameterNotFound {
                        name: name.to_string(),
                    }
                } else {
                    Error::ParameterStore {
                        name: name.to_string(),
                        message: err.to_string(),
                    }
                }
            })?;

        debug!(name, "resolved parameter");

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string)
            .ok_or_else(|| Error::ParameterStore {
                name: name.to_string(),
                message: "response contained no parameter value".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeStore;

    #[tokio::test]
    async fn absent_name_is_a_distinct_error() {
        let store = FakeStore::default().with(WMATA_API_KEY, "k");

        let err = store.get_parameter("/wmata/MISSING").await.unwrap_err();
        assert!(matches!(err, Error::ParameterNotFound { ref name } if name == "/wmata/MISSING"));
        assert!(err.to_string().contains("/wmata/MISSING"));
    }

    #[tokio::test]
    async fn present_name_resolves() {
        let store = FakeStore::default().with(TWILIO_ACCOUNT_SID, "AC123");

        let value = store.get_parameter(TWILIO_ACCOUNT_SID).await.unwrap();
        assert_eq!(value, "AC123");
    }
}
