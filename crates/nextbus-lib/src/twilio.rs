//! Thin wrapper around Twilio's message-create call.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::params::{ParameterStore, TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN};

const API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Outbound SMS delivery.
///
/// Implemented by [`Twilio`] in production and by recording fakes in tests.
#[allow(async_fn_in_trait)]
pub trait MessageSender {
    /// Send an SMS, returning the provider's message identifier.
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<String>;
}

/// Twilio REST client holding pre-resolved account credentials.
///
/// Phone numbers are not validated locally; the provider rejects malformed
/// input and the rejection surfaces as an HTTP error.
#[derive(Debug, Clone)]
pub struct Twilio {
    account_sid: String,
    auth_token: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

impl Twilio {
    /// Build a client around the given account credentials.
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(crate::user_agent())
            .build()?;
        Ok(Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            http,
        })
    }

    /// Build a client with both credentials resolved from the parameter
    /// store.
    pub async fn from_store<P: ParameterStore>(store: &P) -> Result<Self> {
        let account_sid = store.get_parameter(TWILIO_ACCOUNT_SID).await?;
        let auth_token = store.get_parameter(TWILIO_AUTH_TOKEN).await?;
        Self::new(account_sid, auth_token)
    }

    fn messages_url(&self) -> String {
        format!("{API_BASE}/Accounts/{}/Messages.json", self.account_sid)
    }
}

impl MessageSender for Twilio {
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<String> {
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await?
            .error_for_status()?;

        let message: MessageResource = response.json().await?;
        debug!(sid = %message.sid, "message accepted by provider");
        Ok(message.sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::FakeStore;

    #[test]
    fn message_url_is_scoped_to_the_account() {
        let twilio = Twilio::new("AC123", "token").unwrap();
        assert_eq!(
            twilio.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[tokio::test]
    async fn from_store_resolves_both_credentials() {
        let store = FakeStore::default()
            .with(TWILIO_ACCOUNT_SID, "AC123")
            .with(TWILIO_AUTH_TOKEN, "token");

        let twilio = Twilio::from_store(&store).await.unwrap();
        assert_eq!(twilio.account_sid, "AC123");
        assert_eq!(twilio.auth_token, "token");
    }

    #[tokio::test]
    async fn from_store_propagates_missing_credentials() {
        let store = FakeStore::default().with(TWILIO_ACCOUNT_SID, "AC123");

        let err = Twilio::from_store(&store).await.unwrap_err();
        assert!(
            matches!(err, Error::ParameterNotFound { ref name } if name == TWILIO_AUTH_TOKEN)
        );
    }

    #[test]
    fn message_resource_deserializes_provider_shape() {
        let message: MessageResource =
            serde_json::from_str(r#"{"sid": "SM123", "status": "queued"}"#).unwrap();
        assert_eq!(message.sid, "SM123");
    }
}
