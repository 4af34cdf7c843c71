//! Webhook event and API Gateway proxy response models.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Inbound SMS webhook event as delivered through the API Gateway proxy.
///
/// Twilio's inbound-message callback puts the message metadata in the query
/// string; only `From` and `To` are consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "queryStringParameters")]
    pub query_string_parameters: WebhookParams,
}

/// Query-string parameters of the inbound callback.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookParams {
    /// Number the inbound message was sent from; the reply goes here.
    #[serde(rename = "From")]
    pub from: String,

    /// Number the inbound message was sent to; reused as the reply-from
    /// address.
    #[serde(rename = "To")]
    pub to: String,
}

/// Fixed-shape API Gateway proxy response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
    #[serde(rename = "isBase64Encoded")]
    pub is_base64_encoded: bool,
}

impl ApiGatewayResponse {
    /// The one response this function returns: 200 with a
    /// `{"success": true}` JSON body and permissive CORS.
    pub fn success() -> Self {
        Self {
            status_code: 200,
            headers: json!({
                "Content-Type": "application/json",
                "Access-Control-Allow-Origin": "*",
            }),
            body: json!({"success": true}).to_string(),
            is_base64_encoded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_event_parses_from_and_to() {
        let event = json!({
            "queryStringParameters": {
                "From": "+15551234567",
                "To": "+15557654321",
                "Body": "when is the next bus"
            },
            "httpMethod": "POST"
        });

        let webhook: WebhookEvent = serde_json::from_value(event).unwrap();
        assert_eq!(webhook.query_string_parameters.from, "+15551234567");
        assert_eq!(webhook.query_string_parameters.to, "+15557654321");
    }

    #[test]
    fn webhook_event_without_sender_is_rejected() {
        let event = json!({
            "queryStringParameters": {
                "To": "+15557654321"
            }
        });

        let result: Result<WebhookEvent, _> = serde_json::from_value(event);
        assert!(result.is_err());
    }

    #[test]
    fn success_response_matches_the_fixed_shape() {
        let value = serde_json::to_value(ApiGatewayResponse::success()).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
        assert_eq!(value["headers"]["Access-Control-Allow-Origin"], "*");
        assert_eq!(value["isBase64Encoded"], false);

        let body: Value = serde_json::from_str(value["body"].as_str().unwrap()).unwrap();
        assert_eq!(body, json!({"success": true}));
    }
}
