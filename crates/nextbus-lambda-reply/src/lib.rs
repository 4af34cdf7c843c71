//! AWS Lambda function replying to inbound SMS webhooks with WMATA
//! next-bus predictions for a fixed set of stops.
//!
//! The flow is strictly linear: resolve credentials from the injected
//! parameter store, fetch and filter predictions per registered stop, send
//! one SMS back to the webhook sender, and return a fixed-shape API Gateway
//! response. Nothing is caught or retried; any dependency failure fails the
//! whole invocation.

mod models;
mod tracing_init;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use nextbus_lib::params::ParameterStore;
use nextbus_lib::predictions::{bus_stop_predictions, render_message};
use nextbus_lib::twilio::{MessageSender, Twilio};
use nextbus_lib::wmata::{TransitApi, Wmata};

pub use models::{ApiGatewayResponse, WebhookEvent, WebhookParams};
pub use tracing_init::init_tracing;

/// Lambda handler invoked per webhook delivery.
///
/// Credentials are resolved fresh from the injected store on every
/// invocation; the process is not guaranteed to live between invocations,
/// so nothing is cached.
pub async fn handler<P: ParameterStore>(
    event: LambdaEvent<Value>,
    store: &P,
) -> Result<ApiGatewayResponse, Error> {
    let request_id = event.context.request_id.clone();
    let webhook: WebhookEvent = serde_json::from_value(event.payload)?;

    info!(
        request_id = %request_id,
        from = %webhook.query_string_parameters.from,
        to = %webhook.query_string_parameters.to,
        "handling inbound SMS webhook"
    );

    let twilio = Twilio::from_store(store).await?;
    let wmata = Wmata::from_store(store).await?;

    Ok(reply_with(&webhook, &wmata, &twilio).await?)
}

/// Core reply flow, separated from client construction for tests.
///
/// Sends exactly one SMS: the reply goes to the webhook's `From` number and
/// is sent from its `To` number.
pub async fn reply_with<T: TransitApi, M: MessageSender>(
    webhook: &WebhookEvent,
    transit: &T,
    messenger: &M,
) -> nextbus_lib::Result<ApiGatewayResponse> {
    let report = bus_stop_predictions(transit).await?;
    let body = render_message(&report);

    let params = &webhook.query_string_parameters;
    let sid = messenger.send(&params.from, &params.to, &body).await?;

    info!(message_sid = %sid, stops = report.len(), "reply sent");

    Ok(ApiGatewayResponse::success())
}
