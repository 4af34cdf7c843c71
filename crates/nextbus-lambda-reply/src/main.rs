use lambda_runtime::{service_fn, Error};

use nextbus_lambda_reply::{handler, init_tracing};
use nextbus_lib::params::SsmStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    // Constructed once and passed in explicitly; every invocation still
    // resolves its parameters fresh through this client.
    let store = SsmStore::from_env().await;
    let store_ref = &store;

    lambda_runtime::run(service_fn(move |event| async move {
        handler(event, store_ref).await
    }))
    .await
}
