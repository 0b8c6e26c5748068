mod cascade;
mod form;
mod hook;

use std::rc::Rc;

use payloads::{APIClient, ClientError};
use resources::ResourceError;
use test_helpers::{TestApp, spawn_app};

/// The app's authenticated client, shared the way hooks expect it.
fn shared_client(app: &TestApp) -> Rc<APIClient> {
    Rc::new(app.client.clone())
}

/// Unwrap the client error inside a resource failure.
fn client_result<T>(
    result: Result<T, ResourceError>,
) -> Result<T, ClientError> {
    result.map_err(|e| match e {
        ResourceError::Client(e) => e,
        other => panic!("Expected a client error, got {other:?}"),
    })
}

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.health_check().await?;
    app.anonymous_client().health_check().await?;

    Ok(())
}
