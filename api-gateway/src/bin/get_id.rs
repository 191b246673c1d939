//! Max id Lambda - reports the highest calendar event id in use.

use api_gateway::handlers;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::recover;
use shared::{Config, MySqlStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn handler(store: Arc<MySqlStore>, _event: Request) -> Result<Response<Body>, Error> {
    recover(handlers::max_id(store.as_ref()).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let store = Arc::new(MySqlStore::from_config(&config).await?);
    info!("Max id Lambda ready");

    run(service_fn(move |event| {
        let store = Arc::clone(&store);
        async move { handler(store, event).await }
    }))
    .await
}
