//! HTTP API around the regression engine.
//!
//! The server keeps the single current model: a successful training replaces it,
//! predictions are made with whichever model is current at the moment.

use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Cors, Tracing};
use poem::{get, post, Endpoint, EndpointExt, Route, Server};

use crate::prelude::*;
use crate::web::middleware::ErrorMiddleware;
use crate::web::state::CurrentModel;

mod middleware;
mod responses;
mod state;
mod views;


const SHUTDOWN_TIMEOUT: StdDuration = StdDuration::from_secs(5);

pub async fn run(host: &str, port: u16) -> Result {
    let app = create_app();
    info!(host, port, "listening…");
    Server::new(TcpListener::bind((IpAddr::from_str(host)?, port)))
        .run_with_graceful_shutdown(app, wait_for_shutdown(), Some(SHUTDOWN_TIMEOUT))
        .await
        .context("the web server has failed")?;
    info!("stopped");
    Ok(())
}

pub fn create_app() -> impl Endpoint {
    Route::new()
        .at("/api/train", post(views::train::post_train))
        .at("/api/predict", post(views::predict::post_predict))
        .at("/health", get(views::api::get_health))
        .data(CurrentModel::default())
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(Cors::new())
}

async fn wait_for_shutdown() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl+C: {:#}", error);
        std::future::pending::<()>().await;
    }
    info!("shutting down…");
}
