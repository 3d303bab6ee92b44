use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use bb8_postgres::bb8::Pool;
use bb8_postgres::tokio_postgres::NoTls;
use bb8_postgres::PostgresConnectionManager;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::booking::BookingService;
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::notifier::Notifier;
use crate::session::SessionStore;

pub mod admin_controller;
pub mod booking_controller;
pub mod contact_controller;
pub mod content_controller;
pub mod health_check;

#[derive(Clone)]
pub struct AppState {
    pub postgres_connection: Pool<PostgresConnectionManager<NoTls>>,
    pub booking_service: Arc<BookingService>,
    pub notifier: Arc<dyn Notifier>,
    pub sessions: Arc<SessionStore>,
    pub config: Config,
}

pub async fn serve(app_state: AppState) -> anyhow::Result<()> {
    let origins: Vec<HeaderValue> = app_state
        .config
        .origin_urls
        .split(',')
        .map(|s| s.parse().unwrap())
        .collect::<Vec<HeaderValue>>();

    let application = router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS
                        ])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
                .layer(CompressionLayer::new())
        )
        .fallback(page_not_found_handler);

    let port = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!("API server listening on port: {}", port);
    axum::Server::bind(&port)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    Router::new()
        .merge(health_check::router())
        .nest(
            "/api",
            Router::new()
                .merge(content_controller::router(app_state.clone()))
                .merge(booking_controller::router(app_state.clone()))
                .merge(contact_controller::router(app_state.clone()))
                .merge(admin_controller::router(app_state)),
        )
}
