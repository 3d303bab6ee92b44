use std::sync::Arc;

use anyhow::Context;
use bb8_postgres::bb8::Pool;
use bb8_postgres::tokio_postgres::NoTls;
use bb8_postgres::PostgresConnectionManager;
use clap::Parser;
use dotenv::dotenv;

use crate::booking::BookingService;
use crate::config::Config;
use crate::controller::AppState;
use crate::notifier::{Notifier, SmtpNotifier};
use crate::repositories::postgres_repo::PostgresConnectionRepo;
use crate::session::SessionStore;
use crate::sweeper::Sweeper;

pub mod booking;
pub mod config;
pub mod controller;
pub mod helpers;
pub mod models;
pub mod notifier;
pub mod repositories;
pub mod session;
pub mod sweeper;
#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();

    let manager = PostgresConnectionManager::new_from_stringlike(
        format!(
            "host={} port={} user={} password={} dbname={}",
            config.db_host, config.db_port, config.db_user, config.db_password, config.db_name
        ),
        NoTls,
    )
    .context("Invalid postgres connection configuration")?;
    let postgres_connection = Pool::builder()
        .build(manager)
        .await
        .context("Failed to build the postgres connection pool")?;

    let postgres_repo = Arc::new(PostgresConnectionRepo::new(postgres_connection.clone()));
    postgres_repo.ensure_schema().await?;

    let notifier: Arc<dyn Notifier> = Arc::new(SmtpNotifier::new(
        &config.smtp_server,
        config.smtp_port,
        &config.smtp_username,
        &config.smtp_password,
    )?);

    let booking_service = Arc::new(BookingService::new(
        postgres_repo.clone(),
        notifier.clone(),
    ));

    let sweeper_handle = Sweeper::new(
        postgres_repo,
        notifier.clone(),
        config.admin_email.clone(),
    )
    .start();

    let app_state = AppState {
        postgres_connection,
        booking_service,
        notifier,
        sessions: Arc::new(SessionStore::default()),
        config,
    };

    let served = controller::serve(app_state).await;
    sweeper_handle.stop().await;
    served
}
