use anyhow::Result;
use backend::{
    background_worker::reminder_worker, config::config_loader, axum_http::http_serve,
};
use crates::{
    domain::repositories::notifications::NotificationSender,
    infra::{
        db::{
            postgres::postgres_connection,
            repositories::{
                reminder_logs::ReminderLogPostgres, subscriptions::SubscriptionPostgres,
            },
        },
        notifications::{bark::BarkNotificationSender, log_only::LogOnlyNotificationSender},
    },
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Backend exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    crates::observability::init_observability("backend")?;

    let dotenvy_env = Arc::new(config_loader::load()?);
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(
        &dotenvy_env.database.url,
        dotenvy_env.database.max_connections,
    )?;
    info!("Postgres connection has been established");
    let db_pool_arc = Arc::new(postgres_pool);

    let sender: Arc<dyn NotificationSender + Send + Sync> = match dotenvy_env.bark.clone() {
        Some(bark_config) => {
            info!(base_url = %bark_config.base_url, "Bark notifications enabled");
            Arc::new(BarkNotificationSender::new(bark_config)?)
        }
        None => {
            warn!("BARK_KEY is not set; reminders will only be logged");
            Arc::new(LogOnlyNotificationSender)
        }
    };

    let reminder_usecase = Arc::new(backend::AppReminderUseCase::new(
        Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool_arc))),
        Arc::new(ReminderLogPostgres::new(Arc::clone(&db_pool_arc))),
        sender,
        dotenvy_env.reminder.day_clamp,
    ));
    info!(
        run_at = %dotenvy_env.reminder.run_at,
        day_clamp = %dotenvy_env.reminder.day_clamp,
        "Reminder schedule configured"
    );

    // Lives exactly as long as the HTTP server.
    let reminder_worker =
        reminder_worker::spawn(Arc::clone(&reminder_usecase), dotenvy_env.reminder.run_at);

    let served = http_serve::start(
        Arc::clone(&dotenvy_env),
        db_pool_arc,
        reminder_usecase,
        http_serve::shutdown_signal(),
    )
    .await;

    reminder_worker.shutdown().await;
    info!("Reminder worker has been stopped");

    served
}
