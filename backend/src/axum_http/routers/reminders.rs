use crate::{axum_http::error_responses::AppError, usecases::reminders::ReminderUseCase};
use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use crates::domain::repositories::{
    notifications::NotificationSender, reminder_logs::ReminderLogRepository,
    subscriptions::SubscriptionRepository,
};
use std::sync::Arc;
use tracing::info;

pub fn routes<S, L, N>(reminder_usecase: Arc<ReminderUseCase<S, L, N>>) -> Router
where
    S: SubscriptionRepository + Send + Sync + 'static,
    L: ReminderLogRepository + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + ?Sized + 'static,
{
    Router::new()
        .route("/run", post(run_now::<S, L, N>))
        .with_state(reminder_usecase)
}

/// Runs the same check the daily scheduler runs; reminders already sent today are skipped.
pub async fn run_now<S, L, N>(
    State(reminder_usecase): State<Arc<ReminderUseCase<S, L, N>>>,
) -> Result<impl IntoResponse, AppError>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    L: ReminderLogRepository + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + ?Sized + 'static,
{
    info!("reminders: manual run requested");
    let report = reminder_usecase.run_daily_check().await?;
    Ok(Json(report))
}
