use crate::{
    axum_http::error_responses::AppError,
    usecases::subscriptions::SubscriptionUseCase,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use chrono::Local;
use crates::{
    domain::{
        repositories::subscriptions::SubscriptionRepository,
        value_objects::{
            enums::day_clamps::DayClamp,
            subscriptions::{InsertSubscriptionModel, SubscriptionCreatedDto},
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::subscriptions::SubscriptionPostgres,
    },
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>, day_clamp: DayClamp) -> Router {
    let subscriptions_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let subscriptions_usecase =
        SubscriptionUseCase::new(Arc::new(subscriptions_repository), day_clamp);

    Router::new()
        .route("/", get(list).post(add))
        .route("/:subscription_id", put(replace).delete(remove))
        .with_state(Arc::new(subscriptions_usecase))
}

pub async fn list<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
) -> Result<impl IntoResponse, AppError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    // One date for every row so the summary agrees with the per-item days_left.
    let today = Local::now().date_naive();
    info!(%today, "subscriptions: list request received");

    let listing = subscriptions_usecase.list_subscriptions(today).await?;
    Ok(Json(listing))
}

pub async fn add<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Json(insert_subscription_model): Json<InsertSubscriptionModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    info!(name = %insert_subscription_model.name, "subscriptions: add request received");

    let id = subscriptions_usecase
        .add_subscription(insert_subscription_model)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionCreatedDto {
            status: "ok".to_string(),
            id,
        }),
    ))
}

pub async fn replace<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(subscription_id): Path<Uuid>,
    Json(insert_subscription_model): Json<InsertSubscriptionModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    info!(%subscription_id, "subscriptions: replace request received");

    subscriptions_usecase
        .replace_subscription(subscription_id, insert_subscription_model)
        .await?;

    Ok(Json(json!({ "status": "ok" })))
}

pub async fn remove<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(subscription_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    info!(%subscription_id, "subscriptions: delete request received");

    subscriptions_usecase
        .delete_subscription(subscription_id)
        .await?;

    Ok(Json(json!({ "status": "ok" })))
}
