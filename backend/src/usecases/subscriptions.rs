use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use crates::domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        due_dates::compute_due_date,
        enums::{billing_kinds::BillingKind, day_clamps::DayClamp},
        subscriptions::{
            InsertSubscriptionModel, SubscriptionDto, SubscriptionInputError, SubscriptionListDto,
        },
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error(transparent)]
    InvalidInput(#[from] SubscriptionInputError),
    #[error("subscription {0} not found")]
    NotFound(Uuid),
    #[error("billing kind cannot change from {from} to {to}")]
    BillingKindChanged { from: String, to: BillingKind },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::NotFound(_) => StatusCode::NOT_FOUND,
            SubscriptionError::BillingKindChanged { .. } => StatusCode::CONFLICT,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    day_clamp: DayClamp,
}

impl<S> SubscriptionUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>, day_clamp: DayClamp) -> Self {
        Self {
            subscription_repo,
            day_clamp,
        }
    }

    /// Annotated listing measured against a single `today` for every row.
    pub async fn list_subscriptions(&self, today: NaiveDate) -> UseCaseResult<SubscriptionListDto> {
        let entities = self
            .subscription_repo
            .list_subscriptions()
            .await
            .map_err(|err| {
                let err = SubscriptionError::Internal(err);
                error!(
                    status = err.status_code().as_u16(),
                    db_error = ?err,
                    "subscriptions: failed to list subscriptions"
                );
                err
            })?;

        let mut items = Vec::with_capacity(entities.len());
        for entity in entities {
            let billing_spec = match entity.billing_spec() {
                Ok(spec) => spec,
                Err(err) => {
                    warn!(
                        subscription_id = %entity.id,
                        error = %err,
                        "subscriptions: skipping row with unreadable billing spec"
                    );
                    continue;
                }
            };
            let due = compute_due_date(&billing_spec, today, self.day_clamp);
            items.push(SubscriptionDto::new(entity, &billing_spec, due));
        }

        let listing = SubscriptionListDto::new(today, items);
        info!(
            %today,
            subscription_count = listing.subscriptions.len(),
            upcoming_count = listing.summary.upcoming_count,
            "subscriptions: listing built"
        );
        Ok(listing)
    }

    pub async fn add_subscription(
        &self,
        insert_subscription_model: InsertSubscriptionModel,
    ) -> UseCaseResult<Uuid> {
        let draft = insert_subscription_model.validate().map_err(|err| {
            let err = SubscriptionError::InvalidInput(err);
            warn!(
                status = err.status_code().as_u16(),
                error = %err,
                "subscriptions: rejected new subscription"
            );
            err
        })?;

        let subscription_id = self
            .subscription_repo
            .insert_subscription(draft.to_insert_entity())
            .await
            .map_err(|err| {
                let err = SubscriptionError::Internal(err);
                error!(
                    status = err.status_code().as_u16(),
                    db_error = ?err,
                    "subscriptions: failed to insert subscription"
                );
                err
            })?;

        info!(
            %subscription_id,
            billing_kind = %draft.billing_spec.kind(),
            "subscriptions: subscription added"
        );
        Ok(subscription_id)
    }

    /// Full replacement. The billing kind chosen at creation cannot change.
    pub async fn replace_subscription(
        &self,
        subscription_id: Uuid,
        insert_subscription_model: InsertSubscriptionModel,
    ) -> UseCaseResult<()> {
        let draft = insert_subscription_model.validate().map_err(|err| {
            let err = SubscriptionError::InvalidInput(err);
            warn!(
                %subscription_id,
                status = err.status_code().as_u16(),
                error = %err,
                "subscriptions: rejected replacement"
            );
            err
        })?;

        let existing = self
            .subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                let err = SubscriptionError::Internal(err);
                error!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    db_error = ?err,
                    "subscriptions: failed to load subscription for replacement"
                );
                err
            })?;
        let Some(existing) = existing else {
            let err = SubscriptionError::NotFound(subscription_id);
            info!(
                %subscription_id,
                status = err.status_code().as_u16(),
                "subscriptions: replacement requested for unknown id"
            );
            return Err(err);
        };

        let new_kind = draft.billing_spec.kind();
        if existing.billing_kind != new_kind.as_str() {
            let err = SubscriptionError::BillingKindChanged {
                from: existing.billing_kind,
                to: new_kind,
            };
            warn!(
                %subscription_id,
                status = err.status_code().as_u16(),
                error = %err,
                "subscriptions: billing kind change refused"
            );
            return Err(err);
        }

        let replaced = self
            .subscription_repo
            .replace_subscription(subscription_id, draft.to_replace_entity(Utc::now()))
            .await
            .map_err(|err| {
                let err = SubscriptionError::Internal(err);
                error!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    db_error = ?err,
                    "subscriptions: failed to replace subscription"
                );
                err
            })?;

        if !replaced {
            // Row vanished between the lookup and the update.
            let err = SubscriptionError::NotFound(subscription_id);
            info!(
                %subscription_id,
                status = err.status_code().as_u16(),
                "subscriptions: subscription gone before replacement"
            );
            return Err(err);
        }

        info!(%subscription_id, "subscriptions: subscription replaced");
        Ok(())
    }

    pub async fn delete_subscription(&self, subscription_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .subscription_repo
            .delete_subscription(subscription_id)
            .await
            .map_err(|err| {
                let err = SubscriptionError::Internal(err);
                error!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    db_error = ?err,
                    "subscriptions: failed to delete subscription"
                );
                err
            })?;

        if !deleted {
            let err = SubscriptionError::NotFound(subscription_id);
            info!(
                %subscription_id,
                status = err.status_code().as_u16(),
                "subscriptions: delete requested for unknown id"
            );
            return Err(err);
        }

        info!(%subscription_id, "subscriptions: subscription deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use crates::domain::{
        entities::subscriptions::SubscriptionEntity,
        repositories::subscriptions::MockSubscriptionRepository,
        value_objects::billing_specs::BillingSpecError,
    };
    use mockall::predicate::eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recurring_row(name: &str, price: f64, cycle_day: i32) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
            category: "media".to_string(),
            color: "blue".to_string(),
            billing_kind: "recurring_day_of_month".to_string(),
            cycle_day: Some(cycle_day),
            expire_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn fixed_row(name: &str, price: f64, expire_date: NaiveDate) -> SubscriptionEntity {
        SubscriptionEntity {
            billing_kind: "fixed_expiry_date".to_string(),
            cycle_day: None,
            expire_date: Some(expire_date),
            ..recurring_row(name, price, 1)
        }
    }

    fn model(cycle_day: Option<i32>, expire_date: Option<&str>) -> InsertSubscriptionModel {
        InsertSubscriptionModel {
            name: "YouTube Premium".to_string(),
            price: 11.99,
            category: "video".to_string(),
            color: "red".to_string(),
            cycle_day,
            expire_date: expire_date.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn listing_annotates_sorts_and_summarizes() {
        let rows = vec![
            recurring_row("gym", 30.0, 15),
            fixed_row("domain", 12.0, date(2024, 1, 18)),
            recurring_row("music", 10.0, 25),
            fixed_row("vpn", 50.0, date(2023, 12, 1)),
        ];

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_list_subscriptions()
            .times(1)
            .returning(move || {
                let rows = rows.clone();
                Box::pin(async move { Ok(rows) })
            });

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), DayClamp::Day28);
        let listing = usecase.list_subscriptions(date(2024, 1, 20)).await.unwrap();

        let names: Vec<&str> = listing
            .subscriptions
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["vpn", "domain", "music", "gym"]);

        let days: Vec<i64> = listing.subscriptions.iter().map(|s| s.days_left).collect();
        assert_eq!(days, vec![-50, -2, 5, 26]);
        assert_eq!(listing.subscriptions[3].due_date, "2024-02-15");

        assert_eq!(listing.summary.upcoming_count, 3);
        assert_eq!(listing.summary.total_cost, 102.0);
        assert_eq!(listing.summary.monthly_total, 40.0);
        assert_eq!(listing.summary.yearly_total, 480.0);
    }

    #[tokio::test]
    async fn listing_skips_rows_with_broken_billing_spec() {
        let mut broken = recurring_row("broken", 1.0, 0);
        broken.cycle_day = Some(99);
        let rows = vec![broken, recurring_row("ok", 2.0, 21)];

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_list_subscriptions().returning(move || {
            let rows = rows.clone();
            Box::pin(async move { Ok(rows) })
        });

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), DayClamp::Day28);
        let listing = usecase.list_subscriptions(date(2024, 1, 20)).await.unwrap();

        assert_eq!(listing.subscriptions.len(), 1);
        assert_eq!(listing.subscriptions[0].name, "ok");
    }

    #[tokio::test]
    async fn listing_storage_failure_is_internal() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_list_subscriptions()
            .returning(|| Box::pin(async { Err(anyhow!("connection refused")) }));

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), DayClamp::Day28);
        let err = usecase
            .list_subscriptions(date(2024, 1, 20))
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::Internal(_)));
        assert_eq!(err.status_code().as_u16(), 500);
    }

    #[tokio::test]
    async fn add_inserts_validated_entity() {
        let new_id = Uuid::new_v4();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_insert_subscription()
            .withf(|entity| {
                entity.billing_kind == "fixed_expiry_date"
                    && entity.cycle_day.is_none()
                    && entity.expire_date == NaiveDate::from_ymd_opt(2026, 1, 18)
            })
            .times(1)
            .returning(move |_| Box::pin(async move { Ok(new_id) }));

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), DayClamp::Day28);
        let id = usecase
            .add_subscription(model(None, Some("2026-01-18")))
            .await
            .unwrap();

        assert_eq!(id, new_id);
    }

    #[tokio::test]
    async fn add_rejects_invalid_input_before_storage() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_insert_subscription().never();

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), DayClamp::Day28);

        let err = usecase
            .add_subscription(model(Some(0), None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SubscriptionError::InvalidInput(SubscriptionInputError::Billing(
                BillingSpecError::InvalidCycleDay(0)
            ))
        ));
        assert_eq!(err.status_code().as_u16(), 400);

        let err = usecase
            .add_subscription(model(None, Some("2026-02-31")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SubscriptionError::InvalidInput(SubscriptionInputError::Billing(
                BillingSpecError::InvalidDateFormat(_)
            ))
        ));
    }

    #[tokio::test]
    async fn replace_keeps_billing_kind() {
        let existing = recurring_row("music", 10.0, 25);
        let subscription_id = existing.id;

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_id()
            .with(eq(subscription_id))
            .returning(move |_| {
                let existing = existing.clone();
                Box::pin(async move { Ok(Some(existing)) })
            });
        subscription_repo.expect_replace_subscription().never();

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), DayClamp::Day28);
        let err = usecase
            .replace_subscription(subscription_id, model(None, Some("2026-01-18")))
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::BillingKindChanged { .. }));
        assert_eq!(err.status_code().as_u16(), 409);
    }

    #[tokio::test]
    async fn replace_writes_full_row() {
        let existing = recurring_row("music", 10.0, 25);
        let subscription_id = existing.id;

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_by_id().returning(move |_| {
            let existing = existing.clone();
            Box::pin(async move { Ok(Some(existing)) })
        });
        subscription_repo
            .expect_replace_subscription()
            .withf(move |id, entity| {
                *id == subscription_id
                    && entity.name == "YouTube Premium"
                    && entity.cycle_day == Some(3)
                    && entity.expire_date.is_none()
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), DayClamp::Day28);
        usecase
            .replace_subscription(subscription_id, model(Some(3), None))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn replace_unknown_id_is_not_found() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), DayClamp::Day28);
        let err = usecase
            .replace_subscription(Uuid::new_v4(), model(Some(3), None))
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let known = Uuid::new_v4();
        let unknown = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_delete_subscription()
            .with(eq(known))
            .returning(|_| Box::pin(async { Ok(true) }));
        subscription_repo
            .expect_delete_subscription()
            .with(eq(unknown))
            .returning(|_| Box::pin(async { Ok(false) }));

        let usecase = SubscriptionUseCase::new(Arc::new(subscription_repo), DayClamp::Day28);
        usecase.delete_subscription(known).await.unwrap();

        let err = usecase.delete_subscription(unknown).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::NotFound(id) if id == unknown));
        assert_eq!(err.status_code().as_u16(), 404);
    }
}
