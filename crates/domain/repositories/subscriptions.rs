use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::{
    InsertSubscriptionEntity, ReplaceSubscriptionEntity, SubscriptionEntity,
};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn list_subscriptions(&self) -> Result<Vec<SubscriptionEntity>>;

    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    async fn insert_subscription(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<Uuid>;

    /// Returns `false` when no row has the given id.
    async fn replace_subscription(
        &self,
        subscription_id: Uuid,
        replace_subscription_entity: ReplaceSubscriptionEntity,
    ) -> Result<bool>;

    /// Returns `false` when no row has the given id.
    async fn delete_subscription(&self, subscription_id: Uuid) -> Result<bool>;
}
