use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into};
use std::sync::Arc;

use crate::{
    domain::{
        entities::reminder_logs::InsertReminderLogEntity,
        repositories::reminder_logs::ReminderLogRepository,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::reminder_logs},
};

pub struct ReminderLogPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ReminderLogPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ReminderLogRepository for ReminderLogPostgres {
    async fn claim_reminder(
        &self,
        insert_reminder_log_entity: InsertReminderLogEntity,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // The (subscription_id, notified_on) primary key makes a second claim a no-op.
        let inserted = insert_into(reminder_logs::table)
            .values(&insert_reminder_log_entity)
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        Ok(inserted == 1)
    }
}
