use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use crates::domain::{
    entities::{reminder_logs::InsertReminderLogEntity, subscriptions::SubscriptionEntity},
    repositories::{
        notifications::NotificationSender, reminder_logs::ReminderLogRepository,
        subscriptions::SubscriptionRepository,
    },
    value_objects::{due_dates::compute_due_date, enums::day_clamps::DayClamp},
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Outcome counts for one pass over all subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderTickReport {
    pub today: NaiveDate,
    pub checked: usize,
    pub notified: usize,
    pub skipped_duplicates: usize,
    pub invalid: usize,
    pub failed: usize,
}

impl ReminderTickReport {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            checked: 0,
            notified: 0,
            skipped_duplicates: 0,
            invalid: 0,
            failed: 0,
        }
    }
}

enum Outcome {
    NotDue,
    Notified,
    Duplicate,
    Invalid,
    Failed,
}

pub struct ReminderUseCase<S, L, N>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    L: ReminderLogRepository + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + ?Sized + 'static,
{
    subscription_repo: Arc<S>,
    reminder_log_repo: Arc<L>,
    sender: Arc<N>,
    day_clamp: DayClamp,
}

impl<S, L, N> ReminderUseCase<S, L, N>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    L: ReminderLogRepository + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + ?Sized + 'static,
{
    pub fn new(
        subscription_repo: Arc<S>,
        reminder_log_repo: Arc<L>,
        sender: Arc<N>,
        day_clamp: DayClamp,
    ) -> Self {
        Self {
            subscription_repo,
            reminder_log_repo,
            sender,
            day_clamp,
        }
    }

    /// Scheduler entry point: captures the local date once and checks everything against it.
    pub async fn run_daily_check(&self) -> Result<ReminderTickReport> {
        let today = Local::now().date_naive();
        self.run_check_for(today).await
    }

    /// Only a failure to load the subscription list is returned; per-subscription
    /// failures are logged and counted so one bad row or push never blocks the rest.
    pub async fn run_check_for(&self, today: NaiveDate) -> Result<ReminderTickReport> {
        info!(%today, sender = self.sender.sender_name(), "reminders: check started");

        let subscriptions = self
            .subscription_repo
            .list_subscriptions()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "reminders: failed to load subscriptions");
                err
            })?;

        let mut report = ReminderTickReport::new(today);

        for subscription in &subscriptions {
            report.checked += 1;
            match self.check_subscription(subscription, today).await {
                Outcome::NotDue => {}
                Outcome::Notified => report.notified += 1,
                Outcome::Duplicate => report.skipped_duplicates += 1,
                Outcome::Invalid => report.invalid += 1,
                Outcome::Failed => report.failed += 1,
            }
        }

        info!(
            %today,
            checked = report.checked,
            notified = report.notified,
            skipped_duplicates = report.skipped_duplicates,
            invalid = report.invalid,
            failed = report.failed,
            "reminders: check finished"
        );
        Ok(report)
    }

    async fn check_subscription(
        &self,
        subscription: &SubscriptionEntity,
        today: NaiveDate,
    ) -> Outcome {
        let billing_spec = match subscription.billing_spec() {
            Ok(spec) => spec,
            Err(err) => {
                warn!(
                    subscription_id = %subscription.id,
                    error = %err,
                    "reminders: skipping row with unreadable billing spec"
                );
                return Outcome::Invalid;
            }
        };

        let due = compute_due_date(&billing_spec, today, self.day_clamp);
        let Some(template) = billing_spec.reminder_policy().should_notify(due.days_left) else {
            debug!(
                subscription_id = %subscription.id,
                days_left = due.days_left,
                "reminders: not due for a reminder"
            );
            return Outcome::NotDue;
        };

        let claimed = self
            .reminder_log_repo
            .claim_reminder(InsertReminderLogEntity {
                subscription_id: subscription.id,
                notified_on: today,
                days_left: due.days_left as i32,
            })
            .await;
        match claimed {
            Ok(true) => {}
            Ok(false) => {
                info!(
                    subscription_id = %subscription.id,
                    %today,
                    "reminders: already notified today"
                );
                return Outcome::Duplicate;
            }
            Err(err) => {
                error!(
                    subscription_id = %subscription.id,
                    db_error = ?err,
                    "reminders: failed to record reminder marker"
                );
                return Outcome::Failed;
            }
        }

        let message = template.render(&subscription.name, subscription.price);
        match self.sender.send(message).await {
            Ok(()) => {
                info!(
                    subscription_id = %subscription.id,
                    name = %subscription.name,
                    days_left = due.days_left,
                    "reminders: notification sent"
                );
                Outcome::Notified
            }
            Err(err) => {
                // Not retried: the marker stays so later ticks today do not resend.
                error!(
                    subscription_id = %subscription.id,
                    sender = self.sender.sender_name(),
                    error = %err,
                    "reminders: notification delivery failed"
                );
                Outcome::Failed
            }
        }
    }
}
