use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Days, Local, NaiveDateTime, NaiveTime, TimeZone};
use crates::domain::repositories::{
    notifications::NotificationSender, reminder_logs::ReminderLogRepository,
    subscriptions::SubscriptionRepository,
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{error, info, warn};

use crate::usecases::reminders::ReminderUseCase;

/// Owns the daily reminder task. Dropping the handle without calling
/// [`ReminderWorkerHandle::shutdown`] also stops the loop, but without waiting for it.
pub struct ReminderWorkerHandle {
    shutdown_tx: watch::Sender<bool>,
    join_handle: JoinHandle<()>,
}

impl ReminderWorkerHandle {
    pub async fn shutdown(self) {
        // Err only when the loop already exited and dropped its receiver.
        let _ = self.shutdown_tx.send(true);
        if let Err(err) = self.join_handle.await {
            error!(error = %err, "reminder_worker: task ended abnormally");
        }
    }
}

pub fn spawn<S, L, N>(usecase: Arc<ReminderUseCase<S, L, N>>, run_at: NaiveTime) -> ReminderWorkerHandle
where
    S: SubscriptionRepository + Send + Sync + 'static,
    L: ReminderLogRepository + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + ?Sized + 'static,
{
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let join_handle = tokio::spawn(run(usecase, run_at, shutdown_rx));

    ReminderWorkerHandle {
        shutdown_tx,
        join_handle,
    }
}

async fn run<S, L, N>(
    usecase: Arc<ReminderUseCase<S, L, N>>,
    run_at: NaiveTime,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    S: SubscriptionRepository + Send + Sync + 'static,
    L: ReminderLogRepository + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + ?Sized + 'static,
{
    info!(%run_at, "reminder_worker: starting daily loop");
    loop {
        let now = Local::now();
        let next_run = next_run_after(now.naive_local(), run_at);
        let wait = wait_until(now, next_run);
        info!(
            next_run = %next_run,
            wait_secs = wait.as_secs(),
            "reminder_worker: sleeping until next run"
        );

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = shutdown_rx.changed() => {
                info!("reminder_worker: shutdown requested");
                break;
            }
        }

        match usecase.run_daily_check().await {
            Ok(report) => info!(
                notified = report.notified,
                failed = report.failed,
                "reminder_worker: daily check completed"
            ),
            Err(err) => error!(error = %err, "reminder_worker: daily check failed"),
        }
    }
    info!("reminder_worker: stopped");
}

/// Next local wall-clock occurrence of `run_at` strictly after `now`.
pub fn next_run_after(now: NaiveDateTime, run_at: NaiveTime) -> NaiveDateTime {
    let today_run = now.date().and_time(run_at);
    if today_run > now {
        return today_run;
    }
    (now.date() + Days::new(1)).and_time(run_at)
}

fn wait_until(now: DateTime<Local>, next_run: NaiveDateTime) -> Duration {
    let target = match Local.from_local_datetime(&next_run).earliest() {
        Some(target) => target,
        None => {
            // run_at falls into a DST gap; the wall-clock difference is close enough.
            warn!(next_run = %next_run, "reminder_worker: scheduled time does not exist locally");
            return (next_run - now.naive_local()).to_std().unwrap_or(Duration::ZERO);
        }
    };
    (target - now).to_std().unwrap_or(Duration::ZERO)
}
