use std::sync::Arc;

use chrono::NaiveDateTime;

use tokio::sync::Mutex;

use crate::client::NotificationGateway;
use crate::clock::Clock;
use crate::domain::Notification;
use crate::error::{Error, Result};
use crate::reminder::{planner, templates};
use crate::repo::{ExamRepo, NotificationRepo};
use crate::store::NotificationStore;

/// Outcome of a single sweep
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Notifications handed to the gateway successfully
    pub dispatched: usize,
    /// Due notifications whose exam no longer exists
    pub orphaned: usize,
    pub failures: Vec<SweepFailure>,
}

#[derive(Debug)]
pub struct SweepFailure {
    pub notification_id: String,
    pub error: Error,
}

enum Delivery {
    Sent,
    Orphaned,
}

/// Delivers due reminder notifications, on demand.
///
/// Delivery is at-least-once: a notification is marked sent only after the
/// gateway accepted it, so a failed dispatch or a failed sent-flag write is
/// retried by the next sweep. Overlapping sweeps within this process are
/// serialized; sweeps running in separate processes may both deliver the
/// same notification.
pub struct ReminderSweeper {
    store: Arc<dyn NotificationStore>,
    gateway: Arc<dyn NotificationGateway>,
    clock: Arc<dyn Clock>,
    in_progress: Mutex<()>,
}

impl ReminderSweeper {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        gateway: Arc<dyn NotificationGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            gateway,
            clock,
            in_progress: Mutex::new(()),
        }
    }

    /// Sweep as of the current clock time
    pub async fn sweep_now(&self) -> Result<SweepReport> {
        let now = self.clock.now();
        self.sweep(now).await
    }

    /// Dispatch every unsent notification with `send_at <= now`.
    ///
    /// Only a failure to scan the store aborts the sweep; failures for single
    /// notifications are collected in the report.
    #[tracing::instrument(name = "Sweep due notifications", skip(self))]
    pub async fn sweep(&self, now: NaiveDateTime) -> Result<SweepReport> {
        let _guard = self.in_progress.lock().await;

        let due: Vec<Notification> = NotificationRepo::fetch_all(self.store.as_ref())
            .await?
            .into_iter()
            .filter(|notification| notification.is_due(now))
            .collect();
        tracing::debug!("{} notification(s) due", due.len());

        let mut report = SweepReport::default();
        for notification in due {
            match self.deliver(&notification, now).await {
                Ok(Delivery::Sent) => report.dispatched += 1,
                Ok(Delivery::Orphaned) => report.orphaned += 1,
                Err(error) => {
                    tracing::warn!(
                        error.cause_chain = ?error,
                        notification.id = %notification.id(),
                        "Failed to deliver notification, leaving it for the next sweep");
                    report.failures.push(SweepFailure {
                        notification_id: notification.id(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            dispatched = report.dispatched,
            orphaned = report.orphaned,
            failed = report.failures.len(),
            "Sweep finished"
        );
        Ok(report)
    }

    async fn deliver(&self, notification: &Notification, now: NaiveDateTime) -> Result<Delivery> {
        let exam = match ExamRepo::fetch(self.store.as_ref(), &notification.exam_id).await? {
            Some(exam) => exam,
            None => {
                tracing::warn!(
                    notification.id = %notification.id(),
                    exam.id = %notification.exam_id,
                    "Orphaned notification: exam no longer exists, skipping");
                return Ok(Delivery::Orphaned);
            }
        };

        let days_until = planner::days_until(exam.exam_at, now);
        let email = templates::reminder_email(notification.kind, &exam, days_until);
        self.gateway.send(&email).await.map_err(Error::Dispatch)?;

        // A failure here means the reminder goes out again next sweep
        if let Err(error) = NotificationRepo::mark_sent(self.store.as_ref(), notification).await {
            tracing::error!(
                error.cause_chain = ?error,
                notification.id = %notification.id(),
                "Reminder was dispatched but could not be marked sent");
            return Err(error.into());
        }
        Ok(Delivery::Sent)
    }
}
