use std::sync::Arc;

use crate::client::NotificationGateway;
use crate::clock::Clock;
use crate::domain::{Exam, ExamRequest, NewExam, Notification};
use crate::error::Result;
use crate::reminder::{planner, templates};
use crate::repo::{ExamRepo, NotificationRepo};
use crate::store::NotificationStore;

/// Registers exams and plans their reminder notifications
pub struct ReminderScheduler {
    store: Arc<dyn NotificationStore>,
    gateway: Arc<dyn NotificationGateway>,
    clock: Arc<dyn Clock>,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        gateway: Arc<dyn NotificationGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            gateway,
            clock,
        }
    }

    /// Validate and persist a new exam, store its future milestones, and send
    /// the confirmation plus any reminder that is already owed.
    ///
    /// Only validation and store failures are returned; dispatch failures are
    /// logged and never undo the writes already made.
    #[tracing::instrument(name = "Register an exam", skip(self, request), fields(exam.id = tracing::field::Empty))]
    pub async fn register(&self, request: ExamRequest) -> Result<Exam> {
        let new_exam = NewExam::try_from(request)?;

        let now = self.clock.now();
        let exam = Exam::new(new_exam, now);
        tracing::Span::current().record("exam.id", tracing::field::display(exam.id));

        // Notifications go first: if a later write fails, the ones already
        // stored have no exam and are skipped as orphans by every sweep
        let plan = planner::plan(exam.exam_at, now);
        for milestone in &plan.scheduled {
            let notification = Notification::pending(exam.id, milestone.kind, milestone.send_at);
            NotificationRepo::insert(self.store.as_ref(), &notification).await?;
        }

        ExamRepo::insert(self.store.as_ref(), &exam).await?;
        tracing::info!(
            "Planned {} reminder(s) for exam at {}",
            plan.scheduled.len(),
            exam.exam_at
        );

        let confirmation = templates::confirmation_email(&exam);
        if let Err(error) = self.gateway.send(&confirmation).await {
            tracing::warn!(error.cause_chain = ?error, "Failed to send registration confirmation");
        }

        if let Some(immediate) = plan.immediate {
            let reminder = templates::reminder_email(immediate.kind, &exam, immediate.days_until);
            match self.gateway.send(&reminder).await {
                Ok(()) => tracing::info!(kind = %immediate.kind, "Sent immediate reminder"),
                Err(error) => tracing::warn!(
                    error.cause_chain = ?error,
                    kind = %immediate.kind,
                    "Failed to send immediate reminder"),
            }
        }

        Ok(exam)
    }
}
