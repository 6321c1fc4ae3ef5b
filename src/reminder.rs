//! Exam-deadline reminders.
//!
//! Registering an exam plans up to four milestone notifications (seven, three
//! and one day before, and on the day itself), persists the future ones and
//! immediately sends a reminder if some milestones already passed. Stored
//! notifications are delivered later by an externally triggered sweep.

pub mod planner;
mod scheduler;
mod sweeper;
pub mod templates;

pub use scheduler::ReminderScheduler;
pub use sweeper::{ReminderSweeper, SweepFailure, SweepReport};
