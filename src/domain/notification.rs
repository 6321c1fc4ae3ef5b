use std::fmt;

use chrono::{Duration, NaiveDateTime};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

/// Offset-from-deadline trigger point for an exam reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MilestoneKind {
    #[serde(rename = "7days")]
    SevenDaysBefore,
    #[serde(rename = "3days")]
    ThreeDaysBefore,
    #[serde(rename = "1day")]
    OneDayBefore,
    #[serde(rename = "today")]
    OnTheDay,
}

impl MilestoneKind {
    /// All milestones, earliest trigger first
    pub const ALL: [MilestoneKind; 4] = [
        MilestoneKind::SevenDaysBefore,
        MilestoneKind::ThreeDaysBefore,
        MilestoneKind::OneDayBefore,
        MilestoneKind::OnTheDay,
    ];

    pub fn days_before(self) -> i64 {
        match self {
            Self::SevenDaysBefore => 7,
            Self::ThreeDaysBefore => 3,
            Self::OneDayBefore => 1,
            Self::OnTheDay => 0,
        }
    }

    pub fn offset(self) -> Duration {
        Duration::days(self.days_before())
    }

    /// The instant this milestone fires for an exam held at `exam_at`
    pub fn send_at(self, exam_at: NaiveDateTime) -> NaiveDateTime {
        exam_at - self.offset()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SevenDaysBefore => "7days",
            Self::ThreeDaysBefore => "3days",
            Self::OneDayBefore => "1day",
            Self::OnTheDay => "today",
        }
    }
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored reminder for a single (exam, milestone) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Owning exam; the exam remains the source of truth for the deadline
    pub exam_id: Uuid,
    #[serde(rename = "type")]
    pub kind: MilestoneKind,
    /// Fixed when the notification is planned, never recomputed
    pub send_at: NaiveDateTime,
    /// Set once the reminder was handed to the gateway
    pub sent: bool,
}

impl Notification {
    pub fn pending(exam_id: Uuid, kind: MilestoneKind, send_at: NaiveDateTime) -> Self {
        Self {
            exam_id,
            kind,
            send_at,
            sent: false,
        }
    }

    /// Composite identifier, unique per (exam, milestone)
    pub fn id(&self) -> String {
        format!("{}-{}", self.exam_id, self.kind)
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        !self.sent && self.send_at <= now
    }
}
