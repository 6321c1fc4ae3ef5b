use chrono::{Duration, NaiveDateTime};

use crate::domain::MilestoneKind;

/// A milestone that fires in the future and must be stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub kind: MilestoneKind,
    pub send_at: NaiveDateTime,
}

/// A reminder owed right now because milestones already passed at planning time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImmediateReminder {
    /// Latest milestone whose instant has passed; selects the message template
    pub kind: MilestoneKind,
    pub days_until: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Strictly-future milestones, earliest first
    pub scheduled: Vec<Milestone>,
    pub immediate: Option<ImmediateReminder>,
}

/// Plan the reminders for an exam held at `exam_at`, as seen at `now`.
///
/// A milestone is scheduled only if it fires strictly after `now`. Milestones
/// at or before `now` are never stored; if any exist, a single immediate
/// reminder is reported instead, using the template of the latest of them.
pub fn plan(exam_at: NaiveDateTime, now: NaiveDateTime) -> Plan {
    let (scheduled, passed): (Vec<Milestone>, Vec<Milestone>) = MilestoneKind::ALL
        .into_iter()
        .map(|kind| Milestone {
            kind,
            send_at: kind.send_at(exam_at),
        })
        .partition(|milestone| milestone.send_at > now);

    let immediate = passed.last().map(|milestone| ImmediateReminder {
        kind: milestone.kind,
        days_until: days_until(exam_at, now),
    });

    Plan {
        scheduled,
        immediate,
    }
}

/// Whole calendar days left until `exam_at`, rounded up: 23 hours left is 1 day
pub fn days_until(exam_at: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let millis = (exam_at - now).num_milliseconds();
    let day = Duration::days(1).num_milliseconds();
    -(-millis).div_euclid(day)
}
