use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::domain::{EmailAddress, ExamSubject, MilestoneKind};
use crate::error::{Error, Result};

const MAX_COLOR_LEN: usize = 32;

/// Exam registration payload as received from clients, prior to validation
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExamRequest {
    pub subject: Option<String>,
    /// ISO-8601 calendar date, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Local time-of-day, `HH:MM` or `HH:MM:SS`
    pub time: Option<String>,
    pub email: Option<String>,
    pub color: Option<String>,
}

/// Validated exam registration
#[derive(Debug, Clone)]
pub struct NewExam {
    pub subject: ExamSubject,
    pub exam_at: NaiveDateTime,
    pub recipient: EmailAddress,
    pub color: Option<String>,
}

impl TryFrom<ExamRequest> for NewExam {
    type Error = Error;

    fn try_from(request: ExamRequest) -> Result<Self> {
        let subject: ExamSubject = required("subject", request.subject)?.parse()?;
        let date = parse_date(&required("date", request.date)?)?;
        let time = parse_time(&required("time", request.time)?)?;
        let recipient: EmailAddress = required("email", request.email)?.parse()?;

        let exam_at = date.and_time(time);
        // Every milestone instant must be representable
        if exam_at
            .checked_sub_signed(MilestoneKind::SevenDaysBefore.offset())
            .is_none()
        {
            return Err(Error::Validation("Exam date is out of range".into()));
        }

        let color = match request.color.map(|c| c.trim().to_string()) {
            Some(c) if c.is_empty() => None,
            Some(c) if c.chars().count() > MAX_COLOR_LEN => {
                return Err(Error::Validation("Color too long".into()))
            }
            other => other,
        };

        Ok(Self {
            subject,
            exam_at,
            recipient,
            color,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Validation(format!("Missing required field: {}", field))),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| Error::Validation(format!("{} is not a valid date", value)))
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| Error::Validation(format!("{} is not a valid time", value)))
}

/// Stored exam record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: Uuid,
    pub subject: ExamSubject,
    /// Authoritative deadline, in the server's local zone
    pub exam_at: NaiveDateTime,
    #[serde(rename = "email")]
    pub recipient: EmailAddress,
    pub color: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Exam {
    /// Mint a new exam record with a fresh identifier
    pub fn new(new_exam: NewExam, created_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: new_exam.subject,
            exam_at: new_exam.exam_at,
            recipient: new_exam.recipient,
            color: new_exam.color,
            created_at,
        }
    }
}
