mod email_address;
mod exam;
mod exam_subject;
mod notification;

pub use email_address::EmailAddress;
pub use exam::{Exam, ExamRequest, NewExam};
pub use exam_subject::ExamSubject;
pub use notification::{MilestoneKind, Notification};
