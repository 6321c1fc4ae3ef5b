/// Exam registration endpoints
pub mod exams;
/// Reminder sweep trigger
pub mod notifications;
