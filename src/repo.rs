mod exams;
mod notifications;

pub use exams::ExamRepo;
pub use notifications::NotificationRepo;
