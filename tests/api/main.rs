mod exams;
mod health_check;
mod helpers;
