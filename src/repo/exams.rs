use uuid::Uuid;

use crate::domain::Exam;
use crate::store::{NotificationStore, StoreError};

const KEY_PREFIX: &str = "exam:";

/// Repository for exam records
pub struct ExamRepo;

impl ExamRepo {
    pub fn key(id: &Uuid) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }

    #[tracing::instrument(name = "Insert exam", skip(store, exam), fields(exam.id = %exam.id))]
    pub async fn insert(store: &dyn NotificationStore, exam: &Exam) -> Result<(), StoreError> {
        store.put(&Self::key(&exam.id), serde_json::to_value(exam)?).await
    }

    #[tracing::instrument(name = "Fetch exam by id", skip(store))]
    pub async fn fetch(store: &dyn NotificationStore, id: &Uuid) -> Result<Option<Exam>, StoreError> {
        match store.get(&Self::key(id)).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// All exams, soonest first
    #[tracing::instrument(name = "Fetch all exams", skip(store))]
    pub async fn fetch_all(store: &dyn NotificationStore) -> Result<Vec<Exam>, StoreError> {
        let mut exams: Vec<Exam> = store
            .scan_prefix(KEY_PREFIX)
            .await?
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(exam) => Some(exam),
                Err(error) => {
                    tracing::warn!(error.cause_chain = ?error, "Skipping malformed exam record {}", key);
                    None
                }
            })
            .collect();
        exams.sort_by_key(|exam| exam.exam_at);
        Ok(exams)
    }

    #[tracing::instrument(name = "Delete exam by id", skip(store))]
    pub async fn delete(store: &dyn NotificationStore, id: &Uuid) -> Result<(), StoreError> {
        store.delete(&Self::key(id)).await
    }
}
