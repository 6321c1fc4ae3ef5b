use uuid::Uuid;

use crate::domain::Notification;
use crate::store::{NotificationStore, StoreError};

const KEY_PREFIX: &str = "notification:";

/// Repository for planned reminder notifications
pub struct NotificationRepo;

impl NotificationRepo {
    pub fn key(notification: &Notification) -> String {
        format!("{}{}", KEY_PREFIX, notification.id())
    }

    #[tracing::instrument(
        name = "Insert notification",
        skip(store, notification),
        fields(notification.id = %notification.id())
    )]
    pub async fn insert(
        store: &dyn NotificationStore,
        notification: &Notification,
    ) -> Result<(), StoreError> {
        store
            .put(&Self::key(notification), serde_json::to_value(notification)?)
            .await
    }

    /// Every stored notification, sent or not
    #[tracing::instrument(name = "Fetch all notifications", skip(store))]
    pub async fn fetch_all(store: &dyn NotificationStore) -> Result<Vec<Notification>, StoreError> {
        Self::scan(store, KEY_PREFIX).await
    }

    #[tracing::instrument(name = "Fetch notifications for exam", skip(store))]
    pub async fn fetch_for_exam(
        store: &dyn NotificationStore,
        exam_id: &Uuid,
    ) -> Result<Vec<Notification>, StoreError> {
        Self::scan(store, &format!("{}{}-", KEY_PREFIX, exam_id)).await
    }

    /// Flag a notification as delivered so later sweeps skip it
    #[tracing::instrument(
        name = "Mark notification sent",
        skip(store, notification),
        fields(notification.id = %notification.id())
    )]
    pub async fn mark_sent(
        store: &dyn NotificationStore,
        notification: &Notification,
    ) -> Result<(), StoreError> {
        let sent = Notification {
            sent: true,
            ..notification.clone()
        };
        Self::insert(store, &sent).await
    }

    async fn scan(
        store: &dyn NotificationStore,
        prefix: &str,
    ) -> Result<Vec<Notification>, StoreError> {
        let notifications = store
            .scan_prefix(prefix)
            .await?
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(notification) => Some(notification),
                Err(error) => {
                    tracing::warn!(
                        error.cause_chain = ?error,
                        "Skipping malformed notification record {}", key);
                    None
                }
            })
            .collect();
        Ok(notifications)
    }
}
