use async_trait::async_trait;

use crate::domain::EmailAddress;

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddress,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Outbound transport for reminder and confirmation messages.
///
/// Implementations must bound every call with a timeout; a timeout is
/// reported like any other failure.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(&self, email: &Email) -> anyhow::Result<()>;
}

/// Gateway used when no transport credentials are configured: messages are
/// logged and always reported as delivered.
#[derive(Debug)]
pub struct LogOnlyGateway {
    sender: EmailAddress,
}

impl LogOnlyGateway {
    pub fn new(sender: EmailAddress) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl NotificationGateway for LogOnlyGateway {
    #[tracing::instrument(
        name = "Log an email instead of sending it",
        skip(self, email),
        fields(recipient = %email.recipient)
    )]
    async fn send(&self, email: &Email) -> anyhow::Result<()> {
        tracing::info!(
            from = %self.sender,
            subject = %email.subject,
            "Email transport not configured, message logged only:\n{}",
            email.text_body
        );
        Ok(())
    }
}
