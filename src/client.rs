mod email_client;
mod gateway;

pub use email_client::EmailClient;
pub use gateway::{Email, LogOnlyGateway, NotificationGateway};
