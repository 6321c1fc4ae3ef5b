use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use sqlx::PgPool;

use exam_reminders::app;
use exam_reminders::clock::SystemClock;
use exam_reminders::settings::Settings;
use exam_reminders::store::{InMemoryStore, NotificationStore, PgStore};
use exam_reminders::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    telemetry::init(settings.app.log_filter())?;

    let store: Arc<dyn NotificationStore> = match &settings.database {
        Some(database) => {
            let pool = PgPool::connect_with(database.with_db())
                .await
                .context("Failed to connect to the database")?;
            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("No database configured, records are kept in memory only");
            Arc::new(InMemoryStore::new())
        }
    };

    let gateway = settings.email.gateway()?;

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    app::run(listener, store, gateway, Arc::new(SystemClock))?
        .await
        .context("Failed to run app")
}
