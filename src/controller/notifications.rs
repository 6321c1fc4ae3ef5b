use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpResponse, Responder};

use serde_json::json;

use crate::error::RestResult;
use crate::reminder::ReminderSweeper;

/// Run one sweep over the stored notifications.
/// Meant to be called periodically by an external scheduler.
#[tracing::instrument(name = "Check notifications", skip(sweeper))]
#[post("")]
async fn check(sweeper: web::Data<ReminderSweeper>) -> RestResult<impl Responder> {
    let report = sweeper.sweep_now().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "sentCount": report.dispatched,
    })))
}

/// Notification API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/check-notifications").service(check)
}
