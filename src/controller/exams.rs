use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, post, web, HttpResponse, Responder};

use serde_json::json;

use uuid::Uuid;

use crate::domain::ExamRequest;
use crate::error::RestResult;
use crate::reminder::ReminderScheduler;
use crate::repo::ExamRepo;
use crate::store::NotificationStore;

/// Register a new exam and plan its reminders
#[tracing::instrument(name = "Create an exam", skip(body, scheduler))]
#[post("")]
async fn create(
    body: web::Json<ExamRequest>,
    scheduler: web::Data<ReminderScheduler>,
) -> RestResult<impl Responder> {
    let exam = scheduler.register(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(exam))
}

/// List all exams, soonest first
#[tracing::instrument(name = "List exams", skip(store))]
#[get("")]
async fn list(store: web::Data<dyn NotificationStore>) -> RestResult<impl Responder> {
    let exams = ExamRepo::fetch_all(store.get_ref()).await?;

    Ok(HttpResponse::Ok().json(exams))
}

/// Remove an exam. Its notifications are kept and become orphans.
#[tracing::instrument(name = "Delete an exam", skip(store))]
#[delete("/{id}")]
async fn remove(
    path: web::Path<(Uuid,)>,
    store: web::Data<dyn NotificationStore>,
) -> RestResult<impl Responder> {
    let (id,) = path.into_inner();

    ExamRepo::delete(store.get_ref(), &id).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Exam API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/exams")
        .service(create)
        .service(list)
        .service(remove)
}
