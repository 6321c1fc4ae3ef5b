use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::client::NotificationGateway;
use crate::clock::Clock;
use crate::controller::{exams, notifications};
use crate::reminder::{ReminderScheduler, ReminderSweeper};
use crate::store::NotificationStore;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    store: Arc<dyn NotificationStore>,
    gateway: Arc<dyn NotificationGateway>,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<Server> {
    let scheduler = ReminderScheduler::new(store.clone(), gateway.clone(), clock.clone());
    let sweeper = ReminderSweeper::new(store.clone(), gateway, clock);

    // Wrap application data
    let store: web::Data<dyn NotificationStore> = web::Data::from(store);
    let scheduler = web::Data::new(scheduler);
    let sweeper = web::Data::new(sweeper);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(store.clone())
            .app_data(scheduler.clone())
            .app_data(sweeper.clone())
            .service(health_check)
            .service(exams::scope())
            .service(notifications::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
