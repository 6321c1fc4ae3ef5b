use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

use reqwest::{Client, Method, Response};

use secrecy::Secret;

use serde::Serialize;

use url::Url;

use wiremock::MockServer;

use exam_reminders::app;
use exam_reminders::client::EmailClient;
use exam_reminders::clock::{Clock, MockClock};
use exam_reminders::domain::Notification;
use exam_reminders::repo::NotificationRepo;
use exam_reminders::store::InMemoryStore;
use exam_reminders::telemetry;

lazy_static::lazy_static! {
    static ref TRACING: () = {
        let filter = "info".to_string();
        if std::env::var("TEST_LOG").is_ok() {
            let subscriber = telemetry::create_subscriber(filter, std::io::stdout);
            telemetry::set_subscriber(subscriber).expect("Failed to set up test tracing");
        } else {
            let subscriber = telemetry::create_subscriber(filter, std::io::sink);
            telemetry::set_subscriber(subscriber).expect("Failed to set up test tracing");
        }
    };
}

#[derive(Debug, Default, Serialize)]
pub struct NewExam {
    pub subject: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub email: Option<String>,
    pub color: Option<String>,
}

impl NewExam {
    /// A complete registration for an exam held at `exam_at`
    pub fn at(subject: &str, exam_at: NaiveDateTime) -> Self {
        Self {
            subject: Some(subject.into()),
            date: Some(exam_at.format("%Y-%m-%d").to_string()),
            time: Some(exam_at.format("%H:%M").to_string()),
            email: Some("a@x.com".into()),
            color: Some("#A5D8FF".into()),
        }
    }
}

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub email_server: MockServer,
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<MockClock>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        lazy_static::initialize(&TRACING);

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let email_server = MockServer::start().await;

        let email_client = {
            let sender = "test@test.com"
                .parse()
                .expect("Failed to parse sender email address");
            let api_base_url =
                Url::parse(&email_server.uri()).expect("Failed to parse mock server uri");
            let api_auth_token = Secret::new("TestAuthorization".into());
            let api_timeout = Duration::from_secs(2);

            EmailClient::new(sender, api_timeout, api_base_url, api_auth_token)
                .expect("Failed to create email client")
        };

        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(MockClock::new(start_time()));

        let server = app::run(listener, store.clone(), Arc::new(email_client), clock.clone())
            .expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            email_server,
            store,
            clock,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn exam_create(&self, new_exam: &NewExam) -> reqwest::Result<Response> {
        self.request(Method::POST, "exams")
            .json(new_exam)
            .send()
            .await
    }

    pub async fn exam_list(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "exams").send().await
    }

    pub async fn exam_delete(&self, id: &str) -> reqwest::Result<Response> {
        self.request(Method::DELETE, &format!("exams/{}", id))
            .send()
            .await
    }

    pub async fn check_notifications(&self) -> reqwest::Result<Response> {
        self.request(Method::POST, "check-notifications")
            .send()
            .await
    }

    /// Run a sweep and return the reported `sentCount`
    pub async fn sweep(&self) -> u64 {
        let res = self
            .check_notifications()
            .await
            .expect("Failed to execute request");
        assert!(res.status().is_success());

        let body: serde_json::Value = res.json().await.expect("Failed to parse response");
        assert_eq!(Some(true), body["success"].as_bool());
        body["sentCount"].as_u64().expect("Missing sentCount")
    }

    /// Register an exam and return its id
    pub async fn register(&self, new_exam: &NewExam) -> String {
        let res = self
            .exam_create(new_exam)
            .await
            .expect("Failed to execute request");
        assert!(res.status().is_success());

        let body: serde_json::Value = res.json().await.expect("Failed to parse response");
        body["id"].as_str().expect("Missing exam id").to_string()
    }

    pub async fn notifications_for(&self, exam_id: &str) -> Vec<Notification> {
        let exam_id = exam_id.parse().expect("Exam id is not a uuid");
        NotificationRepo::fetch_for_exam(self.store.as_ref(), &exam_id)
            .await
            .expect("Failed to fetch notifications")
    }
}

fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}
