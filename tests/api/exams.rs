use chrono::Duration;

use reqwest::StatusCode;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{NewExam, TestApp};

#[tokio::test]
async fn create_returns_the_exam_for_valid_request() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let exam_at = app.now() + Duration::days(10);
    let res = app
        .exam_create(&NewExam::at("Matematika", exam_at))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let body: serde_json::Value = res.json().await.expect("Failed to parse response");
    assert_eq!("Matematika", body["subject"]);
    assert_eq!("a@x.com", body["email"]);
    assert_eq!("#A5D8FF", body["color"]);
    assert_eq!(
        exam_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        body["examAt"].as_str().unwrap()
    );
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn create_returns_bad_request_for_missing_data() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let valid = || NewExam::at("Fisika", app.now() + Duration::days(10));
    let test_cases = vec![
        ("missing subject", NewExam { subject: None, ..valid() }),
        ("missing date", NewExam { date: None, ..valid() }),
        ("missing time", NewExam { time: None, ..valid() }),
        ("missing email", NewExam { email: None, ..valid() }),
        ("missing everything", NewExam::default()),
        ("malformed email", NewExam { email: Some("bad email address".into()), ..valid() }),
        ("malformed date", NewExam { date: Some("besok".into()), ..valid() }),
    ];

    for (desc, new_exam) in test_cases {
        let res = app
            .exam_create(&new_exam)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when payload was {}",
            desc
        );

        let body: serde_json::Value = res.json().await.expect("Failed to parse error payload");
        assert_eq!(Some(false), body["success"].as_bool());
        assert!(body["error"].is_string());
    }

    let res = app.exam_list().await.expect("Failed to execute request");
    let exams: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(exams.is_empty());
}

#[tokio::test]
async fn create_sends_only_a_confirmation_for_distant_exam() {
    let app = TestApp::spawn().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let exam_id = app
        .register(&NewExam::at("Matematika", app.now() + Duration::days(10)))
        .await;

    let notifications = app.notifications_for(&exam_id).await;
    assert_eq!(4, notifications.len());
    assert!(notifications.iter().all(|n| !n.sent));

    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();
    assert_eq!("a@x.com", body["To"]);
    assert_eq!("Ujian Matematika Telah Didaftarkan", body["Subject"]);
}

#[tokio::test]
async fn create_sends_immediate_reminder_for_close_exam() {
    let app = TestApp::spawn().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let exam_id = app
        .register(&NewExam::at("Kimia", app.now() + Duration::days(2)))
        .await;

    assert_eq!(2, app.notifications_for(&exam_id).await.len());

    let requests = app.email_server.received_requests().await.unwrap();
    let reminder: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!("2 Hari Lagi Ujian Kimia - Tetap Tenang", reminder["Subject"]);
}

#[tokio::test]
async fn create_succeeds_when_email_delivery_fails() {
    let app = TestApp::spawn().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let exam_id = app
        .register(&NewExam::at("Biologi", app.now() + Duration::days(10)))
        .await;

    assert_eq!(4, app.notifications_for(&exam_id).await.len());
}

#[tokio::test]
async fn list_returns_exams_sorted_by_date() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    for (subject, days) in [("Sejarah", 20), ("Ekonomi", 5), ("Geografi", 12)] {
        app.register(&NewExam::at(subject, app.now() + Duration::days(days)))
            .await;
    }

    let res = app.exam_list().await.expect("Failed to execute request");
    assert_eq!(StatusCode::OK, res.status());

    let exams: Vec<serde_json::Value> = res.json().await.unwrap();
    let subjects: Vec<&str> = exams
        .iter()
        .map(|exam| exam["subject"].as_str().unwrap())
        .collect();
    assert_eq!(vec!["Ekonomi", "Geografi", "Sejarah"], subjects);
}

#[tokio::test]
async fn delete_removes_exam_but_keeps_notifications() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let exam_id = app
        .register(&NewExam::at("Fisika", app.now() + Duration::days(10)))
        .await;

    let res = app
        .exam_delete(&exam_id)
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::OK, res.status());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some(true), body["success"].as_bool());

    let exams: Vec<serde_json::Value> = app.exam_list().await.unwrap().json().await.unwrap();
    assert!(exams.is_empty());
    assert_eq!(4, app.notifications_for(&exam_id).await.len());
}
