/// Basic application code
pub mod app;
/// Wall-clock abstraction
pub mod clock;
/// Notification delivery clients
pub mod client;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Exam reminder planning, scheduling and delivery
pub mod reminder;
/// Typed repositories over the key-value store
pub mod repo;
/// Application settings
pub mod settings;
/// Key-value persistence
pub mod store;
/// Application telemetry for tracing and logging
pub mod telemetry;
