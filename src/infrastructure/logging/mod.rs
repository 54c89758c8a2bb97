//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber, with an optional
//! rotating JSON file sink from tracing-appender.

pub mod logger;

pub use logger::LoggerImpl;
