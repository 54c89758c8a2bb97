//! HTTP adapter for the Generation Service.

pub mod client;
pub mod models;

pub use client::HttpGenerationService;
