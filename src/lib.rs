//! Inggris-Chan's Rust SDK.
//!
//! Requests vocabulary lists and multiple-choice exercises from a generative
//! language service and tracks a learner's answers until they are revealed.

pub mod activity;
pub mod config;
pub mod menu;

pub use config::GeminiConfig;
