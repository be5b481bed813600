//! Lead Relay Library
//!
//! Receives a contact-form lead, stores it in DynamoDB, emails it through
//! Mailgun and reports the outcome to a Discord channel.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core relay logic.
//! - `data`: Data access layer.
//! - `integrations`: External service integrations.
//! - `obs`: Observability and logging.
//! - `config`: Configuration management.
//! - `db_storage`: Lead table writes.
//! - `discord`: Discord chat notifier.
//! - `errors`: Error handling types.
//! - `handlers`: Lambda and HTTP entry points.
//! - `mailgun`: Mailgun email notifier.
//! - `models`: Core data models.
//! - `payload`: Chat notification payload builder.

pub mod api;
pub mod core;
pub mod data;
pub mod integrations;
pub mod obs;

// Re-export primary modules for shared use in tests and other binaries
pub mod config;
pub mod db_storage;
pub mod discord;
pub mod errors;
pub mod handlers;
pub mod mailgun;
pub mod models;
pub mod payload;
