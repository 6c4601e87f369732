//! Shared types, errors, and configuration for Cadastro.
//!
//! This crate provides common types used across all other crates:
//! - The `Brl` money type with decimal precision
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::Brl;
