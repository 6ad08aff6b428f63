//! # Gigboard Common Library
//!
//! Shared code for the gigboard booking directory including:
//! - Database initialization and schema migrations
//! - Venue, artist and show record models
//! - Configuration loading and root folder resolution
//! - Timestamp and date formatting helpers

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
