//! UIDAI Core - Domain models, data context, and configuration
//!
//! This crate contains the typed record model for the cleaned Aadhaar datasets,
//! the error type shared by every other crate, and the layered analytics configuration.

pub mod config;
pub mod error;
pub mod models;

pub use error::{Result, UidaiError};
