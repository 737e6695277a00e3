//! # bedside-core
//!
//! Core crate for the bedside notification feed. Contains configuration
//! schemas, typed identifiers, the key-value store and alert sink traits,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other bedside crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
