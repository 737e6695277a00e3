//! # bedside-database
//!
//! PostgreSQL connection management and the database-backed collaborators
//! of the notification feed: the care event source (queries plus
//! `LISTEN/NOTIFY` insert subscription) and the patient directory.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{CareEventRepository, PatientRepository};
