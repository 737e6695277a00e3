//! # bedside-entity
//!
//! Domain models for the bedside notification feed. `CareEvent` and
//! `Patient` mirror database rows and derive `sqlx::FromRow`; `Notification`
//! is the feed's own presentation record. The [`source`] module holds the
//! contracts the feed consumes: the care event source and the patient
//! directory.

pub mod care;
pub mod notification;
pub mod patient;
pub mod source;

pub use care::{CareEvent, CareEventType};
pub use notification::{FeedSnapshot, Notification, NotificationType};
pub use patient::Patient;
pub use source::{EventSource, EventSubscription, PatientDirectory};
