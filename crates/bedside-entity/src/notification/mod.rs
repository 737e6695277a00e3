//! Notification domain entities.

pub mod kind;
pub mod model;
pub mod snapshot;

pub use kind::NotificationType;
pub use model::Notification;
pub use snapshot::FeedSnapshot;
