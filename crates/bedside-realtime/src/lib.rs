//! # bedside-realtime
//!
//! Notification feed for the bedside dashboard. Provides:
//!
//! - Initial load of recent care events with batched patient name lookup
//! - Realtime ingestion of inserted care events over a bounded channel
//! - Capped, newest-first retention with read/unread state and unread count
//! - Care event to title/message mapping and relative time formatting

pub mod feed;
pub mod notification;

pub use feed::handle::FeedHandle;
pub use feed::NotificationFeed;
pub use notification::formatter::{NotificationFormatter, NotificationMessage};
pub use notification::time_ago::{time_ago, time_ago_now};
