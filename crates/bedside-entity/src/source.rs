//! Contracts for the collaborators the notification feed reads from.
//!
//! The feed never talks to a database directly: it queries and subscribes
//! through an [`EventSource`] and resolves names through a
//! [`PatientDirectory`]. `bedside-database` provides the Postgres versions.

use std::collections::{HashMap, HashSet};
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{BoxStream, Stream};

use bedside_core::result::AppResult;
use bedside_core::types::id::PatientId;

use crate::care::CareEvent;
use crate::patient::Patient;

/// Queryable, subscribable log of care events.
#[async_trait]
pub trait EventSource: Send + Sync + std::fmt::Debug + 'static {
    /// Events created at or after `since`, newest first, at most `limit`.
    async fn query_recent(&self, since: DateTime<Utc>, limit: usize) -> AppResult<Vec<CareEvent>>;

    /// Open a push subscription for newly inserted events.
    async fn subscribe_inserts(&self) -> AppResult<EventSubscription>;
}

/// Resolves patient identifiers to patients.
#[async_trait]
pub trait PatientDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Resolve a set of ids in one round trip. Unknown ids are absent from the map.
    async fn lookup_many(&self, ids: &HashSet<PatientId>) -> AppResult<HashMap<PatientId, Patient>>;

    /// Resolve a single id.
    async fn lookup_one(&self, id: PatientId) -> AppResult<Option<Patient>>;
}

/// A live insert subscription.
///
/// Yields events in the order the backend emits them. The subscription is
/// released when it is dropped or [`unsubscribe`](Self::unsubscribe)d; the
/// release hook, if any, runs exactly once.
pub struct EventSubscription {
    stream: BoxStream<'static, AppResult<CareEvent>>,
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl EventSubscription {
    /// Wrap a stream of events.
    pub fn new(stream: BoxStream<'static, AppResult<CareEvent>>) -> Self {
        Self {
            stream,
            on_release: None,
        }
    }

    /// Run `hook` when the subscription is released.
    pub fn with_release_hook(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }

    /// Release the subscription.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Stream for EventSubscription {
    type Item = AppResult<CareEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().stream.as_mut().poll_next(cx)
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Some(hook) = self.on_release.take() {
            hook();
        }
    }
}

impl std::fmt::Debug for EventSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSubscription")
            .field("has_release_hook", &self.on_release.is_some())
            .finish()
    }
}
