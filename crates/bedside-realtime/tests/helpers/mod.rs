//! In-memory collaborators for exercising the feed without a database.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use tokio::sync::{Semaphore, mpsc};

use bedside_core::config::FeedConfig;
use bedside_core::error::AppError;
use bedside_core::result::AppResult;
use bedside_core::traits::alert::{AlertLevel, AlertSink};
use bedside_core::types::id::PatientId;
use bedside_entity::care::{CareEvent, CareEventType};
use bedside_entity::notification::FeedSnapshot;
use bedside_entity::patient::Patient;
use bedside_entity::source::{EventSource, EventSubscription, PatientDirectory};
use bedside_realtime::{FeedHandle, NotificationFeed};

const WAIT: Duration = Duration::from_secs(5);

/// Event source serving a mutable list of events and a push channel.
#[derive(Debug, Default)]
pub struct FakeEventSource {
    pub recent: Mutex<Vec<CareEvent>>,
    pub fail_queries: AtomicBool,
    pub panic_queries: AtomicBool,
    pub fail_subscribe: AtomicBool,
    pub queries: AtomicUsize,
    /// When set, every query waits for one permit before reading `recent`.
    pub gate: Mutex<Option<Arc<Semaphore>>>,
    pub pushes: Mutex<Option<mpsc::UnboundedReceiver<AppResult<CareEvent>>>>,
    pub released: Arc<AtomicBool>,
}

impl FakeEventSource {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedSender<AppResult<CareEvent>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Self {
            pushes: Mutex::new(Some(rx)),
            ..Self::default()
        };
        (Arc::new(source), tx)
    }

    pub fn set_recent(&self, events: Vec<CareEvent>) {
        *self.recent.lock().unwrap() = events;
    }

    /// Make queries block until [`Semaphore::add_permits`] is called.
    pub fn gate(&self) -> Arc<Semaphore> {
        let semaphore = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(semaphore.clone());
        semaphore
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSource for FakeEventSource {
    async fn query_recent(&self, since: DateTime<Utc>, limit: usize) -> AppResult<Vec<CareEvent>> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        if self.panic_queries.load(Ordering::SeqCst) {
            panic!("query worker crashed");
        }
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(AppError::database("connection reset by peer"));
        }

        let mut events: Vec<CareEvent> = self
            .recent
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.created_at >= since)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit);
        Ok(events)
    }

    async fn subscribe_inserts(&self) -> AppResult<EventSubscription> {
        if self.fail_subscribe.load(Ordering::SeqCst) {
            return Err(AppError::database("LISTEN refused"));
        }

        let rx = self
            .pushes
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| AppError::internal("already subscribed"))?;

        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        })
        .boxed();

        let released = self.released.clone();
        Ok(EventSubscription::new(stream)
            .with_release_hook(move || released.store(true, Ordering::SeqCst)))
    }
}

/// Directory over a fixed set of patients that counts its calls.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    pub patients: HashMap<PatientId, Patient>,
    pub many_calls: AtomicUsize,
    pub one_calls: AtomicUsize,
    pub fail_one: AtomicBool,
}

impl FakeDirectory {
    pub fn with(patients: &[Patient]) -> Arc<Self> {
        Arc::new(Self {
            patients: patients.iter().map(|p| (p.id, p.clone())).collect(),
            ..Self::default()
        })
    }
}

#[async_trait]
impl PatientDirectory for FakeDirectory {
    async fn lookup_many(&self, ids: &HashSet<PatientId>) -> AppResult<HashMap<PatientId, Patient>> {
        self.many_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ids
            .iter()
            .filter_map(|id| self.patients.get(id).map(|p| (*id, p.clone())))
            .collect())
    }

    async fn lookup_one(&self, id: PatientId) -> AppResult<Option<Patient>> {
        self.one_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_one.load(Ordering::SeqCst) {
            return Err(AppError::database("patients table locked"));
        }
        Ok(self.patients.get(&id).cloned())
    }
}

/// Alert sink remembering what it was told.
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    pub entries: Mutex<Vec<(AlertLevel, String)>>,
}

impl RecordingAlerts {
    pub fn errors(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == AlertLevel::Error)
            .count()
    }
}

#[async_trait]
impl AlertSink for RecordingAlerts {
    async fn alert(&self, level: AlertLevel, message: &str) {
        self.entries.lock().unwrap().push((level, message.to_string()));
    }
}

pub fn patient(name: &str) -> Patient {
    Patient {
        id: PatientId::new(),
        full_name: name.to_string(),
        created_at: Utc::now(),
    }
}

pub fn event(event_type: CareEventType, patient: &Patient, minutes_ago: i64) -> CareEvent {
    CareEvent::new(
        event_type,
        patient.id,
        Utc::now() - chrono::Duration::minutes(minutes_ago),
    )
}

pub async fn start(
    source: &Arc<FakeEventSource>,
    directory: &Arc<FakeDirectory>,
    alerts: &Arc<RecordingAlerts>,
) -> NotificationFeed {
    NotificationFeed::start(
        FeedConfig::default(),
        source.clone(),
        directory.clone(),
        alerts.clone(),
    )
    .await
    .expect("feed should start")
}

/// Wait until the published snapshot satisfies `pred`.
pub async fn wait_for(handle: &FeedHandle, pred: impl Fn(&FeedSnapshot) -> bool) -> FeedSnapshot {
    let mut rx = handle.watch();
    let snapshot = tokio::time::timeout(WAIT, rx.wait_for(|s| pred(s)))
        .await
        .expect("timed out waiting for feed")
        .expect("feed stopped")
        .clone();
    snapshot
}

/// Poll `cond` until it holds.
pub async fn eventually(cond: impl Fn() -> bool) {
    tokio::time::timeout(WAIT, async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("timed out waiting for condition");
}

/// Wait until `source` has received at least `count` queries.
pub async fn wait_for_queries(source: &FakeEventSource, count: usize) {
    eventually(|| source.query_count() >= count).await;
}
