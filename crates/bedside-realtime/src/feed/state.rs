//! Notification list, unread counter, and load bookkeeping.
//!
//! Every mutation here keeps three invariants: the list holds at most
//! `capacity` entries, no two entries share an id, and `unread_count`
//! equals the number of unread entries.

use std::collections::HashSet;

use bedside_core::types::id::NotificationId;
use bedside_entity::notification::{FeedSnapshot, Notification};

/// Result of applying a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The load replaced the list.
    Applied,
    /// The load failed; the list is unchanged.
    Failed,
    /// A newer load was started since; the result was dropped.
    Stale,
}

/// Owned by the feed actor; never shared.
#[derive(Debug)]
pub struct FeedState {
    notifications: Vec<Notification>,
    unread_count: usize,
    capacity: usize,
    /// Generation of the most recently started load.
    latest_load: u64,
    loading: bool,
    /// Ids pushed while the latest load was in flight.
    pushed_during_load: HashSet<NotificationId>,
}

impl FeedState {
    /// Empty feed retaining at most `capacity` notifications.
    pub fn new(capacity: usize) -> Self {
        Self {
            notifications: Vec::with_capacity(capacity),
            unread_count: 0,
            capacity: capacity.max(1),
            latest_load: 0,
            loading: false,
            pushed_during_load: HashSet::new(),
        }
    }

    /// Mark a new load as in flight and return its generation.
    ///
    /// Any older load still in flight becomes stale.
    pub fn begin_load(&mut self) -> u64 {
        self.latest_load += 1;
        self.loading = true;
        self.pushed_during_load.clear();
        self.latest_load
    }

    /// Apply the result of load `generation`.
    ///
    /// `loaded` must already be sorted newest first. Notifications pushed
    /// while this load was in flight stay on top of the loaded ones.
    pub fn finish_load<E>(&mut self, generation: u64, loaded: Result<Vec<Notification>, E>) -> LoadOutcome {
        if generation != self.latest_load {
            return LoadOutcome::Stale;
        }
        self.loading = false;
        let pushed = std::mem::take(&mut self.pushed_during_load);

        let loaded = match loaded {
            Ok(loaded) => loaded,
            Err(_) => return LoadOutcome::Failed,
        };

        let mut seen: HashSet<NotificationId> = HashSet::new();
        let mut merged: Vec<Notification> = Vec::with_capacity(self.capacity);

        let retained = self
            .notifications
            .drain(..)
            .filter(|n| pushed.contains(&n.id));
        for notification in retained.chain(loaded) {
            if merged.len() == self.capacity {
                break;
            }
            if seen.insert(notification.id.clone()) {
                merged.push(notification);
            }
        }

        self.unread_count = merged.iter().filter(|n| n.is_unread()).count();
        self.notifications = merged;
        LoadOutcome::Applied
    }

    /// Put a freshly pushed notification at the head of the list.
    ///
    /// Returns `false` (and changes nothing) if a notification with the
    /// same id is already present. Pushes are not re-sorted.
    pub fn push(&mut self, notification: Notification) -> bool {
        if self.notifications.iter().any(|n| n.id == notification.id) {
            return false;
        }

        if notification.is_unread() {
            self.unread_count += 1;
        }
        if self.loading {
            self.pushed_during_load.insert(notification.id.clone());
        }
        self.notifications.insert(0, notification);

        for evicted in self.notifications.drain(self.capacity.min(self.notifications.len())..) {
            if evicted.is_unread() {
                self.unread_count = self.unread_count.saturating_sub(1);
            }
        }
        true
    }

    /// Mark one notification read. Returns `true` if it was unread.
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        match self.notifications.iter_mut().find(|n| &n.id == id) {
            Some(notification) if notification.is_unread() => {
                notification.read = true;
                self.unread_count = self.unread_count.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    /// Mark every notification read. Returns how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in self.notifications.iter_mut().filter(|n| n.is_unread()) {
            notification.read = true;
            changed += 1;
        }
        self.unread_count = 0;
        changed
    }

    /// Current unread count.
    pub fn unread_count(&self) -> usize {
        self.unread_count
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Copy of the current state for readers.
    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            notifications: self.notifications.clone(),
            unread_count: self.unread_count,
            loading: self.loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use bedside_core::types::id::{CareEventId, PatientId};
    use bedside_entity::notification::NotificationType;

    fn notification(minutes_ago: i64) -> Notification {
        Notification {
            id: NotificationId::for_care_event(CareEventId::new()),
            notification_type: NotificationType::CareRecord,
            title: "Registro de Líquidos".to_string(),
            message: "100ml de líquido administrado".to_string(),
            patient_name: "Ana".to_string(),
            patient_id: PatientId::new(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            read: false,
        }
    }

    fn consistent(state: &FeedState) -> bool {
        let snap = state.snapshot();
        snap.unread_count == snap.notifications.iter().filter(|n| !n.read).count()
    }

    fn loaded_state(count: usize) -> FeedState {
        let mut state = FeedState::new(15);
        let generation = state.begin_load();
        let loaded: Vec<_> = (0..count as i64).map(notification).collect();
        assert_eq!(
            state.finish_load::<()>(generation, Ok(loaded)),
            LoadOutcome::Applied
        );
        state
    }

    #[test]
    fn test_load_sets_unread_to_length() {
        let state = loaded_state(4);
        let snap = state.snapshot();
        assert_eq!(snap.notifications.len(), 4);
        assert_eq!(snap.unread_count, 4);
        assert!(!snap.loading);
    }

    #[test]
    fn test_failed_load_keeps_previous_list() {
        let mut state = loaded_state(3);
        state.mark_read(&state.snapshot().notifications[0].id.clone());

        let generation = state.begin_load();
        assert!(state.is_loading());
        assert_eq!(
            state.finish_load(generation, Err("offline")),
            LoadOutcome::Failed
        );

        let snap = state.snapshot();
        assert_eq!(snap.notifications.len(), 3);
        assert_eq!(snap.unread_count, 2);
        assert!(!snap.loading);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut state = FeedState::new(15);
        let first = state.begin_load();
        let second = state.begin_load();

        assert_eq!(
            state.finish_load::<()>(first, Ok(vec![notification(1)])),
            LoadOutcome::Stale
        );
        assert!(state.is_loading());
        assert!(state.snapshot().is_empty());

        assert_eq!(
            state.finish_load::<()>(second, Ok(vec![notification(2), notification(3)])),
            LoadOutcome::Applied
        );
        assert_eq!(state.snapshot().notifications.len(), 2);
    }

    #[test]
    fn test_push_prepends_and_counts() {
        let mut state = loaded_state(2);
        let pushed = notification(90);
        assert!(state.push(pushed.clone()));

        let snap = state.snapshot();
        assert_eq!(snap.notifications[0].id, pushed.id);
        assert_eq!(snap.unread_count, 3);
    }

    #[test]
    fn test_push_trims_to_capacity() {
        let mut state = loaded_state(15);
        for n in state.snapshot().notifications.iter().skip(10) {
            state.mark_read(&n.id);
        }
        assert_eq!(state.unread_count(), 10);

        let pushed = notification(0);
        state.push(pushed.clone());

        let snap = state.snapshot();
        assert_eq!(snap.notifications.len(), 15);
        assert_eq!(snap.notifications[0].id, pushed.id);
        // the evicted tail entry was already read
        assert_eq!(snap.unread_count, 11);
        assert!(consistent(&state));
    }

    #[test]
    fn test_evicting_unread_entry_keeps_count_consistent() {
        let mut state = loaded_state(15);
        state.push(notification(0));
        assert_eq!(state.snapshot().notifications.len(), 15);
        assert_eq!(state.unread_count(), 15);
        assert!(consistent(&state));
    }

    #[test]
    fn test_duplicate_push_is_ignored() {
        let mut state = loaded_state(1);
        let pushed = notification(0);
        assert!(state.push(pushed.clone()));
        assert!(!state.push(pushed));
        assert_eq!(state.unread_count(), 2);
        assert_eq!(state.snapshot().notifications.len(), 2);
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut state = loaded_state(3);
        let id = state.snapshot().notifications[1].id.clone();

        assert!(state.mark_read(&id));
        assert!(!state.mark_read(&id));
        assert_eq!(state.unread_count(), 2);
        assert!(!state.mark_read(&NotificationId::from("care-missing")));
        assert_eq!(state.unread_count(), 2);
    }

    #[test]
    fn test_mark_all_read() {
        let mut state = loaded_state(5);
        state.mark_read(&state.snapshot().notifications[0].id.clone());

        assert_eq!(state.mark_all_read(), 4);
        assert_eq!(state.mark_all_read(), 0);
        let snap = state.snapshot();
        assert_eq!(snap.unread_count, 0);
        assert!(snap.notifications.iter().all(|n| n.read));
    }

    #[test]
    fn test_pushes_during_load_survive_completion() {
        let mut state = loaded_state(2);
        let generation = state.begin_load();

        let early = notification(0);
        state.push(early.clone());
        let duplicate = notification(0);
        state.push(duplicate.clone());
        state.mark_read(&duplicate.id);

        let mut loaded: Vec<_> = (1..=14).map(notification).collect();
        loaded.insert(0, duplicate.clone());
        assert_eq!(
            state.finish_load::<()>(generation, Ok(loaded)),
            LoadOutcome::Applied
        );

        let snap = state.snapshot();
        assert_eq!(snap.notifications.len(), 15);
        assert_eq!(snap.notifications[0].id, duplicate.id);
        assert_eq!(snap.notifications[1].id, early.id);
        let ids: HashSet<_> = snap.notifications.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids.len(), 15);
        // the pushed copy was read; the loaded copy collapsed into it
        assert!(snap.notifications[0].read);
        assert_eq!(snap.unread_count, 14);
        assert!(consistent(&state));
    }
}
