//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Session registry
//!
//! Process-wide map from session id to session state. Each session sits
//! behind its own async mutex so that commands on one session are serialized
//! while different sessions proceed independently. A session whose handle is
//! held outside the registry, or whose mutex is locked, is in use and is never
//! evicted.

use crate::session::Session;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use metrics::counter;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use wayfarer_common::LocationId;

/// Shared handle to a single session
pub type SessionHandle = Arc<Mutex<Session>>;

/// Concurrent registry of live sessions
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<String, SessionHandle>,
    entry: LocationId,
    /// Soft cap on live sessions; 0 disables it
    max_sessions: usize,
}

impl SessionRegistry {
    /// Create a registry whose new sessions start at `entry`
    pub fn new(entry: LocationId, max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            entry,
            max_sessions,
        }
    }

    /// Get the session for `id`, creating it at the entry location if needed.
    ///
    /// Calling this twice with the same id always yields the same session.
    pub fn get_or_create(&self, id: &str) -> SessionHandle {
        if let Some(existing) = self.sessions.get(id) {
            return existing.value().clone();
        }

        if self.max_sessions > 0 && self.sessions.len() >= self.max_sessions {
            self.evict_least_recent();
        }

        match self.sessions.entry(id.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let session = Session::new(id, self.entry.clone());
                let handle = entry.insert(Arc::new(Mutex::new(session))).value().clone();
                counter!("wayfarer.sessions.created").increment(1);
                tracing::info!("Created session {}", id);
                handle
            }
        }
    }

    /// Get an existing session without creating one
    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Update the last-activity time of a session.
    ///
    /// Returns false when no such session exists.
    pub async fn touch(&self, id: &str) -> bool {
        // Clone the handle out so no shard lock is held across the await
        let Some(handle) = self.get(id) else {
            return false;
        };
        handle.lock().await.touch();
        true
    }

    /// Drop every idle session whose last activity is older than `ttl`.
    ///
    /// Returns the number of sessions evicted.
    pub fn evict_expired(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, handle| !(is_idle(handle) && expired(handle, now, ttl)));
        let evicted = before.saturating_sub(self.sessions.len());

        if evicted > 0 {
            counter!("wayfarer.sessions.evicted").increment(evicted as u64);
            tracing::info!("Evicted {} expired sessions", evicted);
        }
        evicted
    }

    /// Evict the idle session with the oldest activity to make room
    fn evict_least_recent(&self) {
        let oldest = self
            .sessions
            .iter()
            .filter(|entry| is_idle(entry.value()))
            .filter_map(|entry| {
                let last = entry.value().try_lock().ok()?.last_activity();
                Some((entry.key().clone(), last))
            })
            .min_by_key(|(_, last)| *last)
            .map(|(id, _)| id);

        let Some(id) = oldest else {
            tracing::warn!(
                "Session cap of {} reached with no idle session to evict",
                self.max_sessions
            );
            return;
        };

        if self
            .sessions
            .remove_if(&id, |_, handle| is_idle(handle))
            .is_some()
        {
            counter!("wayfarer.sessions.evicted").increment(1);
            tracing::info!("Evicted least recently active session {}", id);
        }
    }

    /// Periodically evict expired sessions
    pub fn start_eviction_task(
        self: Arc<Self>,
        ttl: Duration,
        interval: std::time::Duration,
    ) -> JoinHandle<()> {
        let handle = tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                let evicted = self.evict_expired(Utc::now(), ttl);
                tracing::debug!(
                    "Eviction sweep removed {} sessions, {} remain",
                    evicted,
                    self.len()
                );
            }
        });

        tracing::info!(
            "Session eviction task started (ttl: {}s, interval: {}s)",
            ttl.num_seconds(),
            interval.as_secs()
        );
        handle
    }

    /// Remove a session outright, regardless of activity
    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Location new sessions start in
    pub fn entry(&self) -> &LocationId {
        &self.entry
    }
}

/// No handle is held outside the registry
fn is_idle(handle: &SessionHandle) -> bool {
    Arc::strong_count(handle) == 1
}

fn expired(handle: &SessionHandle, now: DateTime<Utc>, ttl: Duration) -> bool {
    match handle.try_lock() {
        Ok(session) => session.is_expired(now, ttl),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(LocationId::from("square"), 0)
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let registry = registry();
        let first = registry.get_or_create("alpha");
        let second = registry.get_or_create("alpha");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert_eq!(first.lock().await.current_location().as_str(), "square");
    }

    #[tokio::test]
    async fn test_touch() {
        let registry = registry();
        assert!(!registry.touch("missing").await);
        drop(registry.get_or_create("alpha"));
        assert!(registry.touch("alpha").await);
    }

    #[tokio::test]
    async fn test_evict_expired() {
        let registry = registry();
        drop(registry.get_or_create("alpha"));
        drop(registry.get_or_create("beta"));

        let ttl = Duration::seconds(60);
        assert_eq!(registry.evict_expired(Utc::now(), ttl), 0);

        let later = Utc::now() + Duration::seconds(120);
        assert_eq!(registry.evict_expired(later, ttl), 2);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_in_use_sessions_are_not_evicted() {
        let registry = registry();
        let held = registry.get_or_create("held");
        drop(registry.get_or_create("idle"));

        let later = Utc::now() + Duration::seconds(120);
        assert_eq!(registry.evict_expired(later, Duration::seconds(60)), 1);
        assert!(registry.contains("held"));
        assert!(!registry.contains("idle"));
        drop(held);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recent() {
        let registry = SessionRegistry::new(LocationId::from("square"), 2);
        let start = Utc::now();

        drop(registry.get_or_create("old"));
        let recent = registry.get_or_create("recent");
        recent.lock().await.touch_at(start + Duration::seconds(300));
        drop(recent);

        drop(registry.get_or_create("new"));
        assert_eq!(registry.len(), 2);
        assert!(!registry.contains("old"));
        assert!(registry.contains("recent"));
        assert!(registry.contains("new"));
    }

    #[tokio::test]
    async fn test_remove() {
        let registry = registry();
        drop(registry.get_or_create("alpha"));
        assert!(registry.remove("alpha"));
        assert!(!registry.remove("alpha"));
        assert!(registry.get("alpha").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_eviction_task_sweeps() {
        let registry = Arc::new(registry());
        drop(registry.get_or_create("alpha"));

        // Negative ttl: everything idle counts as expired
        let task = registry
            .clone()
            .start_eviction_task(Duration::seconds(-1), std::time::Duration::from_secs(10));
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        tokio::time::advance(std::time::Duration::from_secs(11)).await;
        tokio::task::yield_now().await;

        assert!(registry.is_empty());
        task.abort();
    }
}
