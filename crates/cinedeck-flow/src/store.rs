// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent session map with per-user atomic transitions.
//!
//! Each user's read-modify-write runs while holding that user's map entry;
//! [`handle_event`] is synchronous, so the entry is never held across an
//! await point. Two events arriving concurrently for the same user are
//! serialized; different users never contend beyond the shard lock.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use cinedeck_core::UserId;

use crate::event::Event;
use crate::machine::{Effect, handle_event};
use crate::session::Session;

struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

/// Map of user id to in-flight conversation state.
#[derive(Default)]
pub struct SessionStore {
    inner: DashMap<UserId, SessionEntry>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically advance `user`'s session by one event, returning the
    /// effects to execute. Inserts, replaces, or deletes the session per
    /// the transition.
    pub fn apply(&self, user: &UserId, event: Event) -> Vec<Effect> {
        match self.inner.entry(user.clone()) {
            Entry::Occupied(mut occupied) => {
                let current = occupied.get().session.clone();
                let from_step = current.step();
                let transition = handle_event(Some(current), event);
                match transition.next {
                    Some(next) => {
                        debug!(%user, from = %from_step, to = %next.step(), "session advanced");
                        let entry = occupied.get_mut();
                        entry.session = next;
                        entry.last_activity = Instant::now();
                    }
                    None => {
                        debug!(%user, from = %from_step, "session ended");
                        occupied.remove();
                    }
                }
                transition.effects
            }
            Entry::Vacant(vacant) => {
                let transition = handle_event(None, event);
                if let Some(next) = transition.next {
                    debug!(%user, to = %next.step(), "session started");
                    vacant.insert(SessionEntry {
                        session: next,
                        last_activity: Instant::now(),
                    });
                }
                transition.effects
            }
        }
    }

    /// Snapshot of a user's current session, if any.
    pub fn get(&self, user: &UserId) -> Option<Session> {
        self.inner.get(user).map(|entry| entry.session.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drop sessions idle for longer than `max_idle`. Returns how many
    /// were removed. Single-session behavior is unchanged as long as the
    /// user keeps responding within the window.
    pub fn reap_idle(&self, max_idle: Duration) -> usize {
        let before = self.inner.len();
        self.inner
            .retain(|_, entry| entry.last_activity.elapsed() <= max_idle);
        let removed = before - self.inner.len();
        if removed > 0 {
            debug!(removed, "reaped idle sessions");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MenuChoice;
    use crate::session::Step;

    fn user(id: &str) -> UserId {
        UserId(id.to_string())
    }

    #[test]
    fn start_event_creates_session() {
        let store = SessionStore::new();
        let alice = user("alice");

        store.apply(&alice, Event::Menu(MenuChoice::AddMovie));
        assert_eq!(store.get(&alice).unwrap().step(), Step::Title);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn noop_event_creates_nothing() {
        let store = SessionStore::new();
        store.apply(&user("bob"), Event::Text("hi".to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn users_advance_independently() {
        let store = SessionStore::new();
        let alice = user("alice");
        let bob = user("bob");

        store.apply(&alice, Event::Menu(MenuChoice::AddMovie));
        store.apply(&bob, Event::Menu(MenuChoice::AddSeries));
        store.apply(&alice, Event::Text("Heat".to_string()));

        assert_eq!(store.get(&alice).unwrap().step(), Step::Thumbnail);
        assert_eq!(store.get(&bob).unwrap().step(), Step::Title);
    }

    #[test]
    fn completed_flow_removes_session() {
        let store = SessionStore::new();
        let alice = user("alice");

        store.apply(&alice, Event::Menu(MenuChoice::AddMovie));
        store.apply(&alice, Event::Text("Heat".to_string()));
        store.apply(
            &alice,
            Event::Image {
                thumbnail_ref: "/assets/t.jpg".to_string(),
            },
        );
        store.apply(&alice, Event::Text("http://a".to_string()));
        let effects = store.apply(&alice, Event::Text("/done".to_string()));

        assert!(store.get(&alice).is_none());
        assert!(effects.iter().any(|e| matches!(e, Effect::Persist(_))));
    }

    #[test]
    fn reap_idle_removes_only_stale_sessions() {
        let store = SessionStore::new();
        store.apply(&user("alice"), Event::Menu(MenuChoice::AddMovie));

        assert_eq!(store.reap_idle(Duration::from_secs(3600)), 0);
        assert_eq!(store.len(), 1);

        assert_eq!(store.reap_idle(Duration::ZERO), 1);
        assert!(store.is_empty());
    }
}
