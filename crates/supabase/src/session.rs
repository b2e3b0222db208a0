//! Session state with change notification.
//!
//! The store holds the current session for the lifetime of the client
//! application and notifies subscribers on every change, which is how the
//! navigation chrome learns about sign-in and sign-out without polling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::auth::Session;

type ChangeCallback = Box<dyn Fn(Option<&Session>) + Send + Sync>;

/// Handle returned by [`SessionStore::subscribe`]; pass it to
/// [`SessionStore::unsubscribe`] to stop receiving notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Process-wide session state.
///
/// Cheaply cloneable; all clones share the same state and subscriber
/// list.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Default)]
struct SessionStoreInner {
    current: RwLock<Option<Session>>,
    subscribers: Mutex<Vec<(SubscriptionId, ChangeCallback)>>,
    next_id: AtomicU64,
}

impl SessionStore {
    /// Create an empty store (signed out).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current session, if signed in.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.inner
            .current
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// The current access token, if signed in.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.current().map(|session| session.access_token)
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.inner
            .current
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Replace the session and notify subscribers.
    pub fn set(&self, session: Option<Session>) {
        if let Ok(mut guard) = self.inner.current.write() {
            *guard = session.clone();
        }
        self.notify(session.as_ref());
    }

    /// Clear the session (sign-out) and notify subscribers.
    pub fn clear(&self) {
        self.set(None);
    }

    /// Register a callback fired on every session change.
    ///
    /// The callback receives the new session (`None` on sign-out). It is
    /// invoked synchronously from the mutating call.
    pub fn subscribe(
        &self,
        callback: impl Fn(Option<&Session>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut subscribers) = self.inner.subscribers.lock() {
            subscribers.push((id, Box::new(callback)));
        }
        id
    }

    /// Remove a subscription. Returns `false` when the id was already
    /// removed or never existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.lock().is_ok_and(|mut subscribers| {
            let before = subscribers.len();
            subscribers.retain(|(existing, _)| *existing != id);
            subscribers.len() < before
        })
    }

    fn notify(&self, session: Option<&Session>) {
        if let Ok(subscribers) = self.inner.subscribers.lock() {
            for (_, callback) in subscribers.iter() {
                callback(session);
            }
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("signed_in", &self.is_signed_in())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::auth::AuthUser;

    fn session(token: &str) -> Session {
        Session {
            access_token: token.to_owned(),
            refresh_token: "refresh".to_owned(),
            expires_in: 3600,
            user: AuthUser {
                id: uuid::Uuid::nil(),
                email: Some("cliente@exemplo.com".to_owned()),
                user_metadata: serde_json::Value::Null,
            },
        }
    }

    #[test]
    fn test_starts_signed_out() {
        let store = SessionStore::new();
        assert!(!store.is_signed_in());
        assert!(store.current().is_none());
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_set_and_clear() {
        let store = SessionStore::new();
        store.set(Some(session("token-1")));
        assert!(store.is_signed_in());
        assert_eq!(store.access_token().as_deref(), Some("token-1"));

        store.clear();
        assert!(!store.is_signed_in());
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let store = SessionStore::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&calls);
        store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.set(Some(session("a")));
        store.set(Some(session("b")));
        store.clear();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_subscriber_receives_new_session() {
        let store = SessionStore::new();
        let latest = Arc::new(Mutex::new(None::<String>));

        let sink = Arc::clone(&latest);
        store.subscribe(move |new_session| {
            *sink.lock().unwrap() = new_session.map(|s| s.access_token.clone());
        });

        store.set(Some(session("fresh")));
        assert_eq!(latest.lock().unwrap().as_deref(), Some("fresh"));

        store.clear();
        assert!(latest.lock().unwrap().is_none());
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = SessionStore::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&calls);
        let id = store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.set(Some(session("a")));
        assert!(store.unsubscribe(id));
        store.clear();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // A second unsubscribe is a no-op.
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let clone = store.clone();

        store.set(Some(session("shared")));
        assert_eq!(clone.access_token().as_deref(), Some("shared"));
    }
}
