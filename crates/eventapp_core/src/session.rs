//! Session value and the provider that tracks it.
//!
//! Repositories never read an ambient current user: callers pass the `Session` they hold, which
//! makes every ownership check a pure function of its arguments.

use crate::error::AppError;
use crate::feed::Feed;
use crate::identity::{Credentials, IdentityService};
use crate::models::{Event, SessionUser};
use crate::profiles::ProfileRepository;
use crate::subscription::{lock, Listeners, Subscription};
use std::sync::{Arc, Mutex};

/// The authenticated identity, or its absence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    pub fn signed_out() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Result<&SessionUser, AppError> {
        self.user.as_ref().ok_or_else(AppError::not_signed_in)
    }

    pub fn as_option(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Display-side check: whether owner actions should be offered for `event`.
    pub fn is_owner(&self, event: &Event) -> bool {
        self.user.as_ref().is_some_and(|u| u.uid == event.creator_id)
    }

    /// `Auth` without a session, `Permission` if someone else created the event.
    pub fn authorize_owner(&self, event: &Event, action: &str) -> Result<&SessionUser, AppError> {
        let user = self.user()?;
        if user.uid != event.creator_id {
            log::warn!(
                "session: {} refused to {} event {} owned by {}",
                user.uid,
                action,
                event.id,
                event.creator_id
            );
            return Err(AppError::not_owner(action));
        }
        Ok(user)
    }
}

impl From<Option<SessionUser>> for Session {
    fn from(user: Option<SessionUser>) -> Self {
        Self { user }
    }
}

pub struct SessionProvider {
    identity: Arc<dyn IdentityService>,
    profiles: ProfileRepository,
    current: Arc<Mutex<Session>>,
    listeners: Listeners<Session>,
    _identity_sub: Mutex<Subscription>,
}

impl SessionProvider {
    pub fn new(identity: Arc<dyn IdentityService>, profiles: ProfileRepository) -> Self {
        let current = Arc::new(Mutex::new(Session::from(identity.current_user())));
        let listeners: Listeners<Session> = Listeners::new();
        let (c, l) = (current.clone(), listeners.clone());
        let identity_sub = identity.on_auth_state_changed(Box::new(move |user| {
            let session = Session::from(user);
            {
                let mut cur = lock(&c);
                if *cur == session {
                    return;
                }
                *cur = session.clone();
            }
            log::info!(
                "session: {}",
                session
                    .as_option()
                    .map(|u| u.uid.to_string())
                    .unwrap_or_else(|| "signed out".into())
            );
            l.emit(&session);
        }));
        Self {
            identity,
            profiles,
            current,
            listeners,
            _identity_sub: Mutex::new(identity_sub),
        }
    }

    pub fn current(&self) -> Session {
        lock(&self.current).clone()
    }

    /// Fires once right away with the current session, then on every transition.
    pub fn subscribe(&self, on_change: impl Fn(Session) + Send + Sync + 'static) -> Subscription {
        let on_change = Arc::new(on_change);
        let cb = on_change.clone();
        let sub = self.listeners.register(move |s: &Session| cb(s.clone()));
        on_change(self.current());
        sub
    }

    pub fn watch(&self) -> Feed<Session> {
        Feed::attach(|tx| {
            self.subscribe(move |s| {
                tx.send(s);
            })
        })
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SessionUser, AppError> {
        Ok(self.identity.sign_in(credentials).await?)
    }

    /// Registers the account, then writes its `users/{uid}` profile. The account is already
    /// signed in at that point, so a failed profile write is logged and not returned.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<SessionUser, AppError> {
        let user = self.identity.sign_up(credentials).await?;
        if let Err(e) = self.profiles.ensure_profile(&user).await {
            log::warn!("session: profile write for {} failed: {}", user.uid, e);
        }
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<(), AppError> {
        Ok(self.identity.sign_out().await?)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{EventId, UserId};
    use crate::identity::InMemoryIdentity;
    use crate::store::InMemoryStore;

    fn provider() -> SessionProvider {
        let identity =
            InMemoryIdentity::new().with_account("alice", "alice@example.com", "secret1");
        let store = Arc::new(InMemoryStore::new());
        SessionProvider::new(Arc::new(identity), ProfileRepository::new(store))
    }

    fn event_by(owner: &str) -> Event {
        Event {
            id: EventId::parse("ev1").unwrap(),
            name: "Meetup".into(),
            description: "d".into(),
            location: "Park".into(),
            date: None,
            creator_id: UserId::parse(owner).unwrap(),
            creator_email: None,
        }
    }

    #[test]
    fn ownership_checks() {
        let alice = Session::signed_in(SessionUser {
            uid: UserId::parse("alice").unwrap(),
            email: None,
        });
        assert!(alice.is_owner(&event_by("alice")));
        assert!(!alice.is_owner(&event_by("bob")));
        assert!(alice.authorize_owner(&event_by("alice"), "edit").is_ok());
        assert!(matches!(
            alice.authorize_owner(&event_by("bob"), "delete"),
            Err(AppError::Permission(_))
        ));
        assert!(matches!(
            Session::signed_out().authorize_owner(&event_by("alice"), "edit"),
            Err(AppError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn subscribe_fires_immediately_then_on_transitions() {
        let provider = provider();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let sub = provider.subscribe(move |session| s.lock().unwrap().push(session.is_signed_in()));
        provider.sign_in(&Credentials::new("alice@example.com", "secret1")).await.unwrap();
        provider.sign_out().await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![false, true, false]);
        sub.unsubscribe();
        provider.sign_in(&Credentials::new("alice@example.com", "secret1")).await.unwrap();
        assert_eq!(seen.lock().unwrap().len(), 3);
        assert_eq!(provider.listener_count(), 0);
        assert!(provider.current().is_signed_in());
    }

    #[tokio::test]
    async fn watch_streams_sessions() {
        let provider = provider();
        let mut feed = provider.watch();
        assert_eq!(feed.next().await, Some(Session::signed_out()));
        provider.sign_in(&Credentials::new("alice@example.com", "secret1")).await.unwrap();
        let session = feed.next().await.unwrap();
        assert_eq!(session.user().unwrap().uid.as_str(), "alice");
    }
}
