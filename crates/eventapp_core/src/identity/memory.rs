//! In-process identity service: accounts live in a map, UIDs are random.

use super::{looks_like_email, AuthStateListener, Credentials, IdentityService, MIN_PASSWORD_LEN};
use crate::error::IdentityError;
use crate::ids::UserId;
use crate::models::SessionUser;
use crate::subscription::{lock, Listeners, Subscription};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

struct Account {
    uid: UserId,
    password: String,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    current: Option<SessionUser>,
}

#[derive(Clone)]
pub struct InMemoryIdentity {
    state: Arc<Mutex<State>>,
    listeners: Listeners<Option<SessionUser>>,
}

impl Default for InMemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            listeners: Listeners::new(),
        }
    }

    /// Register an account with a fixed UID without signing in. For seeding and tests.
    pub fn with_account(self, uid: &str, email: &str, password: &str) -> Self {
        if let Ok(uid) = UserId::parse(uid) {
            lock(&self.state).accounts.insert(
                normalize(email),
                Account {
                    uid,
                    password: password.to_string(),
                },
            );
        }
        self
    }

    fn set_current(&self, user: Option<SessionUser>) {
        lock(&self.state).current = user.clone();
        self.listeners.emit(&user);
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl IdentityService for InMemoryIdentity {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SessionUser, IdentityError> {
        let email = normalize(&credentials.email);
        let user = {
            let state = lock(&self.state);
            let account = state.accounts.get(&email).ok_or(IdentityError::InvalidCredential)?;
            if account.password != credentials.password {
                return Err(IdentityError::InvalidCredential);
            }
            SessionUser {
                uid: account.uid.clone(),
                email: Some(email),
            }
        };
        log::info!("identity: signed in {}", user.uid);
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SessionUser, IdentityError> {
        let email = normalize(&credentials.email);
        if !looks_like_email(&email) {
            return Err(IdentityError::InvalidEmail);
        }
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::WeakPassword);
        }
        let user = {
            let mut state = lock(&self.state);
            if state.accounts.contains_key(&email) {
                return Err(IdentityError::EmailInUse);
            }
            let uid = UserId::parse(Uuid::new_v4().simple().to_string())
                .map_err(IdentityError::Remote)?;
            state.accounts.insert(
                email.clone(),
                Account {
                    uid: uid.clone(),
                    password: credentials.password.clone(),
                },
            );
            SessionUser { uid, email: Some(email) }
        };
        log::info!("identity: registered {}", user.uid);
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        log::info!("identity: signed out");
        self.set_current(None);
        Ok(())
    }

    fn current_user(&self) -> Option<SessionUser> {
        lock(&self.state).current.clone()
    }

    fn on_auth_state_changed(&self, listener: AuthStateListener) -> Subscription {
        self.listeners.register(move |user| listener(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let identity = InMemoryIdentity::new();
        let created = identity
            .sign_up(&Credentials::new("Alice@Example.com", "secret1"))
            .await
            .unwrap();
        identity.sign_out().await.unwrap();
        assert!(identity.current_user().is_none());
        let signed = identity
            .sign_in(&Credentials::new("alice@example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(signed.uid, created.uid);
        assert_eq!(identity.current_user(), Some(signed));
    }

    #[tokio::test]
    async fn error_kinds() {
        let identity =
            InMemoryIdentity::new().with_account("alice", "alice@example.com", "secret1");
        assert_eq!(
            identity.sign_in(&Credentials::new("alice@example.com", "wrong")).await.unwrap_err(),
            IdentityError::InvalidCredential
        );
        assert_eq!(
            identity.sign_in(&Credentials::new("nobody@example.com", "secret1")).await.unwrap_err(),
            IdentityError::InvalidCredential
        );
        assert_eq!(
            identity.sign_up(&Credentials::new("alice@example.com", "secret1")).await.unwrap_err(),
            IdentityError::EmailInUse
        );
        assert_eq!(
            identity.sign_up(&Credentials::new("bob@example.com", "123")).await.unwrap_err(),
            IdentityError::WeakPassword
        );
        assert_eq!(
            identity.sign_up(&Credentials::new("bob", "secret1")).await.unwrap_err(),
            IdentityError::InvalidEmail
        );
    }

    #[tokio::test]
    async fn listeners_see_transitions() {
        let identity =
            InMemoryIdentity::new().with_account("alice", "alice@example.com", "secret1");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let _sub = identity.on_auth_state_changed(Box::new(move |u: Option<SessionUser>| {
            s.lock().unwrap().push(u.map(|u| u.uid.to_string()))
        }));
        identity.sign_in(&Credentials::new("alice@example.com", "secret1")).await.unwrap();
        identity.sign_out().await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![Some("alice".to_string()), None]);
    }
}
