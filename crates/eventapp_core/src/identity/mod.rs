//! Identity collaborator: email/password accounts and auth-state notifications.

mod firebase;
mod memory;

pub use firebase::FirebaseAuth;
pub use memory::InMemoryIdentity;

use crate::error::IdentityError;
use crate::models::SessionUser;
use crate::subscription::Subscription;
use async_trait::async_trait;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

pub type AuthStateListener = Box<dyn Fn(Option<SessionUser>) + Send + Sync>;

/// Firebase-compatible minimum password length.
pub const MIN_PASSWORD_LEN: usize = 6;

#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SessionUser, IdentityError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<SessionUser, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;

    fn current_user(&self) -> Option<SessionUser>;

    /// Called on every sign-in, sign-up and sign-out.
    fn on_auth_state_changed(&self, listener: AuthStateListener) -> Subscription;
}

pub(crate) fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
