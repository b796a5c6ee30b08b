//! App instance: one simulated client with its own identity session, sharing a store with the
//! other instances the way several devices share one Firestore project.

use eventapp_core::identity::{Credentials, InMemoryIdentity};
use eventapp_core::store::InMemoryStore;
use eventapp_core::{Services, Session};
use std::sync::Arc;

pub const PASSWORD: &str = "secret1";

pub struct AppInstance {
    pub services: Services,
    pub store: InMemoryStore,
}

impl AppInstance {
    /// New client on `store` knowing the `alice` and `bob` accounts. Starts signed out.
    pub fn new(store: &InMemoryStore) -> Self {
        let identity = InMemoryIdentity::new()
            .with_account("alice", "alice@example.com", PASSWORD)
            .with_account("bob", "bob@example.com", PASSWORD);
        Self {
            services: Services::new(Arc::new(identity), Arc::new(store.clone())),
            store: store.clone(),
        }
    }

    /// Sign in as `alice` or `bob` and return the resulting session.
    pub async fn sign_in(&self, who: &str) -> Session {
        self.services
            .session
            .sign_in(&Credentials::new(format!("{}@example.com", who), PASSWORD))
            .await
            .expect("sign in");
        self.services.session.current()
    }
}

/// Two clients on one store, signed in as alice and bob.
pub async fn alice_and_bob() -> (AppInstance, Session, AppInstance, Session) {
    let store = InMemoryStore::new();
    let app1 = AppInstance::new(&store);
    let app2 = AppInstance::new(&store);
    let alice = app1.sign_in("alice").await;
    let bob = app2.sign_in("bob").await;
    (app1, alice, app2, bob)
}
