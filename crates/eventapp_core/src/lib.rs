//! Client core for the community events app: session, event and favorite repositories over a
//! live document store, the screen navigator and the view-models the UI renders.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod events;
pub mod favorites;
pub mod feed;
pub mod identity;
pub mod ids;
pub mod log_bridge;
pub mod models;
pub mod navigator;
pub mod profiles;
pub mod schema;
pub mod session;
pub mod storage;
pub mod store;
pub mod subscription;
pub mod views;

pub use config::{AppConfig, Backend};
pub use error::{AppError, IdentityError, StoreError};
pub use events::{EventRepository, PendingDelete};
pub use favorites::FavoriteRepository;
pub use feed::Feed;
pub use ids::{EventId, FavoriteId, UserId};
pub use models::{Event, EventDraft, EventPatch, Favorite, SessionUser};
pub use navigator::{NavCommand, NavError, Navigator, Screen};
pub use session::{Session, SessionProvider};
pub use subscription::Subscription;

use identity::{FirebaseAuth, IdentityService, InMemoryIdentity};
use profiles::ProfileRepository;
use storage::Storage;
use store::{DocumentStore, FirestoreStore, InMemoryStore};

/// The collaborator set one app instance runs on.
#[derive(Clone)]
pub struct Services {
    pub session: Arc<SessionProvider>,
    pub events: EventRepository,
    pub favorites: FavoriteRepository,
}

impl Services {
    pub fn new(identity: Arc<dyn IdentityService>, store: Arc<dyn DocumentStore>) -> Self {
        let session = SessionProvider::new(identity, ProfileRepository::new(store.clone()));
        Self {
            session: Arc::new(session),
            events: EventRepository::new(store.clone()),
            favorites: FavoriteRepository::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryIdentity::new()), Arc::new(InMemoryStore::new()))
    }

    /// With the Firebase backend, each watch spawns a polling task on the tokio runtime it is
    /// opened from.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        match &config.backend {
            Backend::Memory => {
                log::info!("services: in-memory backend");
                Ok(Self::in_memory())
            }
            Backend::Firebase { api_key, project_id } => {
                log::info!("services: firebase backend (project {})", project_id);
                let storage = Storage::open(&config.storage_path)
                    .map_err(|e| {
                        anyhow::anyhow!("open storage at {:?}: {}", config.storage_path, e)
                    })?;
                let auth = Arc::new(FirebaseAuth::new(api_key.clone(), Some(Arc::new(storage)))?);
                let store = FirestoreStore::new(project_id, auth.clone(), config.poll_interval)?;
                Ok(Self::new(auth, Arc::new(store)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_config_builds_signed_out_services() {
        let services = Services::from_config(&AppConfig::default()).unwrap();
        assert!(!services.session.current().is_signed_in());
    }
}
