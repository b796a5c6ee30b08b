//! `users/{uid}` profile documents.

use crate::error::AppError;
use crate::models::SessionUser;
use crate::schema;
use crate::store::{DocumentStore, USERS};
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProfileRepository {
    store: Arc<dyn DocumentStore>,
}

impl ProfileRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create or replace the profile for `user`.
    pub async fn ensure_profile(&self, user: &SessionUser) -> Result<(), AppError> {
        let fields = schema::profile_fields(user, Utc::now());
        self.store.set(USERS, user.uid.as_str(), fields).await?;
        log::debug!("profiles: wrote users/{}", user.uid);
        Ok(())
    }
}
