//! Firebase Authentication over the Identity Toolkit REST API.
//! Sessions are persisted in local storage so a restart resumes the signed-in user.

use super::{AuthStateListener, Credentials, IdentityService};
use crate::error::{IdentityError, StoreError};
use crate::ids::UserId;
use crate::models::SessionUser;
use crate::storage::{PersistedSession, Storage};
use crate::store::TokenSource;
use crate::subscription::{lock, Listeners, Subscription};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const TOKEN_URL: &str = "https://securetoken.googleapis.com/v1/token";
/// Refresh this long before the server-stated expiry.
const EXPIRY_SKEW_SECS: i64 = 60;

#[derive(Clone)]
pub struct FirebaseAuth {
    client: reqwest::Client,
    api_key: String,
    storage: Option<Arc<Storage>>,
    session: Arc<Mutex<Option<PersistedSession>>>,
    listeners: Listeners<Option<SessionUser>>,
}

impl FirebaseAuth {
    pub fn new(
        api_key: impl Into<String>,
        storage: Option<Arc<Storage>>,
    ) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| IdentityError::Remote(e.to_string()))?;
        let restored = match &storage {
            Some(s) => s.session_load().map_err(IdentityError::Remote)?,
            None => None,
        };
        if let Some(s) = &restored {
            log::info!("firebase auth: restored session for {}", s.uid);
        }
        Ok(Self {
            client,
            api_key: api_key.into(),
            storage,
            session: Arc::new(Mutex::new(restored)),
            listeners: Listeners::new(),
        })
    }

    async fn post(
        &self,
        url: String,
        req: reqwest::RequestBuilder,
    ) -> Result<Value, IdentityError> {
        let resp = req.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() || e.is_request() {
                IdentityError::Network(e.to_string())
            } else {
                IdentityError::Remote(e.to_string())
            }
        })?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| IdentityError::Network(e.to_string()))?;
        let json: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        if !status.is_success() {
            let code = json
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .unwrap_or(text.as_str());
            log::warn!("firebase auth: {} failed: {} {}", url, status, code);
            return Err(map_error_code(code));
        }
        Ok(json)
    }

    async fn password_call(
        &self,
        endpoint: &str,
        credentials: &Credentials,
    ) -> Result<SessionUser, IdentityError> {
        let url = format!("{}/accounts:{}", IDENTITY_URL, endpoint);
        let body = serde_json::json!({
            "email": credentials.email.trim(),
            "password": credentials.password,
            "returnSecureToken": true,
        });
        let req = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body);
        let json = self.post(url.clone(), req).await?;
        let session = PersistedSession {
            uid: str_field(&json, "localId")?,
            email: json.get("email").and_then(Value::as_str).map(String::from),
            id_token: str_field(&json, "idToken")?,
            refresh_token: str_field(&json, "refreshToken")?,
            expires_at: expiry_from(json.get("expiresIn")),
        };
        let user = to_user(&session)?;
        self.store_session(Some(session))?;
        self.listeners.emit(&Some(user.clone()));
        Ok(user)
    }

    fn store_session(&self, session: Option<PersistedSession>) -> Result<(), IdentityError> {
        if let Some(storage) = &self.storage {
            match &session {
                Some(s) => storage.session_save(s).map_err(IdentityError::Remote)?,
                None => storage.session_clear().map_err(IdentityError::Remote)?,
            }
        }
        *lock(&self.session) = session;
        Ok(())
    }

    /// Current ID token, refreshed through the secure-token endpoint when it is about to expire.
    pub async fn fresh_id_token(&self) -> Result<Option<String>, IdentityError> {
        let current = lock(&self.session).clone();
        let Some(session) = current else {
            return Ok(None);
        };
        let expired = DateTime::parse_from_rfc3339(&session.expires_at)
            .map(|t| t.with_timezone(&Utc) <= Utc::now())
            .unwrap_or(true);
        if !expired {
            return Ok(Some(session.id_token));
        }
        log::debug!("firebase auth: refreshing id token for {}", session.uid);
        let req = self
            .client
            .post(TOKEN_URL)
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", session.refresh_token.as_str()),
            ]);
        let json = self.post(TOKEN_URL.to_string(), req).await?;
        self.commit_refresh(&session, &json)
    }

    /// Stores a refresh response only if the session it was started from is still current.
    /// A sign-out or a new sign-in while the request was in flight wins.
    fn commit_refresh(
        &self,
        started: &PersistedSession,
        json: &Value,
    ) -> Result<Option<String>, IdentityError> {
        let refreshed = PersistedSession {
            id_token: str_field(json, "id_token")?,
            refresh_token: str_field(json, "refresh_token")?,
            expires_at: expiry_from(json.get("expires_in")),
            ..started.clone()
        };
        let mut current = lock(&self.session);
        let still_current = current
            .as_ref()
            .is_some_and(|s| s.uid == started.uid && s.refresh_token == started.refresh_token);
        if !still_current {
            log::debug!("firebase auth: dropping token refresh for {}", started.uid);
            return Ok(None);
        }
        if let Some(storage) = &self.storage {
            storage.session_save(&refreshed).map_err(IdentityError::Remote)?;
        }
        let token = refreshed.id_token.clone();
        *current = Some(refreshed);
        Ok(Some(token))
    }
}

fn str_field(json: &Value, key: &str) -> Result<String, IdentityError> {
    json.get(key)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| IdentityError::Remote(format!("missing {} in auth response", key)))
}

/// `expiresIn` arrives as a string of seconds.
fn expiry_from(v: Option<&Value>) -> String {
    let secs = match v {
        Some(Value::String(s)) => s.parse::<i64>().unwrap_or(3600),
        Some(other) => other.as_i64().unwrap_or(3600),
        None => 3600,
    };
    (Utc::now() + chrono::Duration::seconds(secs - EXPIRY_SKEW_SECS)).to_rfc3339()
}

fn to_user(session: &PersistedSession) -> Result<SessionUser, IdentityError> {
    Ok(SessionUser {
        uid: UserId::parse(&session.uid).map_err(IdentityError::Remote)?,
        email: session.email.clone(),
    })
}

pub(crate) fn map_error_code(code: &str) -> IdentityError {
    let head = code.split([' ', ':']).next().unwrap_or(code);
    match head {
        "EMAIL_EXISTS" => IdentityError::EmailInUse,
        "WEAK_PASSWORD" => IdentityError::WeakPassword,
        "INVALID_EMAIL" | "MISSING_EMAIL" => IdentityError::InvalidEmail,
        "EMAIL_NOT_FOUND"
        | "INVALID_PASSWORD"
        | "INVALID_LOGIN_CREDENTIALS"
        | "USER_DISABLED"
        | "MISSING_PASSWORD" => IdentityError::InvalidCredential,
        _ => IdentityError::Remote(code.to_string()),
    }
}

#[async_trait]
impl IdentityService for FirebaseAuth {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SessionUser, IdentityError> {
        self.password_call("signInWithPassword", credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SessionUser, IdentityError> {
        self.password_call("signUp", credentials).await
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.store_session(None)?;
        self.listeners.emit(&None);
        Ok(())
    }

    fn current_user(&self) -> Option<SessionUser> {
        lock(&self.session).as_ref().and_then(|s| to_user(s).ok())
    }

    fn on_auth_state_changed(&self, listener: AuthStateListener) -> Subscription {
        self.listeners.register(move |user| listener(user.clone()))
    }
}

#[async_trait]
impl TokenSource for FirebaseAuth {
    async fn id_token(&self) -> Result<Option<String>, StoreError> {
        self.fresh_id_token().await.map_err(|e| match e {
            IdentityError::Network(m) => StoreError::Network(m),
            other => StoreError::PermissionDenied(other.to_string()),
        })
    }
}
