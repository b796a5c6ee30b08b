//! Error taxonomy shared by repositories, collaborators and view-models.

use thiserror::Error;

/// Failure reported by a document-store adapter.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Remote(String),
}

/// Failure reported by the identity collaborator. Display text is shown to the user as is.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Invalid email or password.")]
    InvalidCredential,
    #[error("That email address is already in use.")]
    EmailInUse,
    #[error("Password should be at least 6 characters.")]
    WeakPassword,
    #[error("That email address is badly formatted.")]
    InvalidEmail,
    #[error("Network error. Please check your internet connection.")]
    Network(String),
    #[error("{0}")]
    Remote(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// Required form fields were empty. Raised before any remote call.
    #[error("All fields are required. Please fill out: {}.", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Permission(String),
    /// A remote record failed schema validation.
    #[error("{0}")]
    Data(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("{0}")]
    Remote(String),
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl AppError {
    pub fn validation(missing: Vec<&'static str>) -> Self {
        AppError::Validation { missing }
    }

    pub fn not_signed_in() -> Self {
        AppError::Auth("You must be signed in to do that.".to_string())
    }

    pub fn not_owner(action: &str) -> Self {
        AppError::Permission(format!("You are not authorized to {} this event.", action))
    }

    /// Title used when the error is shown as a notice.
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "Validation Error",
            _ => "Error",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::PermissionDenied(m) => {
                AppError::Permission(format!("You do not have permission to do that ({}).", m))
            }
            StoreError::Network(m) => AppError::Network(m),
            StoreError::NotFound(m) => AppError::Remote(format!("Document not found: {}", m)),
            StoreError::Remote(m) => AppError::Remote(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_missing_fields() {
        let e = AppError::validation(vec!["name", "date"]);
        assert_eq!(e.to_string(), "All fields are required. Please fill out: name, date.");
        assert_eq!(e.title(), "Validation Error");
    }

    #[test]
    fn store_errors_map_into_taxonomy() {
        assert!(matches!(
            AppError::from(StoreError::PermissionDenied("rules".into())),
            AppError::Permission(_)
        ));
        assert!(matches!(AppError::from(StoreError::Network("down".into())), AppError::Network(_)));
        assert!(matches!(
            AppError::from(StoreError::NotFound("events/x".into())),
            AppError::Remote(_)
        ));
    }

    #[test]
    fn identity_errors_pass_through_verbatim() {
        let e = AppError::from(IdentityError::EmailInUse);
        assert_eq!(e.to_string(), "That email address is already in use.");
        assert_eq!(e.title(), "Error");
    }
}
