use serde::{Deserialize, Serialize};

use crate::model::ids::{IdError, UserId};

/// An authenticated user, supplied by the application shell.
///
/// Passed explicitly to anything that needs to know who is playing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    user_id: UserId,
    email: Option<String>,
}

impl Identity {
    /// Build an identity keyed by a normalized (trimmed, lowercased) email.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if the email is blank.
    pub fn from_email(email: &str) -> Result<Self, IdError> {
        let normalized = email.trim().to_lowercase();
        let user_id = UserId::new(normalized.clone())?;
        Ok(Self {
            user_id,
            email: Some(normalized),
        })
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Name to show in the UI: the email when known, the id otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email().unwrap_or_else(|| self.user_id.as_str())
    }
}
