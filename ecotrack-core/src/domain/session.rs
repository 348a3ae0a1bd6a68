//! Session domain model

use serde::{Deserialize, Serialize};

/// The authenticated identity held by a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: String,
    pub display_name: String,
}

/// Which user, if any, is currently logged in
///
/// The id and display name are either both present or both absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    /// The logged-out session
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user: Some(SessionUser {
                user_id: user_id.into(),
                display_name: display_name.into(),
            }),
        }
    }

    /// Build a session from the two persisted keys.
    ///
    /// Anything other than two non-empty values is treated as logged out.
    pub fn from_parts(user_id: Option<String>, display_name: Option<String>) -> Self {
        match (user_id, display_name) {
            (Some(id), Some(name)) if !id.trim().is_empty() && !name.trim().is_empty() => {
                Self::authenticated(id, name)
            }
            _ => Self::anonymous(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.user_id.as_str())
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.display_name.as_str())
    }
}
