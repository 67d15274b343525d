use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token payload issued at login.
///
/// Carries the username and the issue time. `exp` is only present when the
/// server is configured with a token lifetime; without it tokens stay valid
/// until the signing secret changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create non-expiring claims for a user, issued now.
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            iat: Utc::now().timestamp(),
            exp: None,
        }
    }

    /// Set expiration relative to the issue time.
    pub fn expiring_in_hours(mut self, hours: i64) -> Self {
        self.exp = Some(self.iat + Duration::hours(hours).num_seconds());
        self
    }

    /// Apply an optional lifetime, leaving the claims untouched on `None`.
    pub fn with_lifetime(self, hours: Option<i64>) -> Self {
        match hours {
            Some(hours) => self.expiring_in_hours(hours),
            None => self,
        }
    }
}
