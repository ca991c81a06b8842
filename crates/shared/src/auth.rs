//! Authentication claims.
//!
//! There is no user table and no login flow: tokens are issued out-of-band
//! by the hosting platform. The only capability this service recognizes is
//! the flat `admin` role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role string that grants access to the admin endpoints.
pub const ADMIN_ROLE: &str = "admin";

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (operator identifier assigned by the issuing platform).
    pub sub: String,
    /// Flat role string; `admin` unlocks the admin endpoints.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a subject.
    #[must_use]
    pub fn new(subject: &str, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Whether these claims carry the administrator capability.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
