//! Authenticated principal

use serde::{Deserialize, Serialize};

/// The authenticated principal, represented solely by an email value.
///
/// There is no password, role, or profile data in this system; a session
/// token encodes exactly this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Whether this principal owns resources attributed to `donor_email`
    pub fn owns(&self, donor_email: &str) -> bool {
        self.email == donor_email
    }
}
