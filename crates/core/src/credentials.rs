use std::fmt;

/// Static AWS credentials for one listing. Nothing here is validated; an
/// empty or wrong key only shows up once the first API call is rejected.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: String,
}

impl Credentials {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            session_token: session_token.into(),
        }
    }

    /// Session token, or `None` when it was left empty.
    pub fn session_token(&self) -> Option<&str> {
        if self.session_token.is_empty() {
            None
        } else {
            Some(&self.session_token)
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"** redacted **")
            .field("session_token", &self.session_token().map(|_| "** redacted **"))
            .finish()
    }
}
