use std::path::Path;

use ini::Ini;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    credentials::Credentials,
    error::{ConfigurationError, Error, Result},
};

const CONNECTION_SECTION: &str = "connection";

/// Connection fields as the host hands them over. Every field is optional
/// and falls back to an empty string.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: String,
}

impl ConnectionConfig {
    /// Reads an untyped config blob. Anything that is not an object of
    /// string fields is a type mismatch and yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match Self::try_from_value(value) {
            Ok(config) => Some(config),
            Err(error) => {
                debug!("ignoring connection config: {error}");
                None
            }
        }
    }

    pub fn try_from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ConfigurationError::TypeMismatch {
                reason: format!("expected an object, got {value}"),
            }
            .into());
        }
        serde_json::from_value(value).map_err(|error| {
            ConfigurationError::TypeMismatch {
                reason: error.to_string(),
            }
            .into()
        })
    }

    /// Loads the `[connection]` section of an ini file, falling back to keys
    /// outside of any section.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = Ini::load_from_file(path).map_err(|error| match error {
            ini::Error::Io(io_error) if io_error.kind() == std::io::ErrorKind::NotFound => {
                ConfigurationError::FileNotFound {
                    path: path.display().to_string(),
                }
                .into()
            }
            ini::Error::Io(io_error) => Error::InputOutput(io_error),
            ini::Error::Parse(parse_error) => ConfigurationError::InvalidFile {
                reason: parse_error.to_string(),
            }
            .into(),
        })?;
        Ok(Self::from_ini(&file))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let file = Ini::load_from_str(text).map_err(|error| ConfigurationError::InvalidFile {
            reason: error.to_string(),
        })?;
        Ok(Self::from_ini(&file))
    }

    fn from_ini(file: &Ini) -> Self {
        let section = file
            .section(Some(CONNECTION_SECTION))
            .unwrap_or_else(|| file.general_section());
        let field = |key: &str| section.get(key).unwrap_or_default().to_string();

        Self {
            access_key: field("access_key"),
            secret_key: field("secret_key"),
            session_token: field("session_token"),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.access_key.clone(),
            self.secret_key.clone(),
            self.session_token.clone(),
        )
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.credentials(), f)
    }
}
