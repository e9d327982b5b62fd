//! Credential loading for the Custom Search API variant.
//!
//! Credentials come from the process environment, with `.env` file
//! support via dotenvy. Loading happens once at startup, before any
//! network call; missing credentials are a fatal configuration error.

use thiserror::Error;

/// Environment variable holding the Custom Search API key.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Environment variable holding the Custom Search engine identifier.
pub const CX_ID_VAR: &str = "GOOGLE_CX_ID";

/// Configuration errors raised before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error(
        "missing required environment variable {name}. \
         Set it in the environment or in a .env file (see .env.example)."
    )]
    MissingVariable {
        /// The variable name that was not set.
        name: &'static str,
    },
}

/// Credentials for the authenticated Custom Search API variant.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Custom Search API key.
    pub api_key: String,
    /// Custom Search engine identifier (cx).
    pub cx_id: String,
}

impl Credentials {
    /// Loads credentials from the environment, reading a `.env` file first
    /// if one is present in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariable`] when either variable is
    /// absent or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is not an error; the variables may be set directly.
        dotenvy::dotenv().ok();

        let api_key = require_var(API_KEY_VAR)?;
        let cx_id = require_var(CX_ID_VAR)?;
        Ok(Self { api_key, cx_id })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVariable { name })
}
