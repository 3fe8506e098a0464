use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;

use crate::auth::AuthMode;
use crate::error::Result;

const DEFAULT_API_BASE: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Where the league backend lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub api_base: String,
    pub auth_mode: AuthMode,
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            auth_mode: AuthMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientSettings {
    /// Defaults overridden by `LEAGUE_API_BASE`, `LEAGUE_AUTH_MODE` and
    /// `LEAGUE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix("LEAGUE").try_parsing(true))
    }

    fn load(environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("api_base", DEFAULT_API_BASE)?
            .set_default("auth_mode", AuthMode::default().to_string())?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
