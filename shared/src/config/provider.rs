//! Connection settings resolved from the environment
//!
//! The provider takes its database settings from four environment variables
//! and nothing else. All four are required.

use std::collections::HashMap;

use crate::config::database::Rdbms;
use crate::errors::{ConfigError, ConfigResult};

pub const ENV_VAR_URL: &str = "KEYCLOAK_USER_PROVIDER_URL";
pub const ENV_VAR_USERNAME: &str = "KEYCLOAK_USER_PROVIDER_USERNAME";
pub const ENV_VAR_PASSWORD: &str = "KEYCLOAK_USER_PROVIDER_PASSWORD";
pub const ENV_VAR_RDBMS: &str = "KEYCLOAK_USER_PROVIDER_RDBMS";

/// Source of environment values
pub trait EnvSource: Send + Sync {
    /// Value of the variable, or `None` when it is not set
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed set of variables held in memory
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Remove a variable
    pub fn without(mut self, name: &str) -> Self {
        self.vars.remove(name);
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Database connection settings for one provider configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Database URL as given in the environment
    pub url: String,
    /// Database user
    pub username: String,
    /// Database password
    pub password: String,
    /// Selected dialect
    pub rdbms: Rdbms,
}

impl ConnectionSettings {
    /// Resolve settings from an arbitrary source
    ///
    /// Variables are checked in order URL, username, password, dialect and the
    /// first absent one is reported.
    pub fn from_source(env: &dyn EnvSource) -> ConfigResult<Self> {
        let url = require(env, ENV_VAR_URL)?;
        let username = require(env, ENV_VAR_USERNAME)?;
        let password = require(env, ENV_VAR_PASSWORD)?;
        let rdbms = require(env, ENV_VAR_RDBMS)?.parse::<Rdbms>()?;

        Ok(Self {
            url,
            username,
            password,
            rdbms,
        })
    }
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("rdbms", &self.rdbms)
            .finish()
    }
}

fn require(env: &dyn EnvSource, name: &'static str) -> ConfigResult<String> {
    env.var(name).ok_or(ConfigError::MissingVariable { name })
}
