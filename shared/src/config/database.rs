//! Database dialect and pool configuration

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Relational database product the provider talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rdbms {
    /// PostgreSQL
    PostgreSql,
    /// MySQL
    MySql,
    /// MariaDB (MySQL wire protocol)
    MariaDb,
    /// SQLite
    Sqlite,
}

impl Rdbms {
    /// All known dialects
    pub const ALL: [Rdbms; 4] = [Rdbms::PostgreSql, Rdbms::MySql, Rdbms::MariaDb, Rdbms::Sqlite];

    /// Human readable product name
    pub fn description(&self) -> &'static str {
        match self {
            Rdbms::PostgreSql => "PostgreSQL",
            Rdbms::MySql => "MySQL",
            Rdbms::MariaDb => "MariaDB",
            Rdbms::Sqlite => "SQLite",
        }
    }

    /// URL scheme the sqlx driver for this dialect expects
    pub fn url_scheme(&self) -> &'static str {
        match self {
            Rdbms::PostgreSql => "postgres",
            Rdbms::MySql | Rdbms::MariaDb => "mysql",
            Rdbms::Sqlite => "sqlite",
        }
    }

    /// Whether a URL scheme belongs to this dialect's driver
    pub fn accepts_scheme(&self, scheme: &str) -> bool {
        let scheme = scheme.to_ascii_lowercase();
        match self {
            Rdbms::PostgreSql => scheme == "postgres" || scheme == "postgresql",
            Rdbms::MySql | Rdbms::MariaDb => scheme == "mysql" || scheme == "mariadb",
            Rdbms::Sqlite => scheme == "sqlite",
        }
    }

    /// Whether bind parameters are numbered (`$1`) rather than positional (`?`)
    pub fn uses_numbered_placeholders(&self) -> bool {
        matches!(self, Rdbms::PostgreSql)
    }

    /// Whether username and password are part of the connection
    pub fn uses_credentials(&self) -> bool {
        !matches!(self, Rdbms::Sqlite)
    }
}

impl std::fmt::Display for Rdbms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for Rdbms {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Rdbms::PostgreSql),
            "mysql" => Ok(Rdbms::MySql),
            "mariadb" => Ok(Rdbms::MariaDb),
            "sqlite" => Ok(Rdbms::Sqlite),
            _ => Err(ConfigError::UnknownDialect {
                value: s.to_string(),
            }),
        }
    }
}

/// Connection pool tuning
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connections kept open while idle
    #[serde(default)]
    pub min_connections: u32,

    /// Acquire timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,

    /// Ping connections before handing them out
    #[serde(default = "default_test_before_acquire")]
    pub test_before_acquire: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
            test_before_acquire: default_test_before_acquire(),
        }
    }
}

impl PoolConfig {
    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    /// Set the acquire timeout in seconds
    pub fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout = seconds;
        self
    }
}

fn default_test_before_acquire() -> bool {
    true
}
