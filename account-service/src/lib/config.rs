use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub access: AccessConfig,
    /// Administrator account created at startup when absent
    pub bootstrap: Option<BootstrapConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_days")]
    pub expiration_days: i64,
}

/// Route authorization settings.
#[derive(Debug, Deserialize, Clone)]
pub struct AccessConfig {
    /// Role name required on every route except authenticate
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
}

/// First administrator account, registered on startup if its email is unknown.
#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapConfig {
    pub admin_email: String,
    pub admin_password: String,
    #[serde(default = "default_bootstrap_name")]
    pub admin_name: String,
    #[serde(default = "default_bootstrap_company_id")]
    pub admin_company_id: i32,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            admin_role: default_admin_role(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_days() -> i64 {
    auth::issuer::DEFAULT_TOKEN_LIFETIME_DAYS
}

fn default_admin_role() -> String {
    "Administrator".to_string()
}

fn default_bootstrap_name() -> String {
    "Administrator".to_string()
}

fn default_bootstrap_company_id() -> i32 {
    1
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
