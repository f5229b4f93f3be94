use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// sea-orm connection URL, e.g. `sqlite://target/db/stages.db?mode=rwc`
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const PORT_ENV: &str = "PORT";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000
"#;

impl Config {
    /// Connection string; its absence is fatal
    pub fn database_url(&self) -> anyhow::Result<&str> {
        match self.database.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(anyhow::anyhow!(
                "Database connection string is not configured: set {} or [database] url in config.toml",
                DATABASE_URL_ENV
            )),
        }
    }

    /// Environment variables take precedence over the file
    pub fn apply_env<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database.url = Some(url);
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {} value '{}': {}", PORT_ENV, port, e))?;
        }
        Ok(self)
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Then `DATABASE_URL` and `PORT` from the environment override the file.
pub fn load_config() -> anyhow::Result<Config> {
    let config = match std::env::current_exe() {
        Ok(exe_path) => match exe_path.parent() {
            Some(exe_dir) => load_file_or_default(&exe_dir.join("config.toml"))?,
            None => parse(DEFAULT_CONFIG)?,
        },
        Err(_) => parse(DEFAULT_CONFIG)?,
    };

    config.apply_env(|key| std::env::var(key).ok())
}

fn load_file_or_default(config_path: &Path) -> anyhow::Result<Config> {
    if config_path.exists() {
        tracing::info!("Loading config from: {}", config_path.display());
        let contents = std::fs::read_to_string(config_path)?;
        parse(&contents)
    } else {
        tracing::warn!("config.toml not found at: {}", config_path.display());
        tracing::info!("Using default embedded configuration");
        parse(DEFAULT_CONFIG)
    }
}

fn parse(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        let config = parse(DEFAULT_CONFIG).unwrap();
        assert!(config.database_url().is_err());

        let config = parse("[database]\nurl = \"  \"\n").unwrap();
        assert!(config.database_url().is_err());
    }

    #[test]
    fn test_file_values() {
        let config = parse(
            r#"
            [database]
            url = "sqlite://target/db/stages.db?mode=rwc"

            [server]
            port = 8081
            "#,
        )
        .unwrap();
        assert_eq!(
            config.database_url().unwrap(),
            "sqlite://target/db/stages.db?mode=rwc"
        );
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_env_overrides_file() {
        let config = parse("[database]\nurl = \"sqlite://a.db\"\n")
            .unwrap()
            .apply_env(|key| match key {
                DATABASE_URL_ENV => Some("sqlite::memory:".into()),
                PORT_ENV => Some("4000".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.database_url().unwrap(), "sqlite::memory:");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let result = Config::default().apply_env(|key| match key {
            PORT_ENV => Some("not-a-port".into()),
            _ => None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
