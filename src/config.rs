use serde::Deserialize;

const DEFAULT_PORT: u16 = 3007;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = resolve_port(std::env::var("APP_PORT").ok().as_deref());
        Ok(Self {
            database_url,
            host,
            port,
        })
    }
}

/// APP_PORT wins when set and parseable, otherwise the default.
fn resolve_port(env_port: Option<&str>) -> u16 {
    env_port
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_port_overrides_default() {
        assert_eq!(resolve_port(Some("9000")), 9000);
    }

    #[test]
    fn missing_port_falls_back_to_default() {
        assert_eq!(resolve_port(None), DEFAULT_PORT);
    }

    #[test]
    fn unparseable_port_falls_back_to_default() {
        assert_eq!(resolve_port(Some("not-a-port")), DEFAULT_PORT);
        assert_eq!(resolve_port(Some("")), DEFAULT_PORT);
        assert_eq!(resolve_port(Some("99999")), DEFAULT_PORT);
    }
}
