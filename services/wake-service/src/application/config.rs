use anyhow::Context as _;
use anyhow::Result;
use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::SocketAddr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Also answer on the legacy `/wake` path.
    pub legacy_route_enabled: bool,
}

impl HttpConfig {
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: Config::DEFAULT_HTTP_PORT,
            legacy_route_enabled: true,
        }
    }
}

/// Service configuration, read once at startup.
///
/// | Variable                    | Default   |
/// |-----------------------------|-----------|
/// | `WAKE_HTTP_HOST`            | `0.0.0.0` |
/// | `WAKE_HTTP_PORT`            | `8080`    |
/// | `WAKE_LEGACY_ROUTE_ENABLED` | `true`    |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub http: HttpConfig,
}

impl Config {
    const HTTP_HOST_ENV_VAR: &str = "WAKE_HTTP_HOST";
    const HTTP_PORT_ENV_VAR: &str = "WAKE_HTTP_PORT";
    const LEGACY_ROUTE_ENABLED_ENV_VAR: &str = "WAKE_LEGACY_ROUTE_ENABLED";

    const DEFAULT_HTTP_PORT: u16 = 8080;

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, unset keys falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HttpConfig::default();

        let host = match lookup(Self::HTTP_HOST_ENV_VAR) {
            Some(value) => value.trim().parse::<IpAddr>().with_context(|| {
                format!("Invalid {}: '{value}' is not an IP address", Self::HTTP_HOST_ENV_VAR)
            })?,
            None => defaults.host,
        };

        let port = match lookup(Self::HTTP_PORT_ENV_VAR) {
            Some(value) => value.trim().parse::<u16>().with_context(|| {
                format!("Invalid {}: '{value}' is not a port number", Self::HTTP_PORT_ENV_VAR)
            })?,
            None => defaults.port,
        };

        let legacy_route_enabled = match lookup(Self::LEGACY_ROUTE_ENABLED_ENV_VAR) {
            Some(value) => parse_bool(&value).with_context(|| {
                format!("Invalid {}: '{value}' is not a boolean", Self::LEGACY_ROUTE_ENABLED_ENV_VAR)
            })?,
            None => defaults.legacy_route_enabled,
        };

        Ok(Self {
            http: HttpConfig {
                host,
                port,
                legacy_route_enabled,
            },
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(anyhow::anyhow!("expected true/false/1/0/yes/no, got '{other}'")),
    }
}
