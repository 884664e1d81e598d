//! HTTP server configuration loaded via OrthoConfig.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Settings read from CLI arguments, `PEOPLE_API_*` environment variables
/// and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PEOPLE_API")]
pub struct ServerSettings {
    /// Address to listen on.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Serve Swagger UI and the OpenAPI document.
    pub docs_enabled: Option<bool>,
}

impl ServerSettings {
    /// Return the socket address to bind, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Return whether API docs are served. Defaults to on in debug builds.
    pub fn docs_enabled(&self) -> bool {
        self.docs_enabled.unwrap_or(cfg!(debug_assertions))
    }
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) docs_enabled: bool,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` with docs off.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            docs_enabled: false,
        }
    }

    /// Toggle Swagger UI and the OpenAPI document.
    #[must_use]
    pub fn with_docs(mut self, enabled: bool) -> Self {
        self.docs_enabled = enabled;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self::new(settings.bind_addr()).with_docs(settings.docs_enabled())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("people-api")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("PEOPLE_API_HOST", None::<String>),
            ("PEOPLE_API_PORT", None::<String>),
            ("PEOPLE_API_DOCS_ENABLED", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(settings.docs_enabled(), cfg!(debug_assertions));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PEOPLE_API_HOST", Some("127.0.0.1".to_owned())),
            ("PEOPLE_API_PORT", Some("9090".to_owned())),
            ("PEOPLE_API_DOCS_ENABLED", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 9090)));
        assert!(!settings.docs_enabled());
    }

    #[rstest]
    fn server_config_mirrors_settings() {
        let settings = ServerSettings {
            host: None,
            port: Some(3000),
            docs_enabled: Some(true),
        };
        let config = ServerConfig::from(&settings);
        assert_eq!(config.bind_addr().port(), 3000);
        assert!(config.docs_enabled);
    }
}
