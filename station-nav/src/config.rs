//! Application configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::routing::OsrmConfig;
use crate::stations::StationClientConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default User-Agent for routing requests.
const DEFAULT_USER_AGENT: &str = concat!("station-nav/", env!("CARGO_PKG_VERSION"));

/// Errors from reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Where stations come from.
#[derive(Debug, Clone)]
pub enum StationSourceConfig {
    /// The remote feed.
    Remote(StationClientConfig),
    /// A local JSON file in feed format.
    File(PathBuf),
}

/// Which routing service to use.
#[derive(Debug, Clone)]
pub enum RouterConfig {
    Osrm(OsrmConfig),
    /// Straight lines, no network.
    Direct,
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub stations: StationSourceConfig,
    pub router: RouterConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable            | Default                         |
    /// |---------------------|---------------------------------|
    /// | `BIND_ADDR`         | `127.0.0.1:3000`                |
    /// | `STATIC_DIR`        | `static`                        |
    /// | `STATIONS_URL`      | the public station feed         |
    /// | `STATIONS_FILE`     | unset; overrides `STATIONS_URL` |
    /// | `ROUTER`            | `osrm` (or `direct`)            |
    /// | `OSRM_URL`          | the public OSRM server          |
    /// | `ROUTER_USER_AGENT` | `station-nav/<version>`         |
    /// | `HTTP_TIMEOUT_SECS` | `30`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup (for testing).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
            reason: "expected host:port",
        })?;

        let timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "HTTP_TIMEOUT_SECS",
                        value: raw,
                        reason: "expected a positive number of seconds",
                    });
                }
            },
            None => 30,
        };

        let stations = match get("STATIONS_FILE") {
            Some(path) => StationSourceConfig::File(PathBuf::from(path)),
            None => {
                let mut config = StationClientConfig::new().with_timeout(timeout_secs);
                if let Some(url) = get("STATIONS_URL") {
                    config = config.with_url(url);
                }
                StationSourceConfig::Remote(config)
            }
        };

        let router = match get("ROUTER").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("osrm") => {
                let user_agent =
                    get("ROUTER_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
                let mut config = OsrmConfig::new(user_agent).with_timeout(timeout_secs);
                if let Some(url) = get("OSRM_URL") {
                    config = config.with_base_url(url);
                }
                RouterConfig::Osrm(config)
            }
            Some("direct") => RouterConfig::Direct,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "ROUTER",
                    value: other.to_string(),
                    reason: "expected osrm or direct",
                });
            }
        };

        Ok(Self {
            bind_addr,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            stations,
            router,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::routing::DEFAULT_OSRM_URL;
    use crate::stations::DEFAULT_STATIONS_URL;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.static_dir, "static");

        let StationSourceConfig::Remote(stations) = config.stations else {
            panic!("expected remote station source");
        };
        assert_eq!(stations.url, DEFAULT_STATIONS_URL);

        let RouterConfig::Osrm(osrm) = config.router else {
            panic!("expected OSRM router");
        };
        assert_eq!(osrm.base_url, DEFAULT_OSRM_URL);
        assert!(osrm.user_agent.starts_with("station-nav/"));
        assert_eq!(osrm.timeout_secs, 30);
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("STATIONS_URL", "http://mirror.test/stations"),
            ("OSRM_URL", "http://osrm.test/route/v1/foot"),
            ("ROUTER_USER_AGENT", "custom"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        let StationSourceConfig::Remote(stations) = config.stations else {
            panic!("expected remote station source");
        };
        assert_eq!(stations.url, "http://mirror.test/stations");
        assert_eq!(stations.timeout_secs, 5);

        let RouterConfig::Osrm(osrm) = config.router else {
            panic!("expected OSRM router");
        };
        assert_eq!(osrm.base_url, "http://osrm.test/route/v1/foot");
        assert_eq!(osrm.user_agent, "custom");
    }

    #[test]
    fn file_source_and_direct_router() {
        let config = config_from(&[
            ("STATIONS_FILE", "data/stations.json"),
            ("ROUTER", "Direct"),
        ])
        .unwrap();
        assert!(matches!(config.stations, StationSourceConfig::File(ref p) if p.ends_with("stations.json")));
        assert!(matches!(config.router, RouterConfig::Direct));
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = config_from(&[("BIND_ADDR", "  "), ("ROUTER", "")]).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(matches!(config.router, RouterConfig::Osrm(_)));
    }

    #[test]
    fn invalid_values() {
        let err = config_from(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BIND_ADDR", .. }));

        let err = config_from(&[("HTTP_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HTTP_TIMEOUT_SECS", .. }));

        let err = config_from(&[("ROUTER", "valhalla")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for ROUTER: \"valhalla\" (expected osrm or direct)"
        );
    }
}
