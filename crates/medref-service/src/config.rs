//! Service configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use medref_loader::ReportPolicy;
use medref_types::Severity;

/// Default data directory.
pub const DEFAULT_DATA_PATH: &str = "data";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default bind address.
pub const DEFAULT_BIND: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Runtime settings for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Directory holding `medications.json` and the interaction graph.
    pub data_path: PathBuf,
    /// Listen port.
    pub port: u16,
    /// Listen address.
    pub bind: IpAddr,
    /// Which severities are reported.
    pub policy: ReportPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND,
            policy: ReportPolicy::default(),
        }
    }
}

impl ServiceConfig {
    /// Reads `MEDREF_DATA_PATH`, `MEDREF_PORT`, `MEDREF_BIND` and
    /// `MEDREF_REPORT_THRESHOLD`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// Unparseable values are logged and replaced by their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("MEDREF_DATA_PATH").filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }

        if let Some(port) = lookup("MEDREF_PORT") {
            match port.trim().parse() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid MEDREF_PORT"),
            }
        }

        if let Some(bind) = lookup("MEDREF_BIND") {
            match bind.trim().parse() {
                Ok(bind) => config.bind = bind,
                Err(_) => tracing::warn!(value = %bind, "Ignoring invalid MEDREF_BIND"),
            }
        }

        if let Some(threshold) = lookup("MEDREF_REPORT_THRESHOLD") {
            match parse_threshold(&threshold) {
                Some(severity) => config.policy = ReportPolicy::with_threshold(severity),
                None => {
                    tracing::warn!(value = %threshold, "Ignoring invalid MEDREF_REPORT_THRESHOLD")
                }
            }
        }

        config
    }

    /// Returns the socket address to listen on.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Exact label match only. Unrecognized input is `None`, never `Unknown`.
fn parse_threshold(value: &str) -> Option<Severity> {
    let value = value.trim();
    Severity::ALL
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(value))
}
