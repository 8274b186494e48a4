//! Configuration loading and validation for the endpoint server.
//!
//! Values are layered: built-in defaults, then `MAP_ENDPOINT_*` environment
//! variables, then command-line flags. The process exits with a clear error
//! message if `mapdir` ends up missing.

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

/// Prefix of the environment variables read by [`Config::load`].
pub const ENV_PREFIX: &str = "MAP_ENDPOINT";

/// Directory holding `<hostname>.crt` / `<hostname>.key` when no path is given.
pub const DEFAULT_CERT_DIR: &str = "/etc/pki/site/ssl/certs";

/// Command-line flags. Every flag is optional here so that unset flags fall
/// through to the environment and the defaults.
#[derive(Debug, Default, Parser)]
#[command(name = "endpoint-server", version, about = "Serve JSON system maps over HTTPS")]
pub struct Cli {
    /// HTTPS port [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// TLS certificate (PEM) [default: /etc/pki/site/ssl/certs/<hostname>.crt]
    #[arg(long)]
    pub cert: Option<String>,

    /// TLS private key (PEM) [default: /etc/pki/site/ssl/certs/<hostname>.key]
    #[arg(long)]
    pub key: Option<String>,

    /// JSON map files directory (required)
    #[arg(long)]
    pub mapdir: Option<String>,

    /// Tracing filter directive, overridden by RUST_LOG [default: info]
    #[arg(long)]
    pub log_level: Option<String>,

    /// OTLP/gRPC collector to export spans to
    #[arg(long)]
    pub otlp_endpoint: Option<String>,
}

/// Validated endpoint server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTPS listener binds on all interfaces.
    #[serde(default = "default_port")]
    pub port: u16,

    /// PEM certificate chain. Derived from the hostname when absent.
    #[serde(default)]
    pub cert: Option<PathBuf>,

    /// PEM private key. Derived from the hostname when absent.
    #[serde(default)]
    pub key: Option<PathBuf>,

    /// Directory containing the JSON map files. **Required.**
    #[serde(default)]
    pub mapdir: PathBuf,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional OTLP endpoint; span export is disabled when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

/// Resolved certificate and key locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

fn default_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from the process environment and `cli`.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed or `mapdir` is missing.
    pub fn load(cli: Cli) -> Result<Self> {
        Self::load_from(cli, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(cli: Cli, env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .set_override_option("port", cli.port.map(i64::from))?
            .set_override_option("cert", cli.cert)?
            .set_override_option("key", cli.key)?
            .set_override_option("mapdir", cli.mapdir)?
            .set_override_option("log_level", cli.log_level)?
            .set_override_option("otlp_endpoint", cli.otlp_endpoint)?
            .build()
            .context("failed to build configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.mapdir.as_os_str().is_empty() {
            anyhow::bail!("mapdir is a required argument");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("log level must not be empty");
        }
        Ok(())
    }

    /// Certificate and key paths, falling back to
    /// `DEFAULT_CERT_DIR/<hostname>.{crt,key}` for whichever is unset.
    ///
    /// `hostname` is only called when a fallback is needed.
    pub fn tls_paths<F>(&self, hostname: F) -> Result<TlsPaths>
    where
        F: FnOnce() -> io::Result<String>,
    {
        if let (Some(cert), Some(key)) = (&self.cert, &self.key) {
            return Ok(TlsPaths {
                cert: cert.clone(),
                key: key.clone(),
            });
        }

        let host = hostname().context("failed to look up hostname")?;
        let dir = PathBuf::from(DEFAULT_CERT_DIR);
        Ok(TlsPaths {
            cert: self
                .cert
                .clone()
                .unwrap_or_else(|| dir.join(format!("{host}.crt"))),
            key: self
                .key
                .clone()
                .unwrap_or_else(|| dir.join(format!("{host}.key"))),
        })
    }
}

/// Hostname of this machine as UTF-8.
pub fn system_hostname() -> io::Result<String> {
    hostname::get()?
        .into_string()
        .map_err(|raw| io::Error::new(io::ErrorKind::InvalidData, format!("hostname {raw:?} is not UTF-8")))
}
