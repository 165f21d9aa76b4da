//! Startup configuration.
//!
//! Values come from command-line flags (or their environment variables), an
//! optional YAML file, and built-in defaults, in that order of precedence.
//! [`Settings::validate`] turns them into the immutable [`ServerConfig`] the
//! server runs with.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::docroot::DocumentRoot;

/// Pending connections the OS queues while all workers are busy.
pub const BACKLOG: u32 = 10;
/// Size of a single read from the client.
pub const REQUEST_CHUNK_SIZE: usize = 1024;
/// Reading stops once the request grows past this many bytes.
pub const REQUEST_MAX_SIZE: usize = 8 * 1024;

const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: i64 = 8080;
const DEFAULT_WORKERS: i64 = 4;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid number of workers: {0}")]
    InvalidWorkers(i64),

    #[error("invalid port: {0}")]
    InvalidPort(i64),

    #[error("{0} must be at least one second")]
    InvalidTimeout(&'static str),

    #[error("document root is not set")]
    MissingRoot,

    #[error("document root {path} is not a directory")]
    RootNotDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Command-line interface.
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about = "Serve static files over HTTP", long_about = None)]
pub struct Cli {
    /// Document root
    #[arg(short, long, env = "HTTPD_ROOT")]
    pub root: Option<PathBuf>,

    /// Number of workers
    #[arg(short, long, env = "HTTPD_WORKERS", allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// Server address
    #[arg(short, long, env = "HTTPD_ADDRESS")]
    pub address: Option<String>,

    /// Server port
    #[arg(short, long, env = "HTTPD_PORT", allow_negative_numbers = true)]
    pub port: Option<i64>,

    /// YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Unvalidated settings, as read from a config file or assembled from flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub root: Option<PathBuf>,
    pub address: String,
    pub port: i64,
    pub workers: i64,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: None,
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
            read_timeout_secs: DEFAULT_TIMEOUT_SECS,
            write_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::ParseFile {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml, path)
    }

    /// Builds settings from the command line, layered over the config file
    /// it names (if any).
    pub fn load(cli: Cli) -> Result<Self, ConfigError> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.merge(cli))
    }

    /// Overrides fields with any flags that were given.
    pub fn merge(mut self, cli: Cli) -> Self {
        if let Some(root) = cli.root {
            self.root = Some(root);
        }
        if let Some(address) = cli.address {
            self.address = address;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(workers) = cli.workers {
            self.workers = workers;
        }
        self
    }

    pub fn validate(self) -> Result<ServerConfig, ConfigError> {
        let workers =
            usize::try_from(self.workers).map_err(|_| ConfigError::InvalidWorkers(self.workers))?;

        let port = u16::try_from(self.port)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(ConfigError::InvalidPort(self.port))?;

        if self.read_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("read_timeout_secs"));
        }
        if self.write_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("write_timeout_secs"));
        }

        let root = self.root.ok_or(ConfigError::MissingRoot)?;
        let document_root = DocumentRoot::new(&root)
            .map_err(|source| ConfigError::RootNotDirectory { path: root, source })?;

        Ok(ServerConfig {
            document_root,
            address: self.address,
            port,
            workers,
            read_timeout: Duration::from_secs(self.read_timeout_secs),
            write_timeout: Duration::from_secs(self.write_timeout_secs),
        })
    }
}

/// Validated, immutable configuration shared by all workers.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub document_root: DocumentRoot,
    pub address: String,
    pub port: u16,
    pub workers: usize,
    /// Deadline for each read from the client
    pub read_timeout: Duration,
    /// Deadline for each write to the client
    pub write_timeout: Duration,
}

impl ServerConfig {
    /// Configuration with default address, port, workers and timeouts.
    pub fn new(document_root: DocumentRoot) -> Self {
        Self {
            document_root,
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT as u16,
            workers: DEFAULT_WORKERS as usize,
            read_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            write_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
