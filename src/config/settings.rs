use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::ari::ResolverConfig;
use crate::error::Error;
use crate::types::Result;

/// Let's Encrypt production directory
pub const DEFAULT_DIRECTORY_URL: &str = "https://acme-v02.api.letsencrypt.org/directory";

/// Environment variable naming a configuration file
pub const CONFIG_PATH_ENV: &str = "ARI_CONFIG";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// ACME server configuration
    #[serde(default)]
    pub acme: AcmeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// ACME server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcmeConfig {
    /// ACME directory URL
    pub directory_url: String,

    /// Per-request timeout in seconds (0 = client default)
    pub timeout_secs: u64,
}

impl Default for AcmeConfig {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            timeout_secs: 0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Debug-level detail instead of warnings and errors only
    pub verbose: bool,

    /// Emit JSON log lines
    pub structured: bool,
}

/// Command-line values that take precedence over every other source
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub directory_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub verbose: bool,
    pub structured: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            acme: AcmeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// The file is `config_file` if given, otherwise the path in `ARI_CONFIG`.
    /// Environment variables use the `ARI__` prefix with `__` between keys,
    /// e.g. `ARI__ACME__DIRECTORY_URL`.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // Add default values
        builder = builder.add_source(Config::try_from(&Self::default())?);

        let config_file = config_file
            .map(Path::to_path_buf)
            .or_else(|| env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));
        if let Some(path) = config_file {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(File::from(path.as_path()));
        }

        builder = builder.add_source(Environment::with_prefix("ARI").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Apply command-line overrides
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = &overrides.directory_url {
            self.acme.directory_url = url.clone();
        }

        if let Some(secs) = overrides.timeout_secs {
            self.acme.timeout_secs = secs;
        }

        if overrides.verbose {
            self.logging.verbose = true;
        }

        if overrides.structured {
            self.logging.structured = true;
        }
    }

    /// Check if configuration is valid
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.acme.directory_url)?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::Config(format!(
                "Unsupported directory URL scheme: {}",
                other
            ))),
        }
    }

    /// Request timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.acme.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Resolver configuration derived from these settings
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new(self.acme.directory_url.clone()).with_timeout(self.request_timeout())
    }
}
