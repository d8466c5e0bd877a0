//! Application configuration management.
//!
//! Settings are merged in layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config PATH`, or `config.toml` in the platform config
//!    directory)
//! 3. Environment variables prefixed `DUPECHECK_` (e.g. `DUPECHECK_MATCH_NAMES=false`)
//! 4. Command-line flags
//!
//! A configuration file that cannot be parsed is reported with a warning and
//! the defaults are used instead; a broken file never stops a scan.
//!
//! # Example file
//!
//! ```toml
//! chunk_size = 65536
//! match_names = true
//! match_extensions = true
//! follow_symlinks = false
//! skip_hidden = true
//! min_size = 1
//! output = "json"
//! progress = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::ScanArgs;
use crate::duplicates::{FinderConfig, DEFAULT_CHUNK_SIZE};
use crate::output::OutputFormat;
use crate::scanner::WalkerConfig;

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "DUPECHECK_";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading or saving configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A layer could not be parsed or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    /// The configuration could not be serialized to TOML.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Reading or writing the configuration file failed.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The target file exists and overwriting was not requested.
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    /// No platform configuration directory could be determined.
    #[error("Failed to determine the configuration directory")]
    NoConfigDir,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bytes read per step when comparing content.
    pub chunk_size: usize,
    /// Require identical file names before comparing.
    pub match_names: bool,
    /// Require identical extensions before comparing.
    pub match_extensions: bool,
    /// Follow symbolic links during the walk.
    pub follow_symlinks: bool,
    /// Skip hidden files and directories.
    pub skip_hidden: bool,
    /// Ignore files smaller than this many bytes.
    pub min_size: Option<u64>,
    /// Ignore files larger than this many bytes.
    pub max_size: Option<u64>,
    /// Report format.
    pub output: OutputFormat,
    /// Write the report here instead of stdout.
    pub output_file: Option<PathBuf>,
    /// Show progress bars on stderr.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            match_names: true,
            match_extensions: true,
            follow_symlinks: false,
            skip_hidden: false,
            min_size: None,
            max_size: None,
            output: OutputFormat::Text,
            output_file: None,
            progress: true,
        }
    }
}

impl Config {
    /// Load the layered configuration, falling back to defaults on error.
    ///
    /// `explicit` replaces the platform config file when given.
    #[must_use]
    pub fn load(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            if !path.exists() {
                log::warn!("Configuration file {} does not exist", path.display());
            }
        }
        match Self::try_load(explicit) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using default configuration", e);
                Self::default()
            }
        }
    }

    /// Load the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if any layer fails to parse.
    pub fn try_load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit).extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Load defaults merged with one TOML file, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the file fails to parse.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Build the figment for defaults, file and environment layers.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        let file = explicit.map(Path::to_path_buf).or_else(Self::default_path);
        if let Some(path) = file {
            log::debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Platform-specific location of the configuration file.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupecheck", "dupecheck")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Apply command-line flags on top of the loaded layers.
    ///
    /// Boolean flags only ever switch a setting on (or, for `--any-name`,
    /// `--any-extension` and `--no-progress`, off); absent flags leave the
    /// lower layers untouched.
    pub fn apply_scan_args(&mut self, args: &ScanArgs) {
        if let Some(chunk_size) = args.chunk_size {
            self.chunk_size = usize::try_from(chunk_size).unwrap_or(usize::MAX);
        }
        if args.any_name {
            self.match_names = false;
        }
        if args.any_extension {
            self.match_extensions = false;
        }
        if args.follow_symlinks {
            self.follow_symlinks = true;
        }
        if args.skip_hidden {
            self.skip_hidden = true;
        }
        if args.min_size.is_some() {
            self.min_size = args.min_size;
        }
        if args.max_size.is_some() {
            self.max_size = args.max_size;
        }
        if let Some(output) = args.output {
            self.output = output;
        }
        if args.output_file.is_some() {
            self.output_file = args.output_file.clone();
        }
        if args.no_progress {
            self.progress = false;
        }
    }

    /// Walker settings derived from this configuration.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::new(
            self.follow_symlinks,
            self.skip_hidden,
            self.min_size,
            self.max_size,
        )
    }

    /// Finder settings derived from this configuration, without a progress callback.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_match_names(self.match_names)
            .with_match_extensions(self.match_extensions)
            .with_chunk_size(self.chunk_size)
            .with_walker_config(self.walker_config())
    }

    /// Render this configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write this configuration to `path` as TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyExists` if the file exists and `force`
    /// is false, or an I/O or serialization error.
    pub fn save(&self, path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
