//! Locating and reading the TOML configuration.
//!
//! An explicit `--config` path must exist. Without one, the first existing
//! file among the local and per-user candidates is read; when neither exists
//! the built-in defaults apply.

use std::{
    fmt, fs, io, iter,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use mindmap::{MindmapError, config::AppConfig};

/// Config file looked up relative to the working directory.
const LOCAL_CONFIG: &str = "mindmap/config.toml";

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl From<ConfigError> for MindmapError {
    fn from(err: ConfigError) -> Self {
        MindmapError::Config(err.to_string())
    }
}

/// Where a candidate configuration file comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    Explicit,
    Local,
    User,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "explicit",
            Self::Local => "local",
            Self::User => "user",
        })
    }
}

/// Implicit candidates in lookup order: the local file, then the per-user
/// config directory when the platform has one.
fn implicit_candidates() -> impl Iterator<Item = (ConfigSource, PathBuf)> {
    let user = ProjectDirs::from("com", "mindmap", "mindmap")
        .map(|dirs| (ConfigSource::User, dirs.config_dir().join("config.toml")));
    if user.is_none() {
        debug!("No per-user config directory on this platform");
    }

    iter::once((ConfigSource::Local, PathBuf::from(LOCAL_CONFIG))).chain(user)
}

/// Loads the application configuration.
///
/// # Errors
///
/// Returns [`MindmapError::Config`] when the explicit path is missing, or
/// when the selected file cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, MindmapError> {
    if let Some(path) = explicit_path {
        return read_config(ConfigSource::Explicit, path.as_ref());
    }

    match implicit_candidates().find(|(_, path)| path.is_file()) {
        Some((source, path)) => read_config(source, &path),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn read_config(source: ConfigSource, path: &Path) -> Result<AppConfig, MindmapError> {
    info!(source:% = source, path:% = path.display(); "Loading configuration");

    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source: err,
        },
    })?;

    toml::from_str(&content).map_err(|err| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
        .into()
    })
}
