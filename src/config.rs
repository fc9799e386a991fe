//! Runtime configuration
//!
//! Settings come from an optional JSON file and the command line; command
//! line values win. The file lives in the user's config directory:
//! - Linux: ~/.config/portfolio-viewer/config.json
//! - macOS: ~/Library/Application Support/portfolio-viewer/config.json
//! - Windows: %APPDATA%\portfolio-viewer\config.json

use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where project folders live below the site root, as laid out by the site
pub const DEFAULT_PROJECTS_DIR: &str = "assets/images/projetos";

/// Decoded images are downscaled so neither side exceeds this
pub const DEFAULT_MAX_IMAGE_DIMENSION: u32 = 1600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Command line arguments
#[derive(Debug, Default, Parser)]
#[command(name = "portfolio-viewer", version, about)]
pub struct Cli {
    /// Site root containing the projects directory
    pub site_root: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Projects directory, relative to the site root
    #[arg(long)]
    pub projects_dir: Option<PathBuf>,

    /// Project folder to load (repeatable); discovers folders when omitted
    #[arg(long = "folder")]
    pub folders: Vec<String>,
}

/// Effective settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site_root: PathBuf,
    pub projects_dir: PathBuf,
    /// Explicit project folders; empty means discover them
    pub folders: Vec<String>,
    pub max_image_dimension: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            projects_dir: PathBuf::from(DEFAULT_PROJECTS_DIR),
            folders: Vec::new(),
            max_image_dimension: DEFAULT_MAX_IMAGE_DIMENSION,
        }
    }
}

impl Config {
    /// Build the configuration from a parsed command line.
    ///
    /// A missing config file yields defaults; an unreadable or malformed one
    /// is an error.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = match &cli.config {
            Some(path) => Some(path.clone()),
            None => Self::default_path(),
        };

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if cli.config.is_some() => {
                return Err(ConfigError::Io {
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
                    path,
                })
            }
            _ => Self::default(),
        };

        config.apply_cli(cli);
        Ok(config)
    }

    /// Parse a JSON config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the path where the config file is expected
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("portfolio-viewer");
        path.push("config.json");
        Some(path)
    }

    /// Override file values with whatever was given on the command line
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(root) = &cli.site_root {
            self.site_root = root.clone();
        }
        if let Some(dir) = &cli.projects_dir {
            self.projects_dir = dir.clone();
        }
        if !cli.folders.is_empty() {
            self.folders = cli.folders.clone();
        }
    }

    /// Absolute-or-relative path of the projects directory
    pub fn projects_path(&self) -> PathBuf {
        self.site_root.join(&self.projects_dir)
    }
}
