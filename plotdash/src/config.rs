//! Dashboard configuration: which directories to watch and the staggering
//! rules that decide tmp directory readiness.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/plotdash/plotdash.yaml (fallback ~/.config/plotdash/plotdash.yaml)

use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found at '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub directories: Directories,
    #[serde(default)]
    pub scheduling: Scheduling,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Directories {
    pub log: PathBuf,
    pub tmp: Vec<PathBuf>,
    #[serde(default)]
    pub dst: Vec<PathBuf>,
    /// Per tmp directory replacements for the scheduling limits.
    #[serde(default)]
    pub tmp_overrides: BTreeMap<PathBuf, TmpOverride>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
pub struct TmpOverride {
    pub tmpdir_stagger_phase_major: Option<u32>,
    pub tmpdir_stagger_phase_minor: Option<u32>,
    pub tmpdir_stagger_phase_limit: Option<u32>,
    pub tmpdir_max_jobs: Option<u32>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Scheduling {
    pub tmpdir_stagger_phase_major: u32,
    pub tmpdir_stagger_phase_minor: u32,
    /// Jobs allowed in a tmp dir before the stagger milestone.
    pub tmpdir_stagger_phase_limit: u32,
    pub tmpdir_max_jobs: u32,
}

impl Default for Scheduling {
    fn default() -> Self {
        Self {
            tmpdir_stagger_phase_major: 2,
            tmpdir_stagger_phase_minor: 1,
            tmpdir_stagger_phase_limit: 1,
            tmpdir_max_jobs: 3,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| {
            Err(ConfigError::Invalid {
                message: message.to_string(),
            })
        };
        if self.directories.log.as_os_str().is_empty() {
            return invalid("directories.log must be set");
        }
        if self.directories.tmp.is_empty() {
            return invalid("directories.tmp must list at least one directory");
        }
        let dirs = &self.directories;
        if let Some((key, dir)) = std::iter::once(("log", &dirs.log))
            .chain(dirs.tmp.iter().map(|d| ("tmp", d)))
            .chain(dirs.dst.iter().map(|d| ("dst", d)))
            .find(|(_, d)| !d.is_absolute())
        {
            return Err(ConfigError::Invalid {
                message: format!(
                    "directories.{key} entry '{}' must be an absolute path",
                    dir.display()
                ),
            });
        }
        if self.scheduling.tmpdir_stagger_phase_limit == 0 {
            return invalid("scheduling.tmpdir_stagger_phase_limit must be at least 1");
        }
        if self.scheduling.tmpdir_max_jobs == 0 {
            return invalid("scheduling.tmpdir_max_jobs must be at least 1");
        }
        if let Some(dir) = self
            .directories
            .tmp_overrides
            .keys()
            .find(|d| !self.directories.tmp.contains(d))
        {
            return Err(ConfigError::Invalid {
                message: format!(
                    "tmp_overrides names '{}', which is not in directories.tmp",
                    dir.display()
                ),
            });
        }
        Ok(())
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("plotdash")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("plotdash")
    }
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("plotdash.yaml")
}

pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

/// Read, parse and validate the config at `path`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse_config(&text, path)
}
