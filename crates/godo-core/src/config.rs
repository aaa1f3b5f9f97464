use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::DEFAULT_BOARD_FILE;

pub const DEFAULT_WIDTH: usize = 120;

/// Project config names, in lookup order. The first is the one written.
pub const CONFIG_FILES: [&str; 2] = [".godo.toml", ".godorc"];
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GodoConfig {
    /// Board file; relative paths are taken from the directory holding the config.
    pub board_file: Option<String>,
    /// Fixed render width, used instead of the terminal's.
    pub width: Option<u16>,
    /// Render width when the terminal size cannot be read.
    pub fallback_width: Option<u16>,
}

/// `$GODO_HOME`, else `.godo` in the user's home directory.
pub fn godo_home() -> Option<PathBuf> {
    std::env::var_os("GODO_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".godo")))
}

pub fn global_config_path() -> Option<PathBuf> {
    godo_home().map(|home| home.join(GLOBAL_CONFIG_FILE))
}

/// Nearest project config file in `start` or one of its parents.
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    start.ancestors().find_map(|dir| {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

pub fn read_config(path: &Path) -> Result<GodoConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `config` as the project config of `dir` and returns its path.
pub fn write_config(dir: &Path, config: &GodoConfig) -> Result<PathBuf, ConfigError> {
    let path = dir.join(CONFIG_FILES[0]);
    let body = toml::to_string_pretty(config)?;
    fs::write(&path, body).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Project,
    Global,
    Terminal,
    Default,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Flag => "flag",
            Source::Project => "project",
            Source::Global => "global",
            Source::Terminal => "terminal",
            Source::Default => "default",
        }
    }
}

/// Config sources that loaded, each with the directory its file sits in.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub project: Option<(PathBuf, GodoConfig)>,
    pub global: Option<(PathBuf, GodoConfig)>,
}

impl LoadedConfig {
    /// Reads the project config found from `cwd` and the global config at
    /// `global`. Each source stands alone: one that cannot be read is left
    /// out and its error returned, and the other is still used.
    pub fn discover(cwd: &Path, global: Option<&Path>) -> (Self, Vec<ConfigError>) {
        let mut problems = Vec::new();
        let mut load = |path: &Path| match read_config(path) {
            Ok(config) => {
                let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
                Some((dir, config))
            }
            Err(err) => {
                problems.push(err);
                None
            }
        };
        let project = find_project_config(cwd).and_then(|path| load(&path));
        let global = global.filter(|path| path.is_file()).and_then(|path| load(path));
        (Self { project, global }, problems)
    }

    fn project_value<T>(&self, get: impl Fn(&GodoConfig) -> Option<T>) -> Option<T> {
        self.project.as_ref().and_then(|(_, config)| get(config))
    }

    fn global_value<T>(&self, get: impl Fn(&GodoConfig) -> Option<T>) -> Option<T> {
        self.global.as_ref().and_then(|(_, config)| get(config))
    }

    /// Board path: flag, then project config, then global config, then
    /// `godo.json` in `cwd`. Relative paths are taken from `cwd` for a flag,
    /// and the directory holding the config file otherwise.
    pub fn resolve_board_path_with_source(
        &self,
        cwd: &Path,
        flag: Option<&str>,
    ) -> (PathBuf, Source) {
        if let Some(value) = flag.map(str::trim).filter(|value| !value.is_empty()) {
            return (cwd.join(value), Source::Flag);
        }
        if let Some((root, config)) = &self.project {
            if let Some(file) = config.board_file.as_deref() {
                return (root.join(file), Source::Project);
            }
        }
        if let Some((home, config)) = &self.global {
            if let Some(file) = config.board_file.as_deref() {
                return (home.join(file), Source::Global);
            }
        }
        (cwd.join(DEFAULT_BOARD_FILE), Source::Default)
    }

    /// Render width: fixed config width, then `terminal`, then the configured
    /// fallback, then [`DEFAULT_WIDTH`]. A width flag is handled by the caller.
    pub fn resolve_width_with_source(&self, terminal: Option<usize>) -> (usize, Source) {
        if let Some(width) = self.project_value(|config| config.width) {
            return (usize::from(width), Source::Project);
        }
        if let Some(width) = self.global_value(|config| config.width) {
            return (usize::from(width), Source::Global);
        }
        if let Some(width) = terminal.filter(|width| *width > 0) {
            return (width, Source::Terminal);
        }
        if let Some(width) = self.project_value(|config| config.fallback_width) {
            return (usize::from(width), Source::Project);
        }
        if let Some(width) = self.global_value(|config| config.fallback_width) {
            return (usize::from(width), Source::Global);
        }
        (DEFAULT_WIDTH, Source::Default)
    }
}
