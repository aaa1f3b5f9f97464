use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use godo_core::args::ParsedCommand;
use godo_core::config::{global_config_path, LoadedConfig, Source};
use tracing::{debug, warn};

pub const FILE_FLAGS: [&str; 2] = ["file", "f"];
pub const WIDTH_FLAG: &str = "width";

#[derive(Debug, Clone)]
pub struct Settings {
    pub board_path: PathBuf,
    pub width: usize,
}

fn terminal_width() -> Option<usize> {
    crossterm::terminal::size()
        .ok()
        .map(|(width, _)| usize::from(width))
}

impl Settings {
    pub fn resolve(parsed: &ParsedCommand, cwd: &Path) -> Result<Self> {
        let (config, problems) = LoadedConfig::discover(cwd, global_config_path().as_deref());
        for err in problems {
            warn!(error = %err, "ignoring unreadable config");
        }

        let (board_path, path_source) =
            config.resolve_board_path_with_source(cwd, parsed.flag_any(&FILE_FLAGS));
        debug!(path = %board_path.display(), source = path_source.as_str(), "board file");

        let (width, width_source) = match parsed.flag(WIDTH_FLAG) {
            Some(raw) => {
                let width = raw
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("invalid --width value: {raw:?}"))?;
                (width, Source::Flag)
            }
            None => config.resolve_width_with_source(terminal_width()),
        };
        debug!(width, source = width_source.as_str(), "render width");

        Ok(Self { board_path, width })
    }
}
