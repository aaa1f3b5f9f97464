use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::board::{Board, BoardError};

pub const DEFAULT_BOARD_FILE: &str = "godo.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Board IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse board: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to serialize board: {0}")]
    Serialize(serde_json::Error),
    #[error("Invalid board: {0}")]
    Board(#[from] BoardError),
}

/// Reads a board file. A missing file is `Ok(None)`, not an error.
pub fn load_board(path: &Path) -> Result<Option<Board>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    let board = parse_board(&raw)?;
    Ok(Some(board))
}

pub fn parse_board(raw: &str) -> Result<Board, StorageError> {
    let mut board: Board = serde_json::from_str(raw).map_err(StorageError::Parse)?;
    board.normalize()?;
    Ok(board)
}

/// Rewrites the whole file.
pub fn save_board(path: &Path, board: &Board) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut raw = serde_json::to_string_pretty(board).map_err(StorageError::Serialize)?;
    raw.push('\n');
    fs::write(path, raw)?;
    Ok(())
}
