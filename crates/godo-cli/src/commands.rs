use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use godo_core::args::ParsedCommand;
use godo_core::board::{Board, Column, TaskId};
use godo_core::resolve::{resolve, Resolution};
use godo_core::storage::{load_board, save_board};
use godo_render::render;
use tracing::{debug, info};

use crate::settings::Settings;

pub const DOING_FLAG: &str = "d";

pub const USAGE: &str = "\
Usage: godo [COMMAND] [OPTION]... [TEXT|ID]
Adds simple todo tracking to the command line.
Keeps the board in godo.json in the current directory unless configured otherwise.

COMMAND can be any of the following:
  ls,
  add [TEXT],
  rm [ID|PREFIX],
  mv [ID|PREFIX] [todo|doing|done],
  version

add can have the following OPTIONs:
  -d adds new task to the doing column

Every command accepts:
  --file=PATH  board file to read and write
  --width=N    width to render the board at
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Add,
    Move,
    Remove,
    Version,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ls" => Some(Command::List),
            "add" => Some(Command::Add),
            "mv" => Some(Command::Move),
            "rm" => Some(Command::Remove),
            "version" => Some(Command::Version),
            _ => None,
        }
    }

    fn mutates(self) -> bool {
        matches!(self, Command::Add | Command::Move | Command::Remove)
    }
}

pub fn run(parsed: &ParsedCommand, cwd: &Path, out: &mut impl Write) -> Result<()> {
    let Some(command) = Command::from_name(&parsed.command) else {
        debug!(command = %parsed.command, "unknown command, printing usage");
        out.write_all(USAGE.as_bytes())?;
        return Ok(());
    };
    if command == Command::Version {
        writeln!(out, "godo {}", godo_core::version())?;
        return Ok(());
    }

    let settings = Settings::resolve(parsed, cwd)?;
    let mut board = match load_board(&settings.board_path)
        .with_context(|| format!("failed to read {}", settings.board_path.display()))?
    {
        Some(board) => board,
        None => {
            info!(path = %settings.board_path.display(), "no board file yet, starting empty");
            Board::new()
        }
    };

    match command {
        Command::Add => add(parsed, &mut board)?,
        Command::Move => move_task(parsed, &mut board)?,
        Command::Remove => remove(parsed, &mut board)?,
        Command::List | Command::Version => {}
    }

    if command.mutates() {
        save_board(&settings.board_path, &board)
            .with_context(|| format!("failed to write {}", settings.board_path.display()))?;
        info!(path = %settings.board_path.display(), tasks = board.len(), "saved board");
    }

    out.write_all(render(&board, settings.width).as_bytes())?;
    Ok(())
}

/// Text for a new task. The value captured by `-d` belongs in front of the
/// trailing text, unless it was the final argument and is already part of it.
fn task_text(parsed: &ParsedCommand) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(value) = parsed.flag(DOING_FLAG) {
        if !value.is_empty() && !parsed.flag_value_is_trailing(DOING_FLAG) {
            parts.push(value);
        }
    }
    if !parsed.trailing_text.is_empty() {
        parts.push(&parsed.trailing_text);
    }
    parts.join(" ")
}

fn add(parsed: &ParsedCommand, board: &mut Board) -> Result<()> {
    let text = task_text(parsed);
    if text.trim().is_empty() {
        bail!("please add task text at the end of the command");
    }
    let column = if parsed.has_flag(DOING_FLAG) {
        Column::Doing
    } else {
        Column::Todo
    };
    let id = board.add(text, column)?;
    debug!(id, column = %column, "added task");
    Ok(())
}

fn resolve_id(token: &str, board: &Board) -> Result<TaskId> {
    match resolve(token, board) {
        Some(resolution @ Resolution::Numeric(_)) => Ok(resolution.id()),
        Some(Resolution::Prefix(id, column)) => {
            debug!(prefix = token, id, column = %column, "matched task by prefix");
            Ok(id)
        }
        None => bail!("no task id or task text starting with {token:?}"),
    }
}

fn move_task(parsed: &ParsedCommand, board: &mut Board) -> Result<()> {
    let words: Vec<&str> = parsed.trailing_text.split(' ').collect();
    let Some((list, target)) = words.split_last() else {
        bail!("invalid arguments of mv:\n\tmv [ID|PREFIX] [todo|doing|done]");
    };
    let target = target.join(" ");
    if target.is_empty() {
        bail!("invalid arguments of mv:\n\tmv [ID|PREFIX] [todo|doing|done]");
    }
    let to: Column = list.parse()?;
    let id = resolve_id(&target, board)?;
    board.move_task(id, to)?;
    debug!(id, to = %to, "moved task");
    Ok(())
}

fn remove(parsed: &ParsedCommand, board: &mut Board) -> Result<()> {
    if parsed.trailing_text.is_empty() {
        bail!("invalid arguments of rm:\n\trm [ID|PREFIX]");
    }
    let id = resolve_id(&parsed.trailing_text, board)?;
    let task = board.remove(id)?;
    debug!(id = task.id, text = %task.text, "removed task");
    Ok(())
}
