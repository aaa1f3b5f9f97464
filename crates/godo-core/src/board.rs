use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub type TaskId = u64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Could not find task with id {0}")]
    NotFound(TaskId),
    #[error("{0} is not a list (expected todo, doing or done)")]
    UnknownColumn(String),
    #[error("Task id {0} appears more than once")]
    DuplicateId(TaskId),
    #[error("No task ids left to hand out")]
    IdSpaceExhausted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    #[default]
    Todo,
    Doing,
    Done,
}

impl Column {
    /// Render and search order.
    pub const ALL: [Column; 3] = [Column::Todo, Column::Doing, Column::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Column::Todo => "todo",
            Column::Doing => "doing",
            Column::Done => "done",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Todo => "Todo",
            Column::Doing => "Doing",
            Column::Done => "Done",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = BoardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "todo" => Ok(Column::Todo),
            "doing" => Ok(Column::Doing),
            "done" => Ok(Column::Done),
            _ => Err(BoardError::UnknownColumn(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    /// Written as `status`. Never read back: the array a task is stored in
    /// decides its column, whatever string the file holds.
    #[serde(rename = "status", skip_deserializing)]
    pub column: Column,
}

/// Columns written as `null` load as empty.
fn nullable_tasks<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Task>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default, deserialize_with = "nullable_tasks")]
    pub todo: Vec<Task>,
    #[serde(default, deserialize_with = "nullable_tasks")]
    pub doing: Vec<Task>,
    #[serde(default, deserialize_with = "nullable_tasks")]
    pub done: Vec<Task>,
    #[serde(rename = "current_index", default)]
    pub next_id: TaskId,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the current counter value and advances it. The last
    /// representable id is never handed out, so the counter cannot wrap.
    pub fn next_id(&mut self) -> Result<TaskId, BoardError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(BoardError::IdSpaceExhausted)?;
        Ok(id)
    }

    pub fn add(&mut self, text: impl Into<String>, column: Column) -> Result<TaskId, BoardError> {
        let id = self.next_id()?;
        self.column_mut(column).push(Task {
            id,
            text: text.into(),
            column,
        });
        Ok(id)
    }

    pub fn column(&self, column: Column) -> &[Task] {
        match column {
            Column::Todo => &self.todo,
            Column::Doing => &self.doing,
            Column::Done => &self.done,
        }
    }

    fn column_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::Todo => &mut self.todo,
            Column::Doing => &mut self.doing,
            Column::Done => &mut self.done,
        }
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        Column::ALL
            .into_iter()
            .flat_map(|column| self.column(column))
            .find(|task| task.id == id)
    }

    fn locate(&self, id: TaskId) -> Option<(Column, usize)> {
        Column::ALL.into_iter().find_map(|column| {
            self.column(column)
                .iter()
                .position(|task| task.id == id)
                .map(|idx| (column, idx))
        })
    }

    pub fn remove(&mut self, id: TaskId) -> Result<Task, BoardError> {
        let (column, idx) = self.locate(id).ok_or(BoardError::NotFound(id))?;
        Ok(self.column_mut(column).remove(idx))
    }

    /// Removes the task from its column and appends it to `to`, even when
    /// `to` is the column it already lives in.
    pub fn move_task(&mut self, id: TaskId, to: Column) -> Result<(), BoardError> {
        let mut task = self.remove(id)?;
        task.column = to;
        self.column_mut(to).push(task);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.doing.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes a decoded board consistent: statuses follow the array each task
    /// sits in, the counter never points at a used id, and ids are unique.
    pub fn normalize(&mut self) -> Result<(), BoardError> {
        let mut seen = HashSet::new();
        for column in Column::ALL {
            for task in self.column_mut(column) {
                task.column = column;
            }
            for task in self.column(column) {
                if !seen.insert(task.id) {
                    return Err(BoardError::DuplicateId(task.id));
                }
            }
        }
        if let Some(max) = seen.into_iter().max() {
            let after = max.checked_add(1).ok_or(BoardError::IdSpaceExhausted)?;
            self.next_id = self.next_id.max(after);
        }
        Ok(())
    }
}
