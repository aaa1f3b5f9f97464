use crate::board::{Board, Column, Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The token was a number. The id may not exist on the board.
    Numeric(TaskId),
    /// The token matched the start of a task's text.
    Prefix(TaskId, Column),
}

impl Resolution {
    pub fn id(self) -> TaskId {
        match self {
            Resolution::Numeric(id) | Resolution::Prefix(id, _) => id,
        }
    }
}

/// Turns a user-supplied identifier into a task id: a base-10 number is taken
/// as is, anything else is matched as a case-sensitive prefix of task text,
/// searching Todo, then Doing, then Done.
pub fn resolve(token: &str, board: &Board) -> Option<Resolution> {
    if let Ok(id) = token.parse::<TaskId>() {
        return Some(Resolution::Numeric(id));
    }
    Column::ALL.into_iter().find_map(|column| {
        match_prefix(token, board.column(column)).map(|id| Resolution::Prefix(id, column))
    })
}

pub fn match_prefix(prefix: &str, tasks: &[Task]) -> Option<TaskId> {
    tasks
        .iter()
        .find(|task| task.text.starts_with(prefix))
        .map(|task| task.id)
}
