//! Text rendering of a godo board as three word-wrapped columns.

pub mod wrap;

use std::slice;

use godo_core::board::{Board, Column, Task, TaskId};

use crate::wrap::WrapBuffer;

/// Indent for continuation lines and for columns with nothing left to show.
const NEUTRAL_PREFIX: &str = "   ";
/// Space kept free at the end of every column's text.
const GUTTER: usize = 2;

/// One column's walk through its tasks: the current task's remaining text and
/// whether its id still has to be printed.
struct ColumnCursor<'a> {
    tasks: slice::Iter<'a, Task>,
    buffer: WrapBuffer,
    pending_id: Option<TaskId>,
}

impl<'a> ColumnCursor<'a> {
    fn new(tasks: &'a [Task]) -> Self {
        Self {
            tasks: tasks.iter(),
            buffer: WrapBuffer::default(),
            pending_id: None,
        }
    }

    fn has_line(&self) -> bool {
        self.pending_id.is_some() || self.buffer.has_next()
    }

    fn is_finished(&self) -> bool {
        self.tasks.len() == 0 && !self.has_line()
    }

    /// Text for this column on the next row, without padding.
    fn next_cell(&mut self, column_width: usize) -> String {
        if !self.has_line() {
            if let Some(task) = self.tasks.next() {
                self.buffer = WrapBuffer::new(&task.text);
                self.pending_id = Some(task.id);
            }
        }

        let prefix = match self.pending_id.take() {
            Some(id) => format!("{id}. "),
            None => NEUTRAL_PREFIX.to_string(),
        };
        let limit = column_width.saturating_sub(prefix.chars().count() + GUTTER);
        let line = if self.buffer.has_next() {
            self.buffer.next_line(limit)
        } else {
            String::new()
        };
        format!("{prefix}{line}")
    }
}

fn divider_line(width: usize) -> String {
    "_".repeat(width)
}

fn push_row(out: &mut String, cells: &[String], column_width: usize) {
    let mut row = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        if idx + 1 < cells.len() {
            row.push_str(&format!("{cell:<column_width$}"));
        } else {
            row.push_str(cell);
        }
    }
    out.push_str(row.trim_end());
    out.push('\n');
}

/// Renders `board` at `total_width` characters: a header row, a divider, a
/// blank line, then one row at a time until every column has printed all of
/// its tasks. Columns advance independently; a long task in one column does
/// not hold back the others.
pub fn render(board: &Board, total_width: usize) -> String {
    let column_width = total_width / 3;
    let mut out = String::new();

    let titles: Vec<String> = Column::ALL
        .iter()
        .map(|column| column.title().to_string())
        .collect();
    push_row(&mut out, &titles, column_width);
    out.push_str(&divider_line(total_width));
    out.push_str("\n\n");

    let mut cursors: Vec<ColumnCursor<'_>> = Column::ALL
        .iter()
        .map(|column| ColumnCursor::new(board.column(*column)))
        .collect();

    while cursors.iter().any(|cursor| !cursor.is_finished()) {
        let cells: Vec<String> = cursors
            .iter_mut()
            .map(|cursor| cursor.next_cell(column_width))
            .collect();
        push_row(&mut out, &cells, column_width);
    }
    out
}
