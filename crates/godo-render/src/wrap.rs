/// Unconsumed text of one task, handed out a line at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapBuffer {
    remaining: String,
}

impl WrapBuffer {
    /// Control characters such as `\n` or `\t` become plain spaces so every
    /// line occupies exactly one row of its column.
    pub fn new(text: &str) -> Self {
        let flat: String = text
            .chars()
            .map(|ch| if ch.is_control() { ' ' } else { ch })
            .collect();
        Self {
            remaining: flat.trim_start_matches(' ').to_string(),
        }
    }

    pub fn has_next(&self) -> bool {
        !self.remaining.is_empty()
    }

    /// Takes the longest run of whole words that fits in `limit` characters.
    /// The space a line breaks on is dropped. A word longer than `limit` is
    /// returned whole on its own line; words are never split.
    pub fn next_line(&mut self, limit: usize) -> String {
        let rest = self.remaining.as_str();
        if rest.chars().count() <= limit {
            let line = rest.trim_matches(' ').to_string();
            self.remaining.clear();
            return line;
        }

        // A break may sit right after a word that exactly fills the line, so
        // look at one character past the limit.
        let window_end = rest
            .char_indices()
            .nth(limit + 1)
            .map_or(rest.len(), |(idx, _)| idx);
        let cut = rest[..window_end]
            .rfind(' ')
            .filter(|idx| *idx > 0)
            .or_else(|| rest.find(' '));

        let (line, tail) = match cut {
            Some(idx) => (&rest[..idx], &rest[idx + 1..]),
            None => (rest, ""),
        };
        let line = line.trim_matches(' ').to_string();
        self.remaining = tail.trim_start_matches(' ').to_string();
        line
    }
}
