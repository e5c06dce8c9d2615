/// Submitted command lines plus the arrow-key recall cursor.
///
/// The cursor sits in `[0, len]`; `len` means "nothing selected".
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: usize,
}

/// What the input buffer should do after a recall step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'a> {
    Entry(&'a str),
    Cleared,
    Unchanged,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, line: &str) {
        self.entries.push(line.to_string());
        self.cursor = self.entries.len();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Arrow up. Sticks at the oldest entry.
    pub fn previous(&mut self) -> Recall<'_> {
        if self.entries.is_empty() {
            return Recall::Unchanged;
        }
        self.cursor = self.cursor.saturating_sub(1);
        Recall::Entry(&self.entries[self.cursor])
    }

    /// Arrow down. Walking past the newest entry clears the input.
    pub fn next(&mut self) -> Recall<'_> {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            Recall::Entry(&self.entries[self.cursor])
        } else {
            self.cursor = self.entries.len();
            Recall::Cleared
        }
    }
}
