//! Fixed-depth log of recent match messages shown beside the board.

/// Number of (message, notation) line pairs kept for display.
pub const HISTORY_LEN: usize = 3;

/// One display line pair: a status message and a move in algebraic notation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryEntry {
    pub message: String,
    pub notation: String,
}

/// The three most recent entries, most recent first.
///
/// [`shift`](Self::shift) pushes everything down a slot, dropping the oldest;
/// the head keeps its contents until it is overwritten. This mirrors the
/// display: three message/notation pairs beside the board, newest on top.
#[derive(Clone, Debug, Default)]
pub struct HistoryLog {
    entries: [HistoryEntry; HISTORY_LEN],
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries most recent first.
    pub fn entries(&self) -> &[HistoryEntry; HISTORY_LEN] {
        &self.entries
    }

    pub fn head(&self) -> &HistoryEntry {
        &self.entries[0]
    }

    /// Copy each entry one slot down, dropping the oldest.
    pub fn shift(&mut self) {
        self.entries[2] = self.entries[1].clone();
        self.entries[1] = self.entries[0].clone();
    }

    pub fn set_head_message(&mut self, message: impl Into<String>) {
        self.entries[0].message = message.into();
    }

    pub fn set_head_notation(&mut self, notation: impl Into<String>) {
        self.entries[0].notation = notation.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(log: &mut HistoryLog, message: &str, notation: &str) {
        log.shift();
        log.set_head_message(message);
        log.set_head_notation(notation);
    }

    #[test]
    fn holds_exactly_three_entries() {
        let mut log = HistoryLog::new();
        for i in 1..=5 {
            record(&mut log, &format!("move {i}"), &format!("m{i}"));
        }

        let entries = log.entries();
        assert_eq!(entries.len(), HISTORY_LEN);
        assert_eq!(entries[0].message, "move 5");
        assert_eq!(entries[1].message, "move 4");
        assert_eq!(entries[2].message, "move 3");
    }

    #[test]
    fn shift_keeps_head_until_overwritten() {
        let mut log = HistoryLog::new();
        log.set_head_message("white to move");
        log.shift();
        assert_eq!(log.head().message, "white to move");
        assert_eq!(log.entries()[1].message, "white to move");
    }

    #[test]
    fn notation_travels_with_its_message() {
        let mut log = HistoryLog::new();
        record(&mut log, "white played", "e4");
        record(&mut log, "black played", "e5");

        assert_eq!(log.entries()[0].notation, "e5");
        assert_eq!(log.entries()[1].notation, "e4");
        assert_eq!(log.entries()[2], HistoryEntry::default());
    }
}
