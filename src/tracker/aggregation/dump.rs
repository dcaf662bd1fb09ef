use std::fmt::Display;

use crate::tracker::model::entities::LogEntry;

/// Copy of the log taken at one moment. Iterating it doesn't consume it, so it can be walked as
/// many times as needed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogDump {
    entries: Vec<LogEntry>,
}

impl LogDump {
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    /// Formatted entries in append order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(LogEntry::dump_line)
    }

    /// One json object per line.
    pub fn to_json_lines(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            out += &serde_json::to_string(entry)?;
            out.push('\n');
        }
        Ok(out)
    }
}

impl<'a> IntoIterator for &'a LogDump {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Display for LogDump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
