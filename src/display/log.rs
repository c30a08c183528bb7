//! Log entry formatting

use crate::logging::LogEntry;

/// One line per entry, oldest first
pub fn format_log_entries(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return "No log entries.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.to_string());
        output.push('\n');
    }
    output
}
