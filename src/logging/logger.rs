//! Append-only application logger
//!
//! Each entry is one JSON line, flushed as soon as it is written. The logger is
//! created by the caller and handed to whatever needs it; `close` flushes and
//! syncs the file on shutdown.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};

use super::entry::{Level, LogEntry};

enum Sink {
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
    Memory(Vec<LogEntry>),
    Disabled,
}

struct State {
    sink: Sink,
    /// Set after the first failed write so stderr is not flooded
    write_failed: bool,
}

/// Injected logger shared by reference between components
pub struct Logger {
    state: Mutex<State>,
}

impl Logger {
    /// Open (or create) a log file for appending
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LedgerError::Io(format!("Failed to create log directory: {}", e))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LedgerError::Io(format!("Failed to open log file: {}", e)))?;

        Ok(Self::with_sink(Sink::File {
            path,
            writer: BufWriter::new(file),
        }))
    }

    /// Keep entries in memory; see [`Logger::entries`]
    pub fn in_memory() -> Self {
        Self::with_sink(Sink::Memory(Vec::new()))
    }

    /// Drop every entry
    pub fn disabled() -> Self {
        Self::with_sink(Sink::Disabled)
    }

    fn with_sink(sink: Sink) -> Self {
        Self {
            state: Mutex::new(State {
                sink,
                write_failed: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // a panic mid-write leaves nothing worth discarding
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record an entry. Failures are reported on stderr once and otherwise ignored.
    pub fn log(&self, entry: LogEntry) {
        let mut state = self.lock();
        let result = match &mut state.sink {
            Sink::File { writer, .. } => write_line(writer, &entry),
            Sink::Memory(entries) => {
                entries.push(entry);
                Ok(())
            }
            Sink::Disabled => Ok(()),
        };

        if let Err(err) = result {
            if !state.write_failed {
                state.write_failed = true;
                eprintln!("warning: could not write to log: {}", err);
            }
        }
    }

    pub fn info(&self, source: &str, message: impl Into<String>) {
        self.log(LogEntry::new(Level::Info, source, message));
    }

    pub fn warn(&self, source: &str, message: impl Into<String>) {
        self.log(LogEntry::new(Level::Warn, source, message));
    }

    pub fn error(&self, source: &str, message: impl Into<String>) {
        self.log(LogEntry::new(Level::Error, source, message));
    }

    /// Info entry carrying a structured payload
    pub fn info_with<T: Serialize>(&self, source: &str, message: impl Into<String>, details: &T) {
        self.log(LogEntry::new(Level::Info, source, message).with_details(details));
    }

    /// Flush buffered lines to the file
    pub fn flush(&self) -> LedgerResult<()> {
        let mut state = self.lock();
        if let Sink::File { writer, .. } = &mut state.sink {
            writer
                .flush()
                .map_err(|e| LedgerError::Io(format!("Failed to flush log: {}", e)))?;
        }
        Ok(())
    }

    /// Flush and sync the log file, ending the logger's lifetime
    pub fn close(self) -> LedgerResult<()> {
        let mut state = self.lock();
        if let Sink::File { writer, .. } = &mut state.sink {
            writer
                .flush()
                .map_err(|e| LedgerError::Io(format!("Failed to flush log: {}", e)))?;
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| LedgerError::Io(format!("Failed to sync log: {}", e)))?;
        }
        Ok(())
    }

    /// Entries held by an in-memory logger; empty for other sinks
    pub fn entries(&self) -> Vec<LogEntry> {
        match &self.lock().sink {
            Sink::Memory(entries) => entries.clone(),
            _ => Vec::new(),
        }
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<PathBuf> {
        match &self.lock().sink {
            Sink::File { path, .. } => Some(path.clone()),
            _ => None,
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Sink::File { writer, .. } = &mut state.sink {
            let _ = writer.flush();
        }
    }
}

fn write_line(writer: &mut BufWriter<File>, entry: &LogEntry) -> LedgerResult<()> {
    let json = serde_json::to_string(entry)
        .map_err(|e| LedgerError::Json(format!("Failed to serialize log entry: {}", e)))?;

    writeln!(writer, "{}", json)
        .map_err(|e| LedgerError::Io(format!("Failed to write log entry: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to flush log: {}", e)))?;

    Ok(())
}

/// Read every entry from a log file, oldest first
pub fn read_all(path: impl AsRef<Path>) -> LedgerResult<Vec<LogEntry>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file =
        File::open(path).map_err(|e| LedgerError::Io(format!("Failed to open log file: {}", e)))?;

    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            LedgerError::Io(format!("Failed to read log line {}: {}", line_num + 1, e))
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
            LedgerError::Json(format!(
                "Failed to parse log entry at line {}: {}",
                line_num + 1,
                e
            ))
        })?;

        entries.push(entry);
    }

    Ok(entries)
}

/// Read the most recent `count` entries
pub fn read_recent(path: impl AsRef<Path>, count: usize) -> LedgerResult<Vec<LogEntry>> {
    let all_entries = read_all(path)?;
    let start = all_entries.len().saturating_sub(count);
    Ok(all_entries[start..].to_vec())
}
