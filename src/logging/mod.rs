//! Application logging
//!
//! A [`Logger`] is opened at startup, passed by reference to the components
//! that report problems (mainly the ledger service, which logs degraded reads)
//! and closed on shutdown. Entries are JSON lines:
//!
//! ```text
//! {"timestamp":"2024-03-05T10:12:00Z","level":"error","source":"ledger","message":"..."}
//! ```

mod entry;
mod logger;

pub use entry::{Level, LogEntry};
pub use logger::{read_all, read_recent, Logger};
