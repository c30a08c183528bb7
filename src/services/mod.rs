//! Service layer
//!
//! Business rules on top of the storage layer: input validation, date
//! normalization and the computed month view.

pub mod ledger;

pub use ledger::LedgerService;
