//! Configuration: base directory resolution and persisted user settings

pub mod paths;
pub mod settings;

pub use paths::{AppPaths, DATA_DIR_ENV};
pub use settings::Settings;
