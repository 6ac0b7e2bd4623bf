pub mod config;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod format;
pub mod logging;
pub mod metric;
pub mod system;
pub mod ticker;
pub mod ui;
