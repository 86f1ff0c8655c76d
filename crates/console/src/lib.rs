//! Terminal admin console for the equipment inventory backend.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod logging;
pub mod notify;
pub mod store;
pub mod ui;

pub use app::{App, Command};
pub use error::{AppError, Result};
