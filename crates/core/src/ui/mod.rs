//! Desktop front end.
//!
//! The window is split into focused submodules:
//! - [`state`]: events sent from the background worker to the UI thread
//! - [`results`]: painting of the results panel and its copy buttons
//! - [`app`]: the form, the submit lifecycle, and window setup
//!
//! # Usage
//!
//! ```ignore
//! use viraltube_core::{Config, ui};
//!
//! let config = Config::load()?;
//! ui::run_analyzer_ui(config)?;
//! ```

mod app;
mod results;
mod state;

pub use app::ViralTubeApp;

use crate::config::Config;
use crate::error::Result;

/// Opens the analyzer window and returns once the user closes it.
///
/// # Errors
///
/// Returns [`crate::AppError::Ui`] if the native window cannot be created.
pub fn run_analyzer_ui(config: Config) -> Result<()> {
    app::run(config)
}
