//! NailFeed Replay - drive a feed reconciler from a recorded event script.
//!
//! Scripts capture what the web app reported to its feed (placeholders,
//! confirmations, failures, refreshes) so a session can be reproduced and
//! the resulting feed inspected outside the browser.

pub mod config;
pub mod error;
pub mod runner;
pub mod script;

pub use config::{Config, ConfigError, OutputFormat};
pub use error::{ReplayError, Result};
pub use runner::{render, replay, run, ReplayReport, StepReport};
pub use script::{load_script, load_seed, parse_script, ScriptEvent};
