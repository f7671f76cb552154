//! # scratch-core
//!
//! Numbered scratch files for quick, unfiled notes.
//!
//! Scratch files live in a single directory and are named `0.md`, `1.md`,
//! `2.md`, ... Each new file takes the next integer after the largest one
//! already present. This crate holds everything but the host binding:
//! - [`Settings`] and [`SettingsSource`] - raw `save_path` / `extension` values
//! - [`Config`] - resolved configuration ([`config::resolve`])
//! - [`allocator`] - directory scan, next-name computation, file creation
//! - [`command::run`] - the prompt / immediate command flow over an [`Editor`]
//! - Error hierarchy ([`ScratchError`])

pub mod allocator;
pub mod command;
pub mod config;
pub mod error;
pub mod settings;

pub use allocator::NextName;
pub use command::{run, Editor, Outcome, PROMPT_LABEL};
pub use config::Config;
pub use error::{FsOp, Result, ScratchError};
pub use settings::{Settings, SettingsSource};
