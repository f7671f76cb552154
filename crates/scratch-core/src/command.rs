//! The "new scratch document" command.
//!
//! [`run`] is what a host binds to its command surface. It has two modes:
//!
//! - prompt (`execute = false`): ask for an extension, pre-filled with the
//!   configured one, then create. Cancelling the prompt creates nothing.
//! - immediate (`execute = true`): create with the configured extension.
//!
//! Creation allocates the next scratch name, writes the empty file, and asks
//! the host [`Editor`] to open it.

use std::path::Path;

use crate::allocator::{self, NextName};
use crate::config::{self, Config};
use crate::error::Result;
use crate::settings::{Settings, SettingsSource};

/// Label shown on the extension prompt.
pub const PROMPT_LABEL: &str = "Extension";

/// Capabilities the host editor provides.
pub trait Editor {
    /// Show a modal text prompt. Returns the accepted text, or `None` if the
    /// user dismissed it.
    fn show_input_panel(&mut self, label: &str, initial_text: &str) -> Result<Option<String>>;

    /// Open `path` for editing.
    fn open_file(&mut self, path: &Path) -> Result<()>;
}

/// What a [`run`] ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(NextName),
    Cancelled,
}

/// Run the command.
///
/// `overrides` takes precedence over `settings` for this invocation only.
///
/// # Errors
///
/// Propagates filesystem, configuration, and editor errors unchanged.
pub fn run(
    execute: bool,
    overrides: &Settings,
    settings: &dyn SettingsSource,
    editor: &mut dyn Editor,
) -> Result<Outcome> {
    let config = config::resolve(&overrides.over(settings))?;

    if execute {
        let next = create_scratch_file(&config, &config.extension, editor)?;
        return Ok(Outcome::Created(next));
    }

    match editor.show_input_panel(PROMPT_LABEL, &config.extension)? {
        Some(answer) => {
            let ext = match config::normalize_extension(&answer) {
                "" => config.extension.as_str(),
                ext => ext,
            };
            let next = create_scratch_file(&config, ext, editor)?;
            Ok(Outcome::Created(next))
        }
        None => {
            tracing::debug!("extension prompt cancelled");
            Ok(Outcome::Cancelled)
        }
    }
}

/// Create the next scratch file in `config.save_path` and open it.
///
/// # Errors
///
/// Propagates allocation and editor errors.
pub fn create_scratch_file(
    config: &Config,
    extension: &str,
    editor: &mut dyn Editor,
) -> Result<NextName> {
    let next = allocator::create_next(&config.save_path, extension)?;
    tracing::info!(path = %next.path.display(), "created scratch file");
    editor.open_file(&next.path)?;
    Ok(next)
}
