//! Terminal stand-in for the host editor.
//!
//! The prompt is a single line on stderr read back from stdin. Files are
//! opened with `$VISUAL`, falling back to `$EDITOR`. The variable is split on
//! whitespace with no shell quoting, so an editor path containing spaces is
//! not supported; point the variable at a wrapper script instead.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::Command;

use scratch_core::{Editor, Result, ScratchError};

pub struct TerminalEditor {
    open: bool,
}

impl TerminalEditor {
    /// `open = false` skips launching an editor; the caller still reports the path.
    pub fn new(open: bool) -> Self {
        Self { open }
    }
}

impl Editor for TerminalEditor {
    fn show_input_panel(&mut self, label: &str, initial_text: &str) -> Result<Option<String>> {
        let mut stderr = std::io::stderr().lock();
        write!(stderr, "{label} [{initial_text}]: ")
            .and_then(|()| stderr.flush())
            .map_err(|e| ScratchError::Editor(format!("cannot show prompt: {e}")))?;

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            // End of input dismisses the prompt.
            Ok(0) => Ok(None),
            // An empty answer is passed through; the command falls back to the default.
            Ok(_) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(e) => Err(ScratchError::Editor(format!("cannot read answer: {e}"))),
        }
    }

    fn open_file(&mut self, path: &Path) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        let Some(editor) = editor_command() else {
            tracing::debug!("neither VISUAL nor EDITOR is set, not opening");
            return Ok(());
        };

        let mut words = editor.split_whitespace();
        let Some(program) = words.next() else {
            return Ok(());
        };
        tracing::debug!(editor = %editor, path = %path.display(), "opening scratch file");

        let status = Command::new(program)
            .args(words)
            .arg(path)
            .status()
            .map_err(|e| ScratchError::Editor(format!("cannot start {program}: {e}")))?;
        if !status.success() {
            return Err(ScratchError::Editor(format!("{program} exited with {status}")));
        }
        Ok(())
    }
}

fn editor_command() -> Option<String> {
    ["VISUAL", "EDITOR"]
        .into_iter()
        .filter_map(std::env::var_os)
        .map(OsString::into_string)
        .filter_map(std::result::Result::ok)
        .find(|v| !v.trim().is_empty())
}
