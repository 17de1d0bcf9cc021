//! Terminal implementations of the UI seams used by the `saju-pm` binary.
//!
//! Rendered replies go to stdout; progress and notices go to stderr.

use crate::{
    controller::SubmitControl,
    probe::{DATETIME_LOCAL, FallbackNotice, InputWidget},
};
use std::io::{self, BufRead, IsTerminal, Write};

/// Progress indicator standing in for a submit button.
pub struct StatusLine {
    label: String,
    disabled: bool,
    quiet: bool,
}

impl StatusLine {
    pub fn new(label: &str, quiet: bool) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
            quiet,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl SubmitControl for StatusLine {
    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
        // only the in-flight label is worth showing
        if self.disabled && !self.quiet {
            eprintln!("{}", label);
        }
    }
}

/// The interactive prompt is the terminal's "native picker": it exists only
/// when stdin is a terminal.
pub struct PromptInput {
    input_type: String,
    interactive: bool,
}

impl PromptInput {
    pub fn detect() -> Self {
        Self::new(io::stdin().is_terminal())
    }

    pub fn new(interactive: bool) -> Self {
        Self {
            input_type: "text".to_string(),
            interactive,
        }
    }
}

impl InputWidget for PromptInput {
    fn set_input_type(&mut self, input_type: &str) {
        if input_type == "text" || (input_type == DATETIME_LOCAL && self.interactive) {
            self.input_type = input_type.to_string();
        }
    }

    fn input_type(&self) -> String {
        self.input_type.clone()
    }
}

pub struct StderrNotice;

impl FallbackNotice for StderrNotice {
    fn reveal(&mut self) {
        eprintln!(
            "대화형 입력을 사용할 수 없습니다. --date YYYY-MM-DD 와 --time HH:MM 옵션으로 입력해 주세요."
        );
    }
}

/// Asks for one line on stderr and reads it from stdin, trimmed.
pub fn prompt(question: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", question)?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
