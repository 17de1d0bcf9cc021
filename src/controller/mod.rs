//! User-action handlers.
//!
//! Each controller owns the UI elements it touches (an output pane and a
//! submit control) and an [`ApiClient`](crate::api::ApiClient), so it can be
//! driven from the terminal or from tests without any global state.

mod analysis;
mod chat;

pub use analysis::*;
pub use chat::*;

pub const MSG_DATE_REQUIRED: &str = "생년월일을 입력해 주세요 (YYYY-MM-DD).";
pub const MSG_INVALID_DATE: &str = "날짜 형식을 확인해 주세요.";
pub const MSG_LOCATION_REQUIRED: &str = "출생지를 입력해 주세요.";
pub const MSG_MESSAGE_REQUIRED: &str = "메시지를 입력해 주세요.";
pub const MSG_EMPTY_REPLY: &str = "응답이 비어 있습니다.";
pub const MSG_REQUEST_FAILED: &str = "요청 처리에 실패했습니다";

/// Where rendered text goes. Text is shown verbatim, line breaks included.
pub trait OutputPane: Send {
    fn set_text(&mut self, text: &str);
}

/// A submit button: disabled while its request is in flight.
pub trait SubmitControl: Send {
    fn set_disabled(&mut self, disabled: bool);
    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);
}

/// How a single submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input was rejected before any request was sent.
    Invalid,
    /// The request failed; the error was rendered.
    Failed,
    /// The backend answered with an empty reply.
    Empty,
    Rendered,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Rendered)
    }
}

/// Swaps a control's label for a loading label and restores it afterwards.
///
/// The original label is captured on the first `start` and reused for every
/// later `finish`.
#[derive(Debug, Default)]
pub struct LoadingState {
    default_label: Option<String>,
}

impl LoadingState {
    pub fn start(&mut self, control: &mut dyn SubmitControl, loading_label: &str) {
        control.set_disabled(true);
        if self.default_label.is_none() {
            self.default_label = Some(control.label());
        }
        control.set_label(loading_label);
    }

    pub fn finish(&mut self, control: &mut dyn SubmitControl) {
        control.set_disabled(false);
        if let Some(label) = &self.default_label {
            control.set_label(label);
        }
    }
}

/// Output pane that keeps every text it was given; the last one is current.
#[derive(Debug, Default, Clone)]
pub struct TextBuffer {
    history: Vec<String>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("")
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl OutputPane for TextBuffer {
    fn set_text(&mut self, text: &str) {
        self.history.push(text.to_string());
    }
}

pub(crate) fn failure_message(error: &crate::Error) -> String {
    format!("{}: {}", MSG_REQUEST_FAILED, error)
}
