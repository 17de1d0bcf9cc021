//! Detection of the native date-time picker.

use tracing::debug;

pub const DATETIME_LOCAL: &str = "datetime-local";

/// An input element whose type can be requested and read back. Environments
/// that do not support a type report a different one after assignment.
pub trait InputWidget {
    fn set_input_type(&mut self, input_type: &str);
    fn input_type(&self) -> String;
}

/// Hint shown when the native picker is unavailable.
pub trait FallbackNotice {
    fn reveal(&mut self);
}

/// Assigns `input_type` to `widget` and checks that it sticks.
pub fn supports_input_type(widget: &mut dyn InputWidget, input_type: &str) -> bool {
    widget.set_input_type(input_type);
    widget.input_type() == input_type
}

/// Reveals `notice` when `widget` has no native date-time picker. Returns
/// whether the picker is supported.
pub fn apply_datetime_fallback(
    widget: &mut dyn InputWidget,
    notice: Option<&mut dyn FallbackNotice>,
) -> bool {
    let supported = supports_input_type(widget, DATETIME_LOCAL);
    debug!("Native {} picker supported: {}", DATETIME_LOCAL, supported);

    if let Some(notice) = notice.filter(|_| !supported) {
        notice.reveal();
    }
    supported
}
