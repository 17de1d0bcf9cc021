mod markdown;
mod sections;

pub use markdown::strip_markdown;
pub use sections::*;

/// Markdown stripping followed by section reordering, as shown to the user.
pub fn format_reply(raw: &str) -> String {
    reorder_reply(&strip_markdown(raw))
}
