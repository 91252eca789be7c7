//! Syntax highlighting module.
//!
//! Turns committed file content into HTML markup for the read-only code view.

mod highlighter;
mod language;
mod theme;

pub use highlighter::{escape_html, highlight, HighlightCache};
pub use language::Language;
pub use theme::{Color, Theme, TokenStyle};
