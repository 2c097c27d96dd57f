//! Markdown line model
//!
//! Block classification works one line at a time with an explicit fence
//! state; inline parsing never looks past the current line.

mod classify;
mod inline;

pub use classify::{classify, ClassifiedLine, Classifier, ParserState, FENCE};
pub use inline::{inline, InlineSpan};
