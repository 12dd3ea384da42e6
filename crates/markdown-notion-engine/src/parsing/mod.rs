//! Markdown-to-block conversion.
//!
//! The pipeline is line-oriented: fenced code and display math are first
//! swapped out for sentinel tokens so their contents can't be misread as
//! block syntax, then a per-line state machine assembles the block tree,
//! calling into the inline formatter and table transformer as it goes.
//! The whole pass is pure and call-scoped; nothing survives between
//! conversions.

mod inline;
mod nesting;
mod placeholder;
mod segment;
mod table;

pub use inline::format_inline;

use thiserror::Error;

use crate::models::Block;

/// Upper bound the remote service accepts for one text span's content.
pub const CONTENT_MAX_LENGTH: usize = 2000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("line {line}: cannot nest list item, previous sibling is not a list item")]
    InvalidListNesting { line: usize },
}

/// Replaces content the remote service would reject outright. Replacement
/// is all-or-nothing, never a partial truncation.
pub(crate) fn limit_content(content: &str) -> String {
    if content.chars().count() > CONTENT_MAX_LENGTH {
        format!(
            "This content is too long to be displayed in Notion. There is a {CONTENT_MAX_LENGTH} character limit currently."
        )
    } else {
        content.to_string()
    }
}

/// Converts a markdown-subset string into an ordered block sequence.
///
/// The input is not required to satisfy any general markdown grammar;
/// ill-formed inline markers degrade to literal text. The only fatal
/// condition is a list nesting the engine cannot attach to a valid parent.
pub fn markdown_to_blocks(source: &str) -> Result<Vec<Block>, ConvertError> {
    let extraction = placeholder::extract(source.trim());
    let mut segmenter = segment::Segmenter::new(extraction.tables);
    for line in extraction.text.split('\n') {
        segmenter.push_line(line)?;
    }
    Ok(segmenter.finish())
}
