//! Line-by-line block segmentation.
//!
//! Classification precedence, first match wins: table accumulation,
//! ordered list item, unordered list item, indented-code continuation,
//! heading, horizontal rule, blockquote, code sentinel, math sentinel,
//! image, non-blank paragraph. Blank lines are a no-op apart from closing
//! an open indented-code accumulation.

use std::sync::OnceLock;

use regex::Regex;

use super::inline::format_inline;
use super::nesting::ListStack;
use super::placeholder::{CODE_SENTINEL, DEFAULT_LANGUAGE, MATH_SENTINEL, SideTables};
use super::{ConvertError, limit_content, table};
use crate::models::Block;

// Row detection is a heuristic: any line with a pipe-delimited non-dash
// cell counts, so a paragraph containing literal pipes will be captured as
// a table row. Inherited ambiguity, kept as-is.
fn table_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\|\s*[^-|]+\s*\|").expect("invalid table row regex"))
}

fn table_delimiter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\|\s*-+\s*\|\s*-+\s*\|").expect("invalid table delimiter regex")
    })
}

fn ordered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^( *)(\d+)\. ").expect("invalid ordered list regex"))
}

fn unordered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^( *)- ").expect("invalid unordered list regex"))
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#+) ").expect("invalid heading regex"))
}

fn horizontal_rule_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-{3,}$").expect("invalid horizontal rule regex"))
}

fn blockquote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^> (.+)$").expect("invalid blockquote regex"))
}

fn image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("invalid image regex"))
}

/// The per-line state machine assembling the block tree.
pub(crate) struct Segmenter {
    blocks: Vec<Block>,
    sentinels: SideTables,
    table_buffer: Vec<String>,
    in_table: bool,
    code_lines: Vec<String>,
    list_stack: ListStack,
    line_no: usize,
}

impl Segmenter {
    pub(crate) fn new(sentinels: SideTables) -> Self {
        Self {
            blocks: Vec::new(),
            sentinels,
            table_buffer: Vec::new(),
            in_table: false,
            code_lines: Vec::new(),
            list_stack: ListStack::default(),
            line_no: 0,
        }
    }

    pub(crate) fn push_line(&mut self, line: &str) -> Result<(), ConvertError> {
        self.line_no += 1;

        if table_row_re().is_match(line) || table_delimiter_re().is_match(line) {
            self.table_buffer.push(line.to_string());
            self.in_table = true;
            return Ok(());
        }
        if self.in_table {
            // The line that ends the accumulation is consumed by the close.
            self.flush_table();
            return Ok(());
        }

        if let Some(caps) = ordered_item_re().captures(line) {
            let indent = caps[1].len();
            let rest = &line[caps.get(0).expect("group 0 always present").end()..];
            let item = Block::NumberedListItem {
                rich_text: format_inline(rest),
                children: None,
            };
            return self
                .list_stack
                .insert(&mut self.blocks, item, indent, self.line_no);
        }
        if let Some(caps) = unordered_item_re().captures(line) {
            let indent = caps[1].len();
            let rest = &line[caps.get(0).expect("group 0 always present").end()..];
            let item = Block::BulletedListItem {
                rich_text: format_inline(rest),
                children: None,
            };
            return self
                .list_stack
                .insert(&mut self.blocks, item, indent, self.line_no);
        }

        if let Some(rest) = line.strip_prefix("    ") {
            self.code_lines.push(rest.to_string());
            return Ok(());
        }
        self.flush_indented_code();

        if let Some(caps) = heading_re().captures(line) {
            let level = caps[1].len();
            let rest = &line[caps.get(0).expect("group 0 always present").end()..];
            match level {
                1 => self.blocks.push(Block::Heading1 {
                    rich_text: format_inline(rest),
                }),
                2 => self.blocks.push(Block::Heading2 {
                    rich_text: format_inline(rest),
                }),
                3 => self.blocks.push(Block::Heading3 {
                    rich_text: format_inline(rest),
                }),
                // Deeper heading levels have no remote counterpart and
                // produce no block.
                _ => {}
            }
            return Ok(());
        }

        if horizontal_rule_re().is_match(line) {
            self.blocks.push(Block::Divider);
            return Ok(());
        }

        if let Some(caps) = blockquote_re().captures(line) {
            self.blocks.push(Block::Quote {
                rich_text: format_inline(&caps[1]),
            });
            return Ok(());
        }

        // Sentinel-shaped text whose id doesn't resolve falls through to
        // the paragraph rule instead of failing the conversion.
        if let Some(id) = parse_sentinel(line, CODE_SENTINEL) {
            if let Some((language, content)) = self.sentinels.take_code(id) {
                self.blocks.push(Block::Code {
                    language,
                    content: limit_content(&content),
                });
                return Ok(());
            }
        }
        if let Some(id) = parse_sentinel(line, MATH_SENTINEL) {
            if let Some(expression) = self.sentinels.take_math(id) {
                self.blocks.push(Block::Equation { expression });
                return Ok(());
            }
        }

        if let Some(caps) = image_re().captures(line) {
            let alt = &caps[1];
            self.blocks.push(Block::Image {
                url: caps[2].to_string(),
                caption: (!alt.is_empty()).then(|| alt.to_string()),
            });
            return Ok(());
        }

        if !line.trim().is_empty() {
            self.blocks.push(Block::Paragraph {
                rich_text: format_inline(line),
            });
        }
        Ok(())
    }

    /// Flushes any still-open accumulation and returns the block tree.
    pub(crate) fn finish(mut self) -> Vec<Block> {
        if self.in_table {
            self.flush_table();
        }
        self.flush_indented_code();
        self.blocks
    }

    fn flush_table(&mut self) {
        let buffer = std::mem::take(&mut self.table_buffer);
        self.in_table = false;
        self.blocks.push(Block::Equation {
            expression: table::table_to_expression(&buffer),
        });
    }

    fn flush_indented_code(&mut self) {
        if self.code_lines.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.code_lines).join("\n");
        self.blocks.push(Block::Code {
            language: DEFAULT_LANGUAGE.to_string(),
            content: limit_content(&content),
        });
    }
}

fn parse_sentinel(line: &str, prefix: &str) -> Option<usize> {
    line.strip_prefix(prefix)?.parse().ok()
}
