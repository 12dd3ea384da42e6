//! Sentinel substitution for fenced code and display math.
//!
//! Runs on the raw input before any line splitting, so pipes, list markers,
//! or heading markers inside a fenced region are never misread as block
//! syntax. Each region is replaced by a sentinel token the segmenter
//! resolves back through the side tables.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

pub(crate) const CODE_SENTINEL: &str = "CODE_BLOCK_";
pub(crate) const MATH_SENTINEL: &str = "LATEX_BLOCK_";

/// Language tag applied when a fence carries none.
pub(crate) const DEFAULT_LANGUAGE: &str = "plain text";

fn code_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(\w+)?\n(.+?)```").expect("invalid code fence regex"))
}

fn display_math_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\$\$(.+?)\$\$").expect("invalid display math regex"))
}

/// Call-scoped side tables mapping sentinel ids back to their captured
/// regions. Ids are dense, 0-based, and strictly increasing per kind within
/// one extraction pass. Entries are removed as they resolve.
#[derive(Debug, Default)]
pub(crate) struct SideTables {
    code: HashMap<usize, (String, String)>,
    math: HashMap<usize, String>,
}

impl SideTables {
    /// Removes and returns the (language, content) pair for a code id.
    pub(crate) fn take_code(&mut self, id: usize) -> Option<(String, String)> {
        self.code.remove(&id)
    }

    /// Removes and returns the expression for a math id.
    pub(crate) fn take_math(&mut self, id: usize) -> Option<String> {
        self.math.remove(&id)
    }
}

pub(crate) struct Extraction {
    pub(crate) text: String,
    pub(crate) tables: SideTables,
}

/// Swaps fenced code and `$$` display math for sentinel tokens.
pub(crate) fn extract(source: &str) -> Extraction {
    let mut tables = SideTables::default();

    let text = code_fence_re()
        .replace_all(source, |caps: &Captures| {
            let id = tables.code.len();
            let language = caps
                .get(1)
                .map_or(DEFAULT_LANGUAGE, |tag| tag.as_str())
                .to_string();
            let content = caps[2].trim().to_string();
            tables.code.insert(id, (language, content));
            format!("{CODE_SENTINEL}{id}")
        })
        .into_owned();

    let text = display_math_re()
        .replace_all(&text, |caps: &Captures| {
            let id = tables.math.len();
            tables.math.insert(id, caps[1].trim().to_string());
            format!("{MATH_SENTINEL}{id}")
        })
        .into_owned();

    Extraction { text, tables }
}
