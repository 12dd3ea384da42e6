//! Inline formatting passes.
//!
//! A line is scanned by a fixed-precedence sequence of pattern/constructor
//! pairs: combined bold+italic, bold, italic, inline math, strikethrough,
//! inline code, links. Each pass re-scans only the raw fragments earlier
//! passes left unresolved; running a lower-precedence pattern first would
//! let it consume delimiter characters belonging to a higher one (`*` out
//! of `**`, `_` out of `__`). Markers without a well-formed closing pair
//! simply never match and stay literal text.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::limit_content;
use crate::models::{Annotations, RichText};

/// A fragment of the line: still-scannable raw text, or a span resolved by
/// an earlier pass.
enum Piece {
    Raw(String),
    Span(RichText),
}

type Constructor = fn(&Captures) -> RichText;

fn passes() -> &'static [(Regex, Constructor)] {
    static PASSES: OnceLock<Vec<(Regex, Constructor)>> = OnceLock::new();
    PASSES.get_or_init(|| {
        let compile = |pattern: &str| Regex::new(pattern).expect("invalid inline pattern");
        vec![
            (compile(r"(__\*(.+?)\*__)|(\*\*_(.+?)_\*\*)"), bold_italic as Constructor),
            (compile(r"(\*\*(.+?)\*\*)|(__(.+?)__)"), bold),
            (compile(r"(\*(.+?)\*)|(_(.+?)_)"), italic),
            (compile(r"\$(.+?)\$"), math),
            (compile(r"~(.+?)~"), strikethrough),
            (compile(r"`(.+?)`"), code),
            (compile(r"\[(.+?)\]\((.+?)\)"), link),
        ]
    })
}

// The double-delimiter patterns pair `**…**` with `__…__` (and their
// bold+italic combinations), so the content sits in group 2 or group 4.
fn alternated<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(2)
        .or_else(|| caps.get(4))
        .map_or("", |group| group.as_str())
}

fn bold_italic(caps: &Captures) -> RichText {
    RichText::styled(limit_content(alternated(caps)), Annotations::bold_italic())
}

fn bold(caps: &Captures) -> RichText {
    RichText::styled(limit_content(alternated(caps)), Annotations::bold())
}

fn italic(caps: &Captures) -> RichText {
    RichText::styled(limit_content(alternated(caps)), Annotations::italic())
}

fn math(caps: &Captures) -> RichText {
    RichText::equation(&caps[1])
}

fn strikethrough(caps: &Captures) -> RichText {
    RichText::styled(limit_content(&caps[1]), Annotations::strikethrough())
}

fn code(caps: &Captures) -> RichText {
    RichText::styled(limit_content(&caps[1]), Annotations::code())
}

fn link(caps: &Captures) -> RichText {
    RichText::link(limit_content(&caps[1]), &caps[2])
}

/// Formats one line of text, already stripped of block-level prefixes, into
/// an ordered span sequence. Residual unmatched text becomes plain spans;
/// zero-length fragments are dropped.
pub fn format_inline(text: &str) -> Vec<RichText> {
    let mut pieces = vec![Piece::Raw(text.to_string())];
    for (pattern, construct) in passes() {
        pieces = apply_pass(pieces, pattern, *construct);
    }

    pieces
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Raw(raw) if raw.is_empty() => None,
            Piece::Raw(raw) => Some(RichText::plain(limit_content(&raw))),
            Piece::Span(span) => Some(span),
        })
        .collect()
}

/// Runs one pattern over every raw fragment, splitting matches out into
/// resolved spans. Already-resolved spans pass through untouched.
fn apply_pass(pieces: Vec<Piece>, pattern: &Regex, construct: Constructor) -> Vec<Piece> {
    let mut out = Vec::with_capacity(pieces.len());
    for piece in pieces {
        let raw = match piece {
            Piece::Span(_) => {
                out.push(piece);
                continue;
            }
            Piece::Raw(raw) => raw,
        };

        let mut prev_end = 0;
        for caps in pattern.captures_iter(&raw) {
            let matched = caps.get(0).expect("group 0 always present");
            if matched.start() > prev_end {
                out.push(Piece::Raw(raw[prev_end..matched.start()].to_string()));
            }
            out.push(Piece::Span(construct(&caps)));
            prev_end = matched.end();
        }
        out.push(Piece::Raw(raw[prev_end..].to_string()));
    }
    out
}
