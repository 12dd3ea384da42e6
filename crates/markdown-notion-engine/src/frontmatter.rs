//! Front-matter extraction.

/// A document split into title metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub body: String,
}

/// Splits a leading `---` YAML block from the document.
///
/// Absent, unterminated, or malformed front matter yields no title and
/// leaves the source untouched as the body.
pub fn split_front_matter(source: &str) -> FrontMatter {
    let Some(after_open) = source.strip_prefix("---") else {
        return untouched(source);
    };
    let Some(end) = after_open.find("\n---") else {
        return untouched(source);
    };

    let attributes = &after_open[..end];
    let body = after_open[end + 4..].trim_start_matches('\n').to_string();
    let title = serde_yaml::from_str::<serde_yaml::Value>(attributes)
        .ok()
        .and_then(|value| {
            value
                .get("title")
                .and_then(serde_yaml::Value::as_str)
                .map(str::to_string)
        });

    FrontMatter { title, body }
}

fn untouched(source: &str) -> FrontMatter {
    FrontMatter {
        title: None,
        body: source.to_string(),
    }
}
