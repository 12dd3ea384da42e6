use serde::ser::{Serialize, SerializeMap, Serializer};

/// Style flags attached to a text span.
///
/// The flags are independent booleans and any combination is representable,
/// though the conversion engine itself only ever produces bold, italic,
/// bold+italic, code, or strikethrough in isolation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}

impl Annotations {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    pub fn bold_italic() -> Self {
        Self {
            bold: true,
            italic: true,
            ..Self::default()
        }
    }

    pub fn strikethrough() -> Self {
        Self {
            strikethrough: true,
            ..Self::default()
        }
    }

    pub fn code() -> Self {
        Self {
            code: true,
            ..Self::default()
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// One inline unit within a block's text content: styled text or an
/// equation. Equation spans carry no annotations.
#[derive(Debug, Clone, PartialEq)]
pub enum RichText {
    Text {
        content: String,
        link: Option<String>,
        annotations: Annotations,
    },
    Equation {
        expression: String,
    },
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            link: None,
            annotations: Annotations::default(),
        }
    }

    pub fn styled(content: impl Into<String>, annotations: Annotations) -> Self {
        Self::Text {
            content: content.into(),
            link: None,
            annotations,
        }
    }

    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            link: Some(url.into()),
            annotations: Annotations::default(),
        }
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Self::Equation {
            expression: expression.into(),
        }
    }

    /// The span's text content, or the expression for equation spans.
    pub fn plain_text(&self) -> &str {
        match self {
            Self::Text { content, .. } => content,
            Self::Equation { expression } => expression,
        }
    }
}

#[derive(serde::Serialize)]
struct LinkBody<'a> {
    url: &'a str,
}

#[derive(serde::Serialize)]
struct BareTextBody<'a> {
    content: &'a str,
}

#[derive(serde::Serialize)]
struct TextBody<'a> {
    content: &'a str,
    link: Option<LinkBody<'a>>,
}

#[derive(serde::Serialize)]
pub(crate) struct ExpressionBody<'a> {
    pub(crate) expression: &'a str,
}

// Wire shape: a "type" discriminator plus a payload object named after the
// type. Spans that carry no styling and no link serialize in the short form
// without an annotation set.
impl Serialize for RichText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text {
                content,
                link,
                annotations,
            } => {
                if link.is_none() && annotations.is_default() {
                    let mut map = serializer.serialize_map(Some(2))?;
                    map.serialize_entry("type", "text")?;
                    map.serialize_entry("text", &BareTextBody { content })?;
                    map.end()
                } else {
                    let mut map = serializer.serialize_map(Some(5))?;
                    map.serialize_entry("type", "text")?;
                    map.serialize_entry(
                        "text",
                        &TextBody {
                            content,
                            link: link.as_deref().map(|url| LinkBody { url }),
                        },
                    )?;
                    map.serialize_entry("annotations", annotations)?;
                    map.serialize_entry("plain_text", content)?;
                    map.serialize_entry("href", &link.as_deref())?;
                    map.end()
                }
            }
            Self::Equation { expression } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "equation")?;
                map.serialize_entry("equation", &ExpressionBody { expression })?;
                map.end()
            }
        }
    }
}
