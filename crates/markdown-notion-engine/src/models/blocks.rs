use serde::ser::{Serialize, SerializeMap, Serializer};

use super::rich_text::{ExpressionBody, RichText};

/// One structural unit of the output tree.
///
/// List items own their nested items directly; every other variant is a
/// leaf. The tree is built fresh per conversion call and handed to the
/// caller whole.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph {
        rich_text: Vec<RichText>,
    },
    Heading1 {
        rich_text: Vec<RichText>,
    },
    Heading2 {
        rich_text: Vec<RichText>,
    },
    Heading3 {
        rich_text: Vec<RichText>,
    },
    Quote {
        rich_text: Vec<RichText>,
    },
    BulletedListItem {
        rich_text: Vec<RichText>,
        children: Option<Vec<Block>>,
    },
    NumberedListItem {
        rich_text: Vec<RichText>,
        children: Option<Vec<Block>>,
    },
    Code {
        language: String,
        content: String,
    },
    Divider,
    Image {
        url: String,
        caption: Option<String>,
    },
    Equation {
        expression: String,
    },
}

impl Block {
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            Self::BulletedListItem { .. } | Self::NumberedListItem { .. }
        )
    }

    /// The nested-items container of a list item, created on first access.
    /// `None` for non-list blocks.
    pub(crate) fn list_children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match self {
            Self::BulletedListItem { children, .. } | Self::NumberedListItem { children, .. } => {
                Some(children.get_or_insert_with(Vec::new))
            }
            _ => None,
        }
    }
}

#[derive(serde::Serialize)]
struct RichTextBody<'a> {
    rich_text: &'a [RichText],
}

#[derive(serde::Serialize)]
struct ListItemBody<'a> {
    rich_text: &'a [RichText],
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a [Block]>,
}

#[derive(serde::Serialize)]
struct CodeBody<'a> {
    language: &'a str,
    rich_text: [RichText; 1],
}

#[derive(serde::Serialize)]
struct Empty {}

#[derive(serde::Serialize)]
struct ExternalUrl<'a> {
    url: &'a str,
}

// Captions are plain spans with an explicit null link and no annotation set.
#[derive(serde::Serialize)]
struct CaptionSpan<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: CaptionText<'a>,
}

#[derive(serde::Serialize)]
struct CaptionText<'a> {
    content: &'a str,
    link: Option<()>,
}

#[derive(serde::Serialize)]
struct ImageBody<'a> {
    external: ExternalUrl<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<[CaptionSpan<'a>; 1]>,
}

// Wire shape: "type" discriminator plus a payload object named after the
// type. Divider and equation blocks go out without the "object" marker;
// everything else carries it.
impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Paragraph { rich_text } => {
                map.serialize_entry("object", "block")?;
                map.serialize_entry("type", "paragraph")?;
                map.serialize_entry("paragraph", &RichTextBody { rich_text })?;
            }
            Self::Heading1 { rich_text } => {
                map.serialize_entry("object", "block")?;
                map.serialize_entry("type", "heading_1")?;
                map.serialize_entry("heading_1", &RichTextBody { rich_text })?;
            }
            Self::Heading2 { rich_text } => {
                map.serialize_entry("object", "block")?;
                map.serialize_entry("type", "heading_2")?;
                map.serialize_entry("heading_2", &RichTextBody { rich_text })?;
            }
            Self::Heading3 { rich_text } => {
                map.serialize_entry("object", "block")?;
                map.serialize_entry("type", "heading_3")?;
                map.serialize_entry("heading_3", &RichTextBody { rich_text })?;
            }
            Self::Quote { rich_text } => {
                map.serialize_entry("object", "block")?;
                map.serialize_entry("type", "quote")?;
                map.serialize_entry("quote", &RichTextBody { rich_text })?;
            }
            Self::BulletedListItem {
                rich_text,
                children,
            } => {
                map.serialize_entry("object", "block")?;
                map.serialize_entry("type", "bulleted_list_item")?;
                map.serialize_entry(
                    "bulleted_list_item",
                    &ListItemBody {
                        rich_text,
                        children: children.as_deref(),
                    },
                )?;
            }
            Self::NumberedListItem {
                rich_text,
                children,
            } => {
                map.serialize_entry("object", "block")?;
                map.serialize_entry("type", "numbered_list_item")?;
                map.serialize_entry(
                    "numbered_list_item",
                    &ListItemBody {
                        rich_text,
                        children: children.as_deref(),
                    },
                )?;
            }
            Self::Code { language, content } => {
                map.serialize_entry("object", "block")?;
                map.serialize_entry("type", "code")?;
                map.serialize_entry(
                    "code",
                    &CodeBody {
                        language,
                        rich_text: [RichText::plain(content.clone())],
                    },
                )?;
            }
            Self::Divider => {
                map.serialize_entry("type", "divider")?;
                map.serialize_entry("divider", &Empty {})?;
            }
            Self::Image { url, caption } => {
                map.serialize_entry("object", "block")?;
                map.serialize_entry("type", "image")?;
                map.serialize_entry(
                    "image",
                    &ImageBody {
                        external: ExternalUrl { url },
                        caption: caption.as_deref().map(|content| {
                            [CaptionSpan {
                                kind: "text",
                                text: CaptionText {
                                    content,
                                    link: None,
                                },
                            }]
                        }),
                    },
                )?;
            }
            Self::Equation { expression } => {
                map.serialize_entry("type", "equation")?;
                map.serialize_entry("equation", &ExpressionBody { expression })?;
            }
        }
        map.end()
    }
}
