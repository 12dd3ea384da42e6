use serde::Deserialize;

/// A page as returned by the remote service.
///
/// Only the fields the sync workflow reads are decoded into struct fields;
/// the title lives deep inside the raw `properties` value and is reached
/// through an accessor instead of a full property model.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub parent: Option<ParentRef>,
    #[serde(default)]
    pub properties: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentRef {
    #[serde(default)]
    pub page_id: Option<String>,
}

impl Page {
    /// The page's title property, when the decoded shape carries one.
    pub fn title(&self) -> Option<&str> {
        self.properties
            .pointer("/title/title/0/text/content")?
            .as_str()
    }

    pub fn parent_page_id(&self) -> Option<&str> {
        self.parent.as_ref()?.page_id.as_deref()
    }
}

/// An existing child block; only the id is needed, to delete it before a
/// page's content is replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildBlock {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub(crate) results: Vec<Page>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChildrenResponse {
    pub(crate) results: Vec<ChildBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(value: serde_json::Value) -> Page {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_title_read_from_properties() {
        let page = page(json!({
            "id": "abc",
            "properties": {
                "title": {"title": [{"text": {"content": "My Page"}}]}
            }
        }));
        assert_eq!(page.title(), Some("My Page"));
    }

    #[test]
    fn test_missing_title_property() {
        let page = page(json!({"id": "abc", "properties": {}}));
        assert_eq!(page.title(), None);
    }

    #[test]
    fn test_empty_title_array() {
        let page = page(json!({
            "id": "abc",
            "properties": {"title": {"title": []}}
        }));
        assert_eq!(page.title(), None);
    }

    #[test]
    fn test_parent_page_id() {
        let page = page(json!({
            "id": "abc",
            "parent": {"type": "page_id", "page_id": "parent-1"},
            "properties": {}
        }));
        assert_eq!(page.parent_page_id(), Some("parent-1"));
    }

    #[test]
    fn test_workspace_parent_has_no_page_id() {
        let page = page(json!({
            "id": "abc",
            "parent": {"type": "workspace", "workspace": true},
            "properties": {}
        }));
        assert_eq!(page.parent_page_id(), None);
    }
}
