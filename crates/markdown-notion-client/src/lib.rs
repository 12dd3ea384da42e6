//! Blocking client for the slice of the Notion API the publish workflow
//! uses: page creation and retrieval, title search, and block-children
//! manipulation. All ids are opaque strings. Requests run sequentially on
//! the caller's thread; the conversion core never touches this crate.

mod objects;

pub use objects::{ChildBlock, Page, ParentRef};

use std::time::Duration;

use markdown_notion_engine::Block;
use serde_json::json;

const NOTION_VERSION: &str = "2022-06-28";
const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[source] Box<ureq::Error>),
    #[error("failed to decode response: {0}")]
    Decode(#[from] std::io::Error),
}

impl From<ureq::Error> for ClientError {
    fn from(error: ureq::Error) -> Self {
        Self::Http(Box::new(error))
    }
}

pub struct Client {
    agent: ureq::Agent,
    token: String,
    base_url: String,
}

impl Client {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();
        Self {
            agent,
            token: token.into(),
            base_url: base_url.into(),
        }
    }

    /// Create a page under `parent_page_id` with the given title and
    /// content blocks.
    pub fn create_page(
        &self,
        parent_page_id: &str,
        title: &str,
        children: &[Block],
    ) -> Result<Page, ClientError> {
        let url = format!("{}/pages", self.base_url);
        log::debug!("POST {url} (title: {title})");
        let response = self.request("POST", &url).send_json(json!({
            "parent": {"page_id": parent_page_id},
            "properties": {"title": [{"text": {"content": title}}]},
            "children": children,
        }))?;
        Ok(response.into_json()?)
    }

    pub fn retrieve_page(&self, page_id: &str) -> Result<Page, ClientError> {
        let url = format!("{}/pages/{page_id}", self.base_url);
        log::debug!("GET {url}");
        let response = self.request("GET", &url).call()?;
        Ok(response.into_json()?)
    }

    /// Find the first page whose title equals `title` exactly; when
    /// `parent_id` is given the page must also sit directly under it. The
    /// remote search is fuzzy, so the exact match happens client-side.
    pub fn search_page(
        &self,
        title: &str,
        parent_id: Option<&str>,
    ) -> Result<Option<Page>, ClientError> {
        let url = format!("{}/search", self.base_url);
        log::debug!("POST {url} (query: {title})");
        let response = self.request("POST", &url).send_json(json!({
            "query": title,
            "filter": {"value": "page", "property": "object"},
        }))?;
        let search: objects::SearchResponse = response.into_json()?;
        Ok(search
            .results
            .into_iter()
            .find(|page| page_matches(page, title, parent_id)))
    }

    /// The first batch of a block's children. Result cursors are not
    /// followed.
    pub fn list_block_children(&self, block_id: &str) -> Result<Vec<ChildBlock>, ClientError> {
        let url = format!("{}/blocks/{block_id}/children", self.base_url);
        log::debug!("GET {url}");
        let response = self.request("GET", &url).call()?;
        let children: objects::ChildrenResponse = response.into_json()?;
        Ok(children.results)
    }

    pub fn delete_block(&self, block_id: &str) -> Result<(), ClientError> {
        let url = format!("{}/blocks/{block_id}", self.base_url);
        log::debug!("DELETE {url}");
        self.request("DELETE", &url).call()?;
        Ok(())
    }

    pub fn append_block_children(
        &self,
        block_id: &str,
        children: &[Block],
    ) -> Result<(), ClientError> {
        let url = format!("{}/blocks/{block_id}/children", self.base_url);
        log::debug!("PATCH {url} ({} blocks)", children.len());
        self.request("PATCH", &url)
            .send_json(json!({"children": children}))?;
        Ok(())
    }

    /// Replace a page's content: delete every existing child block, then
    /// append the new ones. There is no diffing.
    pub fn update_page(&self, page_id: &str, children: &[Block]) -> Result<(), ClientError> {
        for child in self.list_block_children(page_id)? {
            self.delete_block(&child.id)?;
        }
        self.append_block_children(page_id, children)
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Notion-Version", NOTION_VERSION)
    }
}

fn page_matches(page: &Page, title: &str, parent_id: Option<&str>) -> bool {
    page.title() == Some(title)
        && parent_id.is_none_or(|parent| page.parent_page_id() == Some(parent))
}
