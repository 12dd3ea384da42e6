//! Directory-to-page-hierarchy sync.
//!
//! Each markdown file becomes one page; each directory on the way to it
//! becomes a (possibly empty) parent page. Everything runs sequentially —
//! one file, one hierarchy walk, one create-or-update at a time.

use std::path::Path;

use anyhow::{Context, Result};
use markdown_notion_client::{Client, ClientError};
use markdown_notion_engine::{io, markdown_to_blocks, split_front_matter};
use relative_path::RelativePath;

/// Sync every markdown file under `notes_root`, mirroring its directory
/// structure as pages under `base_parent_id`.
pub fn sync_directory(client: &Client, base_parent_id: &str, notes_root: &Path) -> Result<()> {
    let files = io::scan_markdown_files(notes_root)?;
    log::info!(
        "found {} markdown files under {}",
        files.len(),
        notes_root.display()
    );

    for relative in &files {
        sync_file(client, base_parent_id, notes_root, relative)
            .with_context(|| format!("failed to sync {relative}"))?;
    }
    Ok(())
}

fn sync_file(
    client: &Client,
    base_parent_id: &str,
    notes_root: &Path,
    relative: &RelativePath,
) -> Result<()> {
    log::info!("processing {relative}");
    let content = io::read_file(relative, notes_root)?;
    let front = split_front_matter(&content);
    let title = front
        .title
        .unwrap_or_else(|| title_from_segment(relative.file_stem().unwrap_or_default()));

    // A nesting error is fatal for the whole run, with the file attached
    // as context by the caller.
    let blocks = markdown_to_blocks(&front.body)?;

    let parent_id = ensure_page_hierarchy(client, base_parent_id, relative)?;

    match client.search_page(&title, Some(&parent_id))? {
        Some(existing) => {
            log::info!("updating existing page: {title}");
            client.update_page(&existing.id, &blocks)?;
        }
        None => {
            log::info!("creating new page: {title}");
            client.create_page(&parent_id, &title, &blocks)?;
        }
    }
    Ok(())
}

/// Walks the directory segments of `relative`, locating or creating one
/// page per segment under the previous one, and returns the immediate
/// parent id for the file's own page.
fn ensure_page_hierarchy(
    client: &Client,
    base_parent_id: &str,
    relative: &RelativePath,
) -> Result<String, ClientError> {
    let mut current_parent = base_parent_id.to_string();
    let Some(directories) = relative.parent() else {
        return Ok(current_parent);
    };

    for segment in directories.iter() {
        let segment_title = title_from_segment(segment);
        match client.search_page(&segment_title, Some(&current_parent))? {
            Some(existing) => current_parent = existing.id,
            None => {
                log::info!("creating hierarchy page: {segment_title}");
                let created = client.create_page(&current_parent, &segment_title, &[])?;
                current_parent = created.id;
            }
        }
    }
    Ok(current_parent)
}

/// Directory and file names become page titles: hyphens and underscores
/// turn into spaces and each word is capitalized.
pub fn title_from_segment(segment: &str) -> String {
    segment
        .replace('-', "_")
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
