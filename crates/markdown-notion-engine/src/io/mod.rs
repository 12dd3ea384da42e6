use std::fs;
use std::path::{Path, PathBuf};

use relative_path::{RelativePath, RelativePathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid notes directory: {0}")]
    InvalidNotesDir(PathBuf),
    #[error("non-unicode path: {0}")]
    NonUnicodePath(PathBuf),
}

/// Read a markdown file relative to the notes root.
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Recursively collect `*.md` files under the notes root, as sorted
/// root-relative paths.
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<RelativePathBuf>, IoError> {
    validate_notes_dir(notes_root)?;
    let mut files = Vec::new();
    scan_directory(notes_root, notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.is_dir() {
        return Err(IoError::InvalidNotesDir(path.to_path_buf()));
    }
    Ok(())
}

fn scan_directory(
    root: &Path,
    dir: &Path,
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            scan_directory(root, &path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            let relative = RelativePathBuf::from_path(relative)
                .map_err(|_| IoError::NonUnicodePath(path.clone()))?;
            files.push(relative);
        }
    }
    Ok(())
}
