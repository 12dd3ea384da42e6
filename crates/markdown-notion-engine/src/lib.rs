pub mod frontmatter;
pub mod io;
pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use frontmatter::{FrontMatter, split_front_matter};
pub use models::{Annotations, Block, RichText};
pub use parsing::{CONTENT_MAX_LENGTH, ConvertError, format_inline, markdown_to_blocks};
