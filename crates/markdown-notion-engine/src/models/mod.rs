pub mod blocks;
pub mod rich_text;

pub use blocks::Block;
pub use rich_text::{Annotations, RichText};
