use markdown_notion_engine::{
    Annotations, Block, ConvertError, RichText, markdown_to_blocks,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn rich_text(block: &Block) -> &[RichText] {
    match block {
        Block::Paragraph { rich_text }
        | Block::Heading1 { rich_text }
        | Block::Heading2 { rich_text }
        | Block::Heading3 { rich_text }
        | Block::Quote { rich_text }
        | Block::BulletedListItem { rich_text, .. }
        | Block::NumberedListItem { rich_text, .. } => rich_text,
        other => panic!("block has no rich text: {other:?}"),
    }
}

fn children(block: &Block) -> &[Block] {
    match block {
        Block::BulletedListItem { children, .. } | Block::NumberedListItem { children, .. } => {
            children.as_deref().unwrap_or(&[])
        }
        other => panic!("block has no children: {other:?}"),
    }
}

#[test]
fn test_empty_input_yields_no_blocks() {
    assert_eq!(markdown_to_blocks("").unwrap(), vec![]);
}

#[test]
fn test_plain_line_becomes_single_plain_paragraph() {
    let blocks = markdown_to_blocks("just a line of text").unwrap();
    assert_eq!(
        blocks,
        vec![Block::Paragraph {
            rich_text: vec![RichText::plain("just a line of text")],
        }]
    );
}

#[test]
fn test_heading_levels_up_to_three_fourth_dropped() {
    let blocks = markdown_to_blocks("# H1\n## H2\n### H3\n#### H4").unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(
        blocks[0],
        Block::Heading1 {
            rich_text: vec![RichText::plain("H1")],
        }
    );
    assert!(matches!(blocks[1], Block::Heading2 { .. }));
    assert!(matches!(blocks[2], Block::Heading3 { .. }));
}

#[rstest]
#[case("# Title", 1)]
#[case("## Title", 2)]
#[case("### Title", 3)]
fn test_heading_level(#[case] line: &str, #[case] level: usize) {
    let blocks = markdown_to_blocks(line).unwrap();
    let actual = match &blocks[0] {
        Block::Heading1 { .. } => 1,
        Block::Heading2 { .. } => 2,
        Block::Heading3 { .. } => 3,
        other => panic!("not a heading: {other:?}"),
    };
    assert_eq!(actual, level);
}

#[test]
fn test_bold_span_and_trailing_text() {
    let blocks = markdown_to_blocks("**bold** text").unwrap();
    assert_eq!(
        rich_text(&blocks[0]),
        &[
            RichText::styled("bold", Annotations::bold()),
            RichText::plain(" text"),
        ]
    );
}

#[test]
fn test_blockquote() {
    let blocks = markdown_to_blocks("> This is a quote").unwrap();
    assert_eq!(
        blocks,
        vec![Block::Quote {
            rich_text: vec![RichText::plain("This is a quote")],
        }]
    );
}

#[test]
fn test_horizontal_rule_becomes_divider() {
    let blocks = markdown_to_blocks("above\n---\nbelow").unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[1], Block::Divider);
}

#[test]
fn test_fenced_code_block() {
    let blocks = markdown_to_blocks("```python\nprint('hello')\n```").unwrap();
    assert_eq!(
        blocks,
        vec![Block::Code {
            language: "python".to_string(),
            content: "print('hello')".to_string(),
        }]
    );
}

#[test]
fn test_fence_contents_never_misread_as_block_syntax() {
    let blocks = markdown_to_blocks("```\n# not a heading\n- not a list\n| not | a table |\n```")
        .unwrap();
    assert_eq!(blocks.len(), 1);
    assert!(matches!(blocks[0], Block::Code { .. }));
}

#[test]
fn test_display_math_becomes_equation_block() {
    let blocks = markdown_to_blocks("$$\n\\int_0^1 x\\,dx\n$$").unwrap();
    assert_eq!(
        blocks,
        vec![Block::Equation {
            expression: "\\int_0^1 x\\,dx".to_string(),
        }]
    );
}

#[test]
fn test_every_generated_sentinel_resolves() {
    // Two code fences and two math fences interleaved with text: each
    // generated sentinel resolves to exactly one block of its kind.
    let source = "```a\nfirst\n```\ntext\n$$x$$\n```b\nsecond\n```\n$$y$$";
    let blocks = markdown_to_blocks(source).unwrap();
    let code_count = blocks
        .iter()
        .filter(|block| matches!(block, Block::Code { .. }))
        .count();
    let equation_count = blocks
        .iter()
        .filter(|block| matches!(block, Block::Equation { .. }))
        .count();
    assert_eq!(code_count, 2);
    assert_eq!(equation_count, 2);
    // No sentinel text leaks into the output.
    for block in &blocks {
        if let Block::Paragraph { rich_text } = block {
            for span in rich_text {
                assert!(!span.plain_text().contains("CODE_BLOCK_"));
                assert!(!span.plain_text().contains("LATEX_BLOCK_"));
            }
        }
    }
}

#[test]
fn test_indented_code_accumulates_until_non_indented_line() {
    // The intro line matters: input is trimmed before segmentation, so
    // leading indentation on the very first line would be lost.
    let blocks = markdown_to_blocks("intro\n    first line\n    second line\nafter").unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(
        blocks[1],
        Block::Code {
            language: "plain text".to_string(),
            content: "first line\nsecond line".to_string(),
        }
    );
    assert!(matches!(blocks[2], Block::Paragraph { .. }));
}

#[test]
fn test_indented_code_flushes_at_end_of_input() {
    let blocks = markdown_to_blocks("intro\n    indented tail").unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(
        blocks[1],
        Block::Code {
            language: "plain text".to_string(),
            content: "indented tail".to_string(),
        }
    );
}

#[test]
fn test_image_with_caption() {
    let blocks = markdown_to_blocks("![An image](https://example.com/a.png)").unwrap();
    assert_eq!(
        blocks,
        vec![Block::Image {
            url: "https://example.com/a.png".to_string(),
            caption: Some("An image".to_string()),
        }]
    );
}

#[test]
fn test_image_without_alt_has_no_caption() {
    let blocks = markdown_to_blocks("![](https://example.com/a.png)").unwrap();
    assert_eq!(
        blocks,
        vec![Block::Image {
            url: "https://example.com/a.png".to_string(),
            caption: None,
        }]
    );
}

#[test]
fn test_table_becomes_one_equation_block() {
    let source = "| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1 | Cell 2 |";
    let blocks = markdown_to_blocks(source).unwrap();
    assert_eq!(blocks.len(), 1);
    let Block::Equation { expression } = &blocks[0] else {
        panic!("expected equation block, got {:?}", blocks[0]);
    };
    assert!(expression.contains("\\textsf{\\textbf{Header 1}}"));
    assert!(expression.contains("\\textsf{Cell 1}"));
}

#[test]
fn test_table_flushes_at_end_of_input() {
    let blocks = markdown_to_blocks("before\n| a | b |").unwrap();
    assert_eq!(blocks.len(), 2);
    assert!(matches!(blocks[1], Block::Equation { .. }));
}

#[test]
fn test_list_depth_follows_stepwise_indentation() {
    let blocks = markdown_to_blocks("- a\n - b\n  - c").unwrap();
    assert_eq!(blocks.len(), 1);
    let level1 = children(&blocks[0]);
    assert_eq!(level1.len(), 1);
    let level2 = children(&level1[0]);
    assert_eq!(level2.len(), 1);
    assert_eq!(rich_text(&level2[0]), &[RichText::plain("c")]);
}

#[test]
fn test_sibling_order_matches_source_order() {
    let blocks = markdown_to_blocks("1. one\n2. two\n3. three").unwrap();
    let texts: Vec<&str> = blocks
        .iter()
        .map(|block| rich_text(block)[0].plain_text())
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn test_ordered_and_unordered_switch_stays_siblings() {
    let blocks = markdown_to_blocks("1. numbered\n- bulleted").unwrap();
    assert_eq!(blocks.len(), 2);
    assert!(matches!(blocks[0], Block::NumberedListItem { .. }));
    assert!(matches!(blocks[1], Block::BulletedListItem { .. }));
}

#[test]
fn test_nested_item_under_non_list_block_is_fatal() {
    let result = markdown_to_blocks("plain paragraph\n  - orphan item");
    assert_eq!(result, Err(ConvertError::InvalidListNesting { line: 2 }));
}

#[test]
fn test_list_stack_persists_across_non_list_lines() {
    // The nesting state is not reset by an intervening paragraph; a later
    // deeper item still attaches below the open level. Literal behavior.
    let blocks = markdown_to_blocks("- a\n - b\nmiddle\n  - c").unwrap();
    assert_eq!(blocks.len(), 2);
    let b_items = children(&blocks[0]);
    assert_eq!(b_items.len(), 1);
    let c_items = children(&b_items[0]);
    assert_eq!(rich_text(&c_items[0]), &[RichText::plain("c")]);
    assert!(matches!(blocks[1], Block::Paragraph { .. }));
}

#[test]
fn test_list_marker_prefix_is_stripped_before_formatting() {
    let blocks = markdown_to_blocks("- **bold** item").unwrap();
    assert_eq!(
        rich_text(&blocks[0]),
        &[
            RichText::styled("bold", Annotations::bold()),
            RichText::plain(" item"),
        ]
    );
}

#[test]
fn test_mixed_document_block_order() {
    let source = "# Title\n\nIntro paragraph\n\n- item one\n- item two\n\n> a quote\n\n---";
    let blocks = markdown_to_blocks(source).unwrap();
    assert!(matches!(blocks[0], Block::Heading1 { .. }));
    assert!(matches!(blocks[1], Block::Paragraph { .. }));
    assert!(matches!(blocks[2], Block::BulletedListItem { .. }));
    assert!(matches!(blocks[3], Block::BulletedListItem { .. }));
    assert!(matches!(blocks[4], Block::Quote { .. }));
    assert!(matches!(blocks[5], Block::Divider));
}

#[test]
fn test_pathological_emphasis_input_completes_in_bounded_time() {
    // Repeated unpaired markers are the worst case for the inline passes;
    // a soft performance limit, not a correctness failure.
    let line = "*_~`$".repeat(400);
    let started = std::time::Instant::now();
    let blocks = markdown_to_blocks(&line).unwrap();
    assert_eq!(blocks.len(), 1);
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
}

#[test]
fn test_conversion_is_call_scoped_and_repeatable() {
    // Sentinel ids restart at zero on every call; nothing leaks between
    // conversions.
    let source = "```rust\nlet x = 1;\n```";
    let first = markdown_to_blocks(source).unwrap();
    let second = markdown_to_blocks(source).unwrap();
    assert_eq!(first, second);
}
