use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::block::{BlockNode, InlineSpan};
use crate::inline::format;

static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\. ").expect("ordered marker pattern"));

/// Segment markdown into a sequence of block nodes.
///
/// Line-cursor state machine with one-line lookahead; the branch taken is
/// re-decided every iteration from the current line. Total over all
/// inputs: anything unrecognized degrades to paragraph text, and every
/// branch advances the cursor by at least one line.
pub fn segment(markdown: &str) -> Vec<BlockNode> {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();

        // Blank lines separate blocks; they never become nodes.
        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if trimmed.starts_with("```") {
            i += 1;
            let mut content = Vec::new();
            while i < lines.len() && !lines[i].trim().starts_with("```") {
                content.push(lines[i]);
                i += 1;
            }
            // Closing fence is consumed, not retained. An unterminated
            // fence runs to end of input.
            if i < lines.len() {
                i += 1;
            }
            blocks.push(BlockNode::CodeBlock {
                content: content.join("\n"),
            });
            continue;
        }

        if let Some((level, rest)) = heading_line(trimmed) {
            blocks.push(BlockNode::Heading {
                level,
                content: format(rest),
            });
            i += 1;
            continue;
        }

        if unordered_item(trimmed).is_some() {
            let items = consume_list(&lines, &mut i, unordered_item);
            blocks.push(BlockNode::UnorderedList { items });
            continue;
        }

        if ordered_item(trimmed).is_some() {
            let items = consume_list(&lines, &mut i, ordered_item);
            blocks.push(BlockNode::OrderedList { items });
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("> ") {
            // One node per source line.
            blocks.push(BlockNode::BlockQuote {
                content: format(rest),
            });
            i += 1;
            continue;
        }

        // Paragraph: absorb following non-blank lines that do not open
        // another block, joined by soft breaks.
        let mut para_lines = vec![format(trimmed)];
        i += 1;
        while i < lines.len() {
            let t = lines[i].trim();
            if t.is_empty() || opens_block(t) {
                break;
            }
            para_lines.push(format(t));
            i += 1;
        }
        blocks.push(BlockNode::Paragraph { lines: para_lines });
    }

    debug!(blocks = blocks.len(), "segmented markdown");
    blocks
}

/// Consume consecutive list items, tolerating exactly one blank line
/// between items when the line after the blank is also an item.
fn consume_list(
    lines: &[&str],
    i: &mut usize,
    item: fn(&str) -> Option<&str>,
) -> Vec<Vec<InlineSpan>> {
    let mut items = Vec::new();
    while *i < lines.len() {
        let t = lines[*i].trim();
        if let Some(rest) = item(t) {
            items.push(format(rest));
            *i += 1;
        } else if t.is_empty() && *i + 1 < lines.len() && item(lines[*i + 1].trim()).is_some() {
            *i += 1;
        } else {
            break;
        }
    }
    items
}

fn heading_line(t: &str) -> Option<(u8, &str)> {
    let hashes = t.bytes().take_while(|&b| b == b'#').count();
    // Seven or more hashes are not a heading and fall through to
    // paragraph handling, as does a missing space.
    if (1..=6).contains(&hashes) {
        if let Some(rest) = t[hashes..].strip_prefix(' ') {
            return Some((hashes as u8, rest));
        }
    }
    None
}

fn unordered_item(t: &str) -> Option<&str> {
    t.strip_prefix("- ")
        .or_else(|| t.strip_prefix("* "))
        .or_else(|| t.strip_prefix("+ "))
}

fn ordered_item(t: &str) -> Option<&str> {
    ORDERED_RE.find(t).map(|m| &t[m.end()..])
}

fn opens_block(t: &str) -> bool {
    t.starts_with("```")
        || heading_line(t).is_some()
        || unordered_item(t).is_some()
        || ordered_item(t).is_some()
        || t.starts_with("> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::InlineSpan;
    use pretty_assertions::assert_eq;

    fn para(lines: &[&str]) -> BlockNode {
        BlockNode::Paragraph {
            lines: lines.iter().map(|l| format(l)).collect(),
        }
    }

    #[test]
    fn heading_levels_one_through_six() {
        for level in 1..=6u8 {
            let src = format!("{} Title", "#".repeat(level as usize));
            assert_eq!(
                segment(&src),
                vec![BlockNode::Heading {
                    level,
                    content: vec![InlineSpan::text("Title")],
                }]
            );
        }
    }

    #[test]
    fn seven_hashes_is_a_paragraph() {
        assert_eq!(segment("####### x"), vec![para(&["####### x"])]);
    }

    #[test]
    fn hash_without_space_is_a_paragraph() {
        assert_eq!(segment("#nope"), vec![para(&["#nope"])]);
    }

    #[test]
    fn paragraph_absorbs_following_lines_as_soft_breaks() {
        assert_eq!(segment("one\ntwo\nthree"), vec![para(&["one", "two", "three"])]);
    }

    #[test]
    fn paragraph_stops_at_block_openers() {
        assert_eq!(
            segment("text\n# head"),
            vec![
                para(&["text"]),
                BlockNode::Heading {
                    level: 1,
                    content: vec![InlineSpan::text("head")],
                },
            ]
        );
    }

    #[test]
    fn blank_lines_never_become_nodes() {
        assert_eq!(segment("a\n\n\n\nb"), vec![para(&["a"]), para(&["b"])]);
        assert_eq!(segment("\n\n"), Vec::<BlockNode>::new());
    }

    #[test]
    fn single_blank_continues_a_list() {
        assert_eq!(
            segment("- a\n\n- b"),
            vec![BlockNode::UnorderedList {
                items: vec![
                    vec![InlineSpan::text("a")],
                    vec![InlineSpan::text("b")],
                ],
            }]
        );
    }

    #[test]
    fn double_blank_ends_a_list() {
        assert_eq!(
            segment("- a\n\n\n- b"),
            vec![
                BlockNode::UnorderedList {
                    items: vec![vec![InlineSpan::text("a")]],
                },
                BlockNode::UnorderedList {
                    items: vec![vec![InlineSpan::text("b")]],
                },
            ]
        );
    }

    #[test]
    fn all_three_unordered_markers() {
        assert_eq!(
            segment("- a\n* b\n+ c"),
            vec![BlockNode::UnorderedList {
                items: vec![
                    vec![InlineSpan::text("a")],
                    vec![InlineSpan::text("b")],
                    vec![InlineSpan::text("c")],
                ],
            }]
        );
    }

    #[test]
    fn ordered_list_with_blank_continuation() {
        assert_eq!(
            segment("1. a\n2. b\n\n3. c"),
            vec![BlockNode::OrderedList {
                items: vec![
                    vec![InlineSpan::text("a")],
                    vec![InlineSpan::text("b")],
                    vec![InlineSpan::text("c")],
                ],
            }]
        );
    }

    #[test]
    fn ordered_marker_requires_dot_and_space() {
        assert_eq!(segment("1)a"), vec![para(&["1)a"])]);
        assert_eq!(segment("1.a"), vec![para(&["1.a"])]);
    }

    #[test]
    fn code_fence_keeps_content_verbatim() {
        assert_eq!(
            segment("```\nx < y\n```"),
            vec![BlockNode::CodeBlock {
                content: "x < y".to_string(),
            }]
        );
    }

    #[test]
    fn unterminated_fence_consumes_to_end_of_input() {
        assert_eq!(
            segment("```\na\nb"),
            vec![BlockNode::CodeBlock {
                content: "a\nb".to_string(),
            }]
        );
    }

    #[test]
    fn fence_content_is_never_inline_parsed() {
        assert_eq!(
            segment("```\n**not bold**\n```"),
            vec![BlockNode::CodeBlock {
                content: "**not bold**".to_string(),
            }]
        );
    }

    #[test]
    fn each_quote_line_is_its_own_node() {
        assert_eq!(
            segment("> line1\n> line2"),
            vec![
                BlockNode::BlockQuote {
                    content: vec![InlineSpan::text("line1")],
                },
                BlockNode::BlockQuote {
                    content: vec![InlineSpan::text("line2")],
                },
            ]
        );
    }

    #[test]
    fn bare_angle_is_not_a_quote() {
        assert_eq!(segment(">nope"), vec![para(&[">nope"])]);
    }

    #[test]
    fn mixed_document_covers_every_line() {
        let src = "# Title\n\nintro line\ncontinued\n\n- one\n- two\n\n> said so\n\n```\nraw\n```\n\n1. first\n2. second";
        let blocks = segment(src);
        assert_eq!(blocks.len(), 6);
        assert!(matches!(blocks[0], BlockNode::Heading { level: 1, .. }));
        assert!(matches!(&blocks[1], BlockNode::Paragraph { lines } if lines.len() == 2));
        assert!(matches!(&blocks[2], BlockNode::UnorderedList { items } if items.len() == 2));
        assert!(matches!(blocks[3], BlockNode::BlockQuote { .. }));
        assert!(matches!(blocks[4], BlockNode::CodeBlock { .. }));
        assert!(matches!(&blocks[5], BlockNode::OrderedList { items } if items.len() == 2));
    }

    #[test]
    fn crlf_input_parses_like_lf() {
        assert_eq!(segment("# a\r\ntext\r\n"), segment("# a\ntext\n"));
    }
}
