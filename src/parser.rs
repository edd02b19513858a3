use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Block, BlockType};

/// Opening and closing marker of a code block
pub const FENCE: &str = "```";

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6} ").unwrap());

/// Block predicates in priority order. The first match wins and anything
/// left over is a paragraph, so a block mixing list markers fails every
/// list predicate and ends up as a paragraph.
const CLASSIFIERS: &[(fn(&[&str]) -> bool, BlockType)] = &[
    (is_code, BlockType::Code),
    (is_quote, BlockType::Quote),
    (is_unordered_list, BlockType::UnorderedList),
    (is_ordered_list, BlockType::OrderedList),
    (is_heading, BlockType::Heading),
];

/// Split markdown text into blocks separated by blank lines.
///
/// Each block loses its shared indentation and surrounding whitespace;
/// blocks that end up empty are dropped.
pub fn parse(markdown: &str) -> Vec<Block> {
    let markdown = markdown.replace("\r\n", "\n");

    let blocks: Vec<Block> = BLANK_LINES
        .split(&markdown)
        .map(|chunk| dedent(chunk).trim().to_string())
        .filter(|text| !text.is_empty())
        .map(Block::new)
        .collect();

    for (i, block) in blocks.iter().enumerate() {
        log::debug!("block {}: {:?}", i, block.block_type());
    }

    blocks
}

/// Decide the structural type of a block from its lines.
pub fn classify(block: &str) -> BlockType {
    let lines: Vec<&str> = block.lines().collect();
    if lines.is_empty() {
        return BlockType::Paragraph;
    }

    CLASSIFIERS
        .iter()
        .find(|(predicate, _)| predicate(lines.as_slice()))
        .map_or(BlockType::Paragraph, |&(_, block_type)| block_type)
}

/// Number of leading `#` characters of a heading line, if it is one.
pub fn heading_level(line: &str) -> Option<usize> {
    HEADING
        .find(line)
        .map(|m| m.as_str().trim_end().len())
}

fn is_code(lines: &[&str]) -> bool {
    let first = lines[0].trim();
    let last = lines[lines.len() - 1].trim();
    if lines.len() == 1 {
        // A lone "```" opens a block that never closes
        return first.len() >= 2 * FENCE.len() && first.starts_with(FENCE) && first.ends_with(FENCE);
    }
    first.starts_with(FENCE) && last.ends_with(FENCE)
}

fn is_quote(lines: &[&str]) -> bool {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .all(|line| line.trim_start().starts_with('>'))
}

fn is_unordered_list(lines: &[&str]) -> bool {
    lines.iter().all(|line| line.starts_with("- "))
}

fn is_ordered_list(lines: &[&str]) -> bool {
    lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_marker(i + 1)))
}

fn is_heading(lines: &[&str]) -> bool {
    HEADING.is_match(lines[0])
}

/// Marker expected on the `n`th line (1-based) of an ordered list.
pub(crate) fn ordered_marker(n: usize) -> String {
    format!("{}. ", n)
}

/// Remove the leading whitespace shared by every non-blank line.
fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .reduce(common_prefix)
        .unwrap_or("");

    text.lines()
        .map(|line| line.strip_prefix(indent).unwrap_or(line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map_or(0, |((i, x), _)| i + x.len_utf8());
    &a[..len]
}
