use crate::block::{Block, BlockType, Span};
use crate::error::Result;
use crate::inline;
use crate::node::{Container, Leaf, Node};
use crate::page::rewrite_url;
use crate::parser::{self, FENCE};

/// Build the page body for `blocks`: a `div` with one child per block.
pub fn build(blocks: &[Block]) -> Result<Node> {
    build_with_base_path(blocks, "/")
}

/// Like [`build`], with image and link targets rewritten under `base_path`.
pub fn build_with_base_path(blocks: &[Block], base_path: &str) -> Result<Node> {
    let children = blocks
        .iter()
        .map(|block| block_to_node(block, base_path))
        .collect::<Result<Vec<_>>>()?;
    Ok(Container::new("div", children).into())
}

fn block_to_node(block: &Block, base_path: &str) -> Result<Node> {
    let text = block.text();
    match block.block_type() {
        BlockType::Heading => heading_to_node(text, base_path),
        BlockType::Code => Ok(code_to_node(text)),
        BlockType::Quote => quote_to_node(text, base_path),
        BlockType::UnorderedList => list_to_node(text, "ul", base_path, |_, line| {
            line.strip_prefix("- ")
        }),
        BlockType::OrderedList => list_to_node(text, "ol", base_path, |n, line| {
            line.strip_prefix(parser::ordered_marker(n).as_str())
        }),
        BlockType::Paragraph => paragraph_to_node(text, base_path),
    }
}

fn heading_to_node(text: &str, base_path: &str) -> Result<Node> {
    let Some(level) = parser::heading_level(text) else {
        return paragraph_to_node(text, base_path);
    };
    let tag = format!("h{}", level);
    let children = text_to_children(&text[level + 1..], base_path)?;

    // A lone run of plain text needs no inner wrapper
    if let [Node::Leaf(only)] = children.as_slice()
        && only.tag().is_none()
        && let Some(value) = only.value()
    {
        return Ok(Leaf::new(tag, value).into());
    }
    if children.is_empty() {
        return Ok(Leaf::new(tag, "").into());
    }

    Ok(Container::new(tag, children).into())
}

fn code_to_node(text: &str) -> Node {
    let lines: Vec<&str> = text.lines().collect();

    let (info, body) = match lines.as_slice() {
        [only] => {
            let inner = only.trim();
            let inner = inner.strip_prefix(FENCE).unwrap_or(inner);
            let inner = inner.strip_suffix(FENCE).unwrap_or(inner);
            ("", inner.to_string())
        }
        [first, interior @ .., last] => {
            let info = first.trim().trim_start_matches('`').trim();
            let mut body: Vec<&str> = interior.to_vec();
            // Content sharing a line with the closing fence still belongs to the code
            let tail = last.trim_end();
            let tail = tail.strip_suffix(FENCE).unwrap_or(tail);
            if !tail.trim().is_empty() {
                body.push(tail);
            }
            (info, body.join("\n"))
        }
        [] => ("", String::new()),
    };

    let mut code = Leaf::new("code", body);
    if let Some(language) = info.split_whitespace().next() {
        code = code.with_attribute("class", format!("language-{}", language));
    }
    Container::new("pre", vec![code.into()]).into()
}

fn quote_to_node(text: &str, base_path: &str) -> Result<Node> {
    let joined = text
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix('>').unwrap_or(line).trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let children = text_to_children(&joined, base_path)?;
    Ok(Container::new("blockquote", children).into())
}

fn list_to_node<F>(text: &str, tag: &str, base_path: &str, strip_marker: F) -> Result<Node>
where
    F: for<'a> Fn(usize, &'a str) -> Option<&'a str>,
{
    let items = text
        .lines()
        .enumerate()
        .map(|(i, line)| -> Result<Node> {
            let item = strip_marker(i + 1, line).unwrap_or(line);
            let children = text_to_children(item, base_path)?;
            Ok(Container::new("li", children).into())
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Container::new(tag, items).into())
}

fn paragraph_to_node(text: &str, base_path: &str) -> Result<Node> {
    let children = text_to_children(text, base_path)?;
    Ok(Container::new("p", children).into())
}

/// Inline-split `text` and map each non-empty span to a leaf.
fn text_to_children(text: &str, base_path: &str) -> Result<Vec<Node>> {
    Ok(inline::split(text)?
        .into_iter()
        .filter(|span| !span.content().is_empty())
        .map(|span| span_to_node(span, base_path))
        .collect())
}

fn span_to_node(span: Span, base_path: &str) -> Node {
    let leaf = match span {
        Span::Text(text) => Leaf::text(text),
        Span::Bold(text) => Leaf::new("b", text),
        Span::Italic(text) => Leaf::new("i", text),
        Span::Code(text) => Leaf::new("code", text),
        Span::Link { text, url } => {
            Leaf::new("a", text).with_attribute("href", rewrite_url(&url, base_path))
        }
        Span::Image { alt, url } => Leaf::void("img")
            .with_attribute("src", rewrite_url(&url, base_path))
            .with_attribute("alt", alt),
    };
    leaf.into()
}
