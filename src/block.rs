use crate::parser;

/// Inline text spans with formatting
///
/// Only links and images carry a target URL; for those two variants the
/// text is the link text or the image alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

/// The formatting of a [`Span`] without its content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Text,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl Span {
    pub fn kind(&self) -> SpanKind {
        match self {
            Span::Text(_) => SpanKind::Text,
            Span::Bold(_) => SpanKind::Bold,
            Span::Italic(_) => SpanKind::Italic,
            Span::Code(_) => SpanKind::Code,
            Span::Link { .. } => SpanKind::Link,
            Span::Image { .. } => SpanKind::Image,
        }
    }

    /// Visible text of the span: the styled text, link text or alt text.
    pub fn content(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Italic(text) | Span::Code(text) => text,
            Span::Link { text, .. } => text,
            Span::Image { alt, .. } => alt,
        }
    }

    /// URL of a link or image, `None` for every other kind.
    pub fn target(&self) -> Option<&str> {
        match self {
            Span::Link { url, .. } | Span::Image { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Structural type of a block, decided by [`parser::classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// A run of non-blank source lines, trimmed and dedented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    text: String,
}

impl Block {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn block_type(&self) -> BlockType {
        parser::classify(&self.text)
    }
}
