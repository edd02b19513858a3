use thiserror::Error;

/// Failures raised by the markdown-to-HTML pipeline.
///
/// Any of these aborts the document being processed; nothing is recovered
/// within a single document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unmatched `{delimiter}` delimiter in text: {text}")]
    UnmatchedDelimiter {
        delimiter: &'static str,
        text: String,
    },

    #[error("leaf node {} requires a value", describe_tag(.tag))]
    MissingValue { tag: Option<String> },

    #[error("container node has no tag")]
    MissingTag,

    #[error("container node <{tag}> has no children")]
    EmptyContainer { tag: String },

    #[error("no H1 title found in the markdown")]
    NoTitle,
}

fn describe_tag(tag: &Option<String>) -> String {
    match tag {
        Some(tag) => format!("<{tag}>"),
        None => "(raw text)".to_string(),
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
