//! Intermediate HTML tree built from markdown blocks.
//!
//! A tree is either a [`Leaf`] carrying text, or a [`Container`] owning an
//! ordered list of children. Nodes are assembled bottom-up and only read
//! afterwards; [`Node::to_html`] serializes a tree to markup.
//!
//! Values are emitted as-is. Nothing is escaped.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Tags that never carry a value and render self-closing.
pub const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "meta", "link"];

pub type Attributes = BTreeMap<String, String>;

pub fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Leaf),
    Container(Container),
}

/// A node without children.
///
/// Without a tag the value is emitted as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaf {
    tag: Option<String>,
    value: Option<String>,
    attributes: Attributes,
}

/// A tagged node wrapping its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    tag: Option<String>,
    children: Vec<Node>,
    attributes: Attributes,
}

impl Leaf {
    /// Raw text with no surrounding element.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: Attributes::new(),
        }
    }

    /// A tag with no value, such as `img`.
    pub fn void(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        if let Some(tag) = self.tag.as_deref()
            && is_void(tag)
        {
            out.push('<');
            out.push_str(tag);
            write_attributes(&self.attributes, out);
            out.push_str(" />");
            return Ok(());
        }

        let value = self.value.as_deref().ok_or_else(|| Error::MissingValue {
            tag: self.tag.clone(),
        })?;

        match self.tag.as_deref() {
            None => out.push_str(value),
            Some(tag) => {
                write_open_tag(tag, &self.attributes, out);
                out.push_str(value);
                write_close_tag(tag, out);
            }
        }
        Ok(())
    }
}

impl Container {
    pub fn new(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            tag: Some(tag.into()),
            children,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        let tag = self.tag.as_deref().ok_or(Error::MissingTag)?;
        if self.children.is_empty() {
            return Err(Error::EmptyContainer {
                tag: tag.to_string(),
            });
        }

        write_open_tag(tag, &self.attributes, out);
        for child in &self.children {
            child.write_html(out)?;
        }
        write_close_tag(tag, out);
        Ok(())
    }
}

impl Node {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.tag(),
            Node::Container(container) => container.tag(),
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Node::Container(container) => Some(container),
            Node::Leaf(_) => None,
        }
    }

    /// Serialize the tree rooted at this node.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            Node::Leaf(leaf) => leaf.write_html(out),
            Node::Container(container) => container.write_html(out),
        }
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        Node::Container(container)
    }
}

fn write_open_tag(tag: &str, attributes: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    write_attributes(attributes, out);
    out.push('>');
}

fn write_close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_attributes(attributes: &Attributes, out: &mut String) {
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}
