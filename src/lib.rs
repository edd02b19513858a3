mod block;
mod config;
mod error;
pub mod html;
pub mod inline;
pub mod node;
pub mod page;
pub mod parser;
pub mod site;

pub use block::{Block, BlockType, Span, SpanKind};
pub use config::{Config, ConfigError, RenderConfig, SiteConfig};
pub use error::{Error, Result};
pub use node::{Container, Leaf, Node};

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to its HTML tree, with targets left as written.
pub fn markdown_to_html_node(markdown: &str) -> Result<Node> {
    html::build(&parse(markdown))
}

/// Convert markdown to HTML using default config.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    markdown_to_html_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to HTML with custom config.
pub fn markdown_to_html_with_config(markdown: &str, config: &Config) -> Result<String> {
    let base_path = page::normalize_base_path(&config.render.base_path);
    let blocks = parse(markdown);
    html::build_with_base_path(&blocks, &base_path)?.to_html()
}
