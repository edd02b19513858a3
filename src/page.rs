//! Turning one markdown document into a full HTML page.

use std::borrow::Cow;

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::{html, parser};

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";
pub const BASE_PATH_PLACEHOLDER: &str = "{{ BasePath }}";

const H1_MARKER: &str = "# ";

/// Text of the first `# ` line.
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(H1_MARKER))
        .map(|title| title.trim().to_string())
        .ok_or(Error::NoTitle)
}

/// The document without any `# ` lines.
pub fn remove_title_lines(markdown: &str) -> String {
    markdown
        .lines()
        .filter(|line| !line.trim().starts_with(H1_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Literal substitution of the three template placeholders.
pub fn fill_template(template: &str, title: &str, content: &str, base_path: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
        .replace(BASE_PATH_PLACEHOLDER, base_path)
}

/// Base path with a guaranteed trailing `/`.
pub fn normalize_base_path(base_path: &str) -> String {
    if base_path.ends_with('/') {
        base_path.to_string()
    } else {
        format!("{}/", base_path)
    }
}

/// Place a site-local URL under `base_path`.
///
/// Leaves the URL alone when the base path is the root, or when it points
/// off-site (has a scheme, is protocol-relative) or at a fragment.
pub fn rewrite_url(url: &str, base_path: &str) -> String {
    let base_path = normalize_base_path(base_path);
    if base_path == "/" || is_external(url) {
        return url.to_string();
    }
    format!("{}{}", base_path, url.trim_start_matches('/'))
}

fn is_external(url: &str) -> bool {
    url.contains("://")
        || url.starts_with("//")
        || url.starts_with('#')
        || url.starts_with("mailto:")
        || url.starts_with("data:")
}

/// Render `markdown` into `template`.
///
/// The title always comes from the first `# ` line of the source. With
/// `strip_title` set, `# ` lines are left out of the body so the template
/// can place the title itself.
pub fn generate_page(markdown: &str, template: &str, options: &RenderConfig) -> Result<String> {
    let title = extract_title(markdown)?;
    let base_path = normalize_base_path(&options.base_path);

    let source = if options.strip_title {
        Cow::Owned(remove_title_lines(markdown))
    } else {
        Cow::Borrowed(markdown)
    };

    let blocks = parser::parse(&source);
    let content = if blocks.is_empty() {
        String::new()
    } else {
        html::build_with_base_path(&blocks, &base_path)?.to_html()?
    };

    Ok(fill_template(template, &title, &content, &base_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const TEMPLATE: &str =
        "<title>{{ Title }}</title><base href=\"{{ BasePath }}\"><main>{{ Content }}</main>";

    fn options(base_path: &str, strip_title: bool) -> RenderConfig {
        RenderConfig {
            base_path: base_path.to_string(),
            strip_title,
        }
    }

    #[test]
    fn title_from_first_h1() {
        assert_eq!(extract_title("# Hello World").unwrap(), "Hello World");
        assert_eq!(
            extract_title("intro\n## Sub\n  #   Spaced out  \n# Second").unwrap(),
            "Spaced out"
        );
    }

    #[rstest]
    #[case("")]
    #[case("no heading here")]
    #[case("## only a subheading")]
    #[case("#NoSpace")]
    fn no_title(#[case] markdown: &str) {
        assert_eq!(extract_title(markdown), Err(Error::NoTitle));
    }

    #[test]
    fn removes_every_h1_line() {
        let md = "# Title\nkeep me\n## keep sub\n  # indented h1\nlast";
        assert_eq!(remove_title_lines(md), "keep me\n## keep sub\nlast");
    }

    #[test]
    fn template_substitution_is_literal() {
        let page = fill_template(
            "{{ Title }}|{{ Content }}|{{ BasePath }}|{{ Title }}|{{Title}}",
            "T",
            "<p>c</p>",
            "/b/",
        );
        assert_eq!(page, "T|<p>c</p>|/b/|T|{{Title}}");
    }

    #[rstest]
    #[case("/", "/")]
    #[case("", "/")]
    #[case("/blog", "/blog/")]
    #[case("/blog/", "/blog/")]
    fn normalizes_base_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_base_path(input), expected);
    }

    #[rstest]
    #[case("/images/a.png", "/", "/images/a.png")]
    #[case("/images/a.png", "/docs", "/docs/images/a.png")]
    #[case("images/a.png", "/docs/", "/docs/images/a.png")]
    #[case("https://i.imgur.com/x.png", "/docs/", "https://i.imgur.com/x.png")]
    #[case("//cdn.example.com/x.js", "/docs/", "//cdn.example.com/x.js")]
    #[case("#section", "/docs/", "#section")]
    #[case("mailto:me@example.com", "/docs/", "mailto:me@example.com")]
    fn rewrites_urls(#[case] url: &str, #[case] base: &str, #[case] expected: &str) {
        assert_eq!(rewrite_url(url, base), expected);
    }

    #[test]
    fn page_keeps_h1_in_body_by_default() {
        let page = generate_page("# Hi\n\nbody", TEMPLATE, &options("/", false)).unwrap();
        assert_eq!(
            page,
            "<title>Hi</title><base href=\"/\"><main><div><h1>Hi</h1><p>body</p></div></main>"
        );
    }

    #[test]
    fn page_with_stripped_title() {
        let page = generate_page("# Hi\n\nbody", TEMPLATE, &options("/site", true)).unwrap();
        assert_eq!(
            page,
            "<title>Hi</title><base href=\"/site/\"><main><div><p>body</p></div></main>"
        );
    }

    #[test]
    fn title_only_page_with_stripped_title_has_empty_body() {
        let page = generate_page("# Alone", TEMPLATE, &options("/", true)).unwrap();
        assert_eq!(page, "<title>Alone</title><base href=\"/\"><main></main>");
    }

    #[test]
    fn page_without_title_fails() {
        assert_eq!(
            generate_page("just text", TEMPLATE, &options("/", false)),
            Err(Error::NoTitle)
        );
    }

    #[test]
    fn page_with_bad_markup_fails() {
        assert!(matches!(
            generate_page("# T\n\nan *open", TEMPLATE, &options("/", false)),
            Err(Error::UnmatchedDelimiter { .. })
        ));
    }

    #[test]
    fn images_follow_the_base_path() {
        let page = generate_page(
            "# Gallery\n\n![cat](/images/cat.png)",
            "{{ Content }}",
            &options("/pets", false),
        )
        .unwrap();
        assert!(page.contains("src=\"/pets/images/cat.png\""));
    }
}
