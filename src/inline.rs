use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::block::Span;
use crate::error::{Error, Result};

static IMAGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]+)\]\(([^)]+)\)").unwrap());

static LINK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Paired delimiters, applied in this order after images and links.
/// `**` must run before `*` so bold is not read as two italics.
const DELIMITERS: &[(&str, fn(String) -> Span)] = &[
    ("**", Span::Bold),
    ("*", Span::Italic),
    ("_", Span::Italic),
    ("`", Span::Code),
];

/// Split inline markdown into styled spans.
///
/// Images and links are pulled out first so that emphasis characters in
/// their URLs are never treated as delimiters.
pub fn split(text: &str) -> Result<Vec<Span>> {
    let mut spans = vec![Span::Text(text.to_string())];
    spans = split_images(spans);
    spans = split_links(spans);
    for &(delimiter, style) in DELIMITERS {
        spans = split_delimiter(spans, delimiter, style)?;
    }
    Ok(spans)
}

/// Replace every `![alt](url)` in the text spans with an image span.
pub fn split_images(spans: Vec<Span>) -> Vec<Span> {
    split_matches(spans, &IMAGE_REGEX, |_, caps| {
        Some(Span::Image {
            alt: caps[1].to_string(),
            url: caps[2].to_string(),
        })
    })
}

/// Replace every `[text](url)` in the text spans with a link span.
pub fn split_links(spans: Vec<Span>) -> Vec<Span> {
    split_matches(spans, &LINK_REGEX, |before, caps| {
        // `![...](...)` that survived the image pass stays literal
        if before.ends_with('!') {
            return None;
        }
        Some(Span::Link {
            text: caps[1].to_string(),
            url: caps[2].to_string(),
        })
    })
}

/// Split text spans on a paired delimiter.
///
/// Fragments between delimiter occurrences become `style` spans; the rest
/// stay text. Empty fragments are dropped. An odd number of delimiters is
/// an error.
pub fn split_delimiter(
    spans: Vec<Span>,
    delimiter: &'static str,
    style: fn(String) -> Span,
) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Text(text) = span else {
            out.push(span);
            continue;
        };

        if text.matches(delimiter).count() % 2 != 0 {
            return Err(Error::UnmatchedDelimiter { delimiter, text });
        }

        for (i, part) in text.split(delimiter).enumerate() {
            if part.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                out.push(Span::Text(part.to_string()));
            } else {
                out.push(style(part.to_string()));
            }
        }
    }

    Ok(out)
}

/// `(alt, url)` for every image in `text`.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    IMAGE_REGEX
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// `(text, url)` for every link in `text`, images excluded.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    LINK_REGEX
        .captures_iter(text)
        .filter(|caps| {
            let start = caps.get(0).map_or(0, |m| m.start());
            !text[..start].ends_with('!')
        })
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Shared scan for the image and link passes.
///
/// `to_span` gets the text preceding the match and its captures; returning
/// `None` leaves the match in place as text.
fn split_matches<F>(spans: Vec<Span>, pattern: &Regex, to_span: F) -> Vec<Span>
where
    F: Fn(&str, &Captures) -> Option<Span>,
{
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Text(text) = span else {
            out.push(span);
            continue;
        };

        let mut last = 0;
        for caps in pattern.captures_iter(&text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let Some(matched) = to_span(&text[..whole.start()], &caps) else {
                continue;
            };
            if whole.start() > last {
                out.push(Span::Text(text[last..whole.start()].to_string()));
            }
            out.push(matched);
            last = whole.end();
        }

        if last < text.len() {
            out.push(Span::Text(text[last..].to_string()));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn code(s: &str) -> Span {
        Span::Code(s.to_string())
    }

    #[test]
    fn code_spans() {
        let spans = split("This is `code` and `more code` here.").unwrap();
        assert_eq!(
            spans,
            vec![
                text("This is "),
                code("code"),
                text(" and "),
                code("more code"),
                text(" here."),
            ]
        );
    }

    #[test]
    fn image_extraction() {
        let spans = split_images(vec![text(
            "This is text with an ![image](https://i.imgur.com/zjjcJKZ.png)",
        )]);
        assert_eq!(
            spans,
            vec![
                text("This is text with an "),
                Span::Image {
                    alt: "image".into(),
                    url: "https://i.imgur.com/zjjcJKZ.png".into(),
                },
            ]
        );
    }

    #[test]
    fn images_and_links_are_not_confused() {
        let spans = split("![cat](/cat.png) and [home](/index.html)").unwrap();
        assert_eq!(
            spans,
            vec![
                Span::Image {
                    alt: "cat".into(),
                    url: "/cat.png".into(),
                },
                text(" and "),
                Span::Link {
                    text: "home".into(),
                    url: "/index.html".into(),
                },
            ]
        );
    }

    #[test]
    fn adjacent_links() {
        let spans = split_links(vec![text("[a](/a)[b](/b)")]);
        assert_eq!(
            spans,
            vec![
                Span::Link {
                    text: "a".into(),
                    url: "/a".into(),
                },
                Span::Link {
                    text: "b".into(),
                    url: "/b".into(),
                },
            ]
        );
    }

    #[test]
    fn link_pass_skips_bang_prefixed_brackets() {
        // Not an image (empty alt is rejected), and not a link either
        let spans = split_links(vec![text("see ![x](y")]);
        assert_eq!(spans, vec![text("see ![x](y")]);

        let spans = split_links(vec![text("!![x](y)")]);
        assert_eq!(spans, vec![text("!![x](y)")]);
    }

    #[test]
    fn bold_runs_before_italic() {
        let spans = split("**bold** and *italic*").unwrap();
        assert_eq!(
            spans,
            vec![
                Span::Bold("bold".into()),
                text(" and "),
                Span::Italic("italic".into()),
            ]
        );
    }

    #[test]
    fn underscore_italic() {
        let spans = split("an _emphasised_ word").unwrap();
        assert_eq!(
            spans,
            vec![text("an "), Span::Italic("emphasised".into()), text(" word")]
        );
    }

    #[test]
    fn delimiters_inside_urls_are_ignored() {
        let spans = split("[snake](https://example.com/a_b*c)").unwrap();
        assert_eq!(
            spans,
            vec![Span::Link {
                text: "snake".into(),
                url: "https://example.com/a_b*c".into(),
            }]
        );
    }

    #[test]
    fn styled_spans_pass_through_later_passes() {
        let spans = split("**a_b**").unwrap();
        assert_eq!(spans, vec![Span::Bold("a_b".into())]);
    }

    #[rstest]
    #[case("an **unclosed bold", "**")]
    #[case("one * star", "*")]
    #[case("snake_case", "_")]
    #[case("tick ` here", "`")]
    fn unmatched_delimiter(#[case] input: &str, #[case] delimiter: &str) {
        match split(input) {
            Err(Error::UnmatchedDelimiter {
                delimiter: found, ..
            }) => assert_eq!(found, delimiter),
            other => panic!("expected unmatched delimiter, got {other:?}"),
        }
    }

    #[test]
    fn unmatched_delimiter_names_the_fragment() {
        let err = split("[ok](/x) then *broken").unwrap_err();
        assert_eq!(
            err,
            Error::UnmatchedDelimiter {
                delimiter: "*",
                text: " then *broken".into(),
            }
        );
    }

    #[test]
    fn empty_fragments_are_dropped() {
        assert!(split("``").unwrap().is_empty());
        assert!(split("").unwrap().is_empty());
    }

    #[rstest]
    #[case("plain words only")]
    #[case("**b** _i_ `c` *j*")]
    #[case("a [link](/l) and ![img](/i.png) mixed with **bold**")]
    fn visible_text_is_preserved(#[case] input: &str) {
        let visible: String = split(input)
            .unwrap()
            .iter()
            .map(|span| span.content().to_string())
            .collect();
        let expected = input
            .replace("**", "")
            .replace(['*', '_', '`'], "")
            .replace("[link](/l)", "link")
            .replace("![img](/i.png)", "img");
        assert_eq!(visible, expected);
    }

    #[test]
    fn extract_helpers() {
        let md = "![one](/1.png) [two](/2) ![three](/3.png)";
        assert_eq!(
            extract_images(md),
            vec![
                ("one".to_string(), "/1.png".to_string()),
                ("three".to_string(), "/3.png".to_string()),
            ]
        );
        assert_eq!(
            extract_links(md),
            vec![("two".to_string(), "/2".to_string())]
        );
    }
}
