//! Inline content formatting: mixed text and markup to a single rich-text
//! string in the renderer's mini-markup.
//!
//! Anchors become `<link href="…">` spans (fragment targets keep only the
//! fragment identifier, external targets keep the href verbatim). Spans with
//! an inline style larger than the body font size become `<font size="…">`
//! runs. Pre-formatted/code subtrees are excluded entirely; they belong to
//! the code-block rule.

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Node;
use scraper::ElementRef;
use std::sync::LazyLock;

use crate::cleanup;
use crate::styles::BODY_FONT_SIZE;

static FONT_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"font-size:\s*([0-9]+(?:\.[0-9]+)?)")
        .expect("BUG: hardcoded font-size regex is invalid")
});

/// Format the inline content of a paragraph-like element.
pub fn format_inline(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        append_node(child, &mut out, false);
    }
    finish(&out)
}

/// Format the inline content of a list item. Nested list containers are
/// excluded; the list expansion emits them as their own items.
pub fn format_list_item(item: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in item.children() {
        append_node(child, &mut out, true);
    }
    finish(&out)
}

fn finish(out: &str) -> String {
    cleanup::collapse_whitespace(&cleanup::strip_pictographs(out))
}

fn append_node(node: NodeRef<'_, Node>, out: &mut String, skip_lists: bool) {
    match node.value() {
        Node::Text(text) => out.push_str(&cleanup::escape_markup(text)),
        Node::Element(_) => {
            let Some(element) = ElementRef::wrap(node) else {
                return;
            };
            match element.value().name() {
                "pre" | "code" => {}
                "ul" | "ol" if skip_lists => {}
                "a" => append_link(element, out),
                "span" => append_span(element, out, skip_lists),
                _ => {
                    for child in element.children() {
                        append_node(child, out, skip_lists);
                    }
                }
            }
        }
        _ => {}
    }
}

/// Hyperlink span. Visible text is the anchor's concatenated text content;
/// an anchor with no usable text or no href degrades to plain text.
fn append_link(element: ElementRef<'_>, out: &mut String) {
    let label: String = element.text().collect();
    let label = cleanup::escape_markup(label.trim());
    if label.is_empty() {
        return;
    }
    match element.value().attr("href") {
        Some(href) if !href.is_empty() => {
            let target = match href.split_once('#') {
                // Fragment-only target: keep just the fragment identifier.
                Some(("", fragment)) => format!("#{fragment}"),
                _ => href.to_string(),
            };
            out.push_str("<link href=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(&target));
            out.push_str("\">");
            out.push_str(&label);
            out.push_str("</link>");
        }
        _ => out.push_str(&label),
    }
}

fn append_span(element: ElementRef<'_>, out: &mut String, skip_lists: bool) {
    let enlarged = element
        .value()
        .attr("style")
        .and_then(|style| FONT_SIZE_RE.captures(style))
        .and_then(|captures| captures[1].parse::<f32>().ok())
        .filter(|size| *size > BODY_FONT_SIZE);

    if let Some(size) = enlarged {
        out.push_str(&format!("<font size=\"{size}\">"));
        for child in element.children() {
            append_node(child, out, skip_lists);
        }
        out.push_str("</font>");
    } else {
        for child in element.children() {
            append_node(child, out, skip_lists);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn format_first_p(html: &str) -> String {
        let document = Html::parse_fragment(html);
        let selector = Selector::parse("p").expect("selector");
        let element = document.select(&selector).next().expect("no <p> in fixture");
        format_inline(element)
    }

    #[test]
    fn plain_text_passes_through_escaped() {
        assert_eq!(format_first_p("<p>a &lt; b</p>"), "a &lt; b");
    }

    #[test]
    fn internal_link_keeps_fragment_identifier() {
        let rich = format_first_p(r##"<p>see <a href="#section-2">see here</a></p>"##);
        assert_eq!(rich, r##"see <link href="#section-2">see here</link>"##);
    }

    #[test]
    fn external_link_keeps_href_verbatim() {
        let rich = format_first_p(r#"<p><a href="https://example.com/a#frag">docs</a></p>"#);
        assert_eq!(
            rich,
            r#"<link href="https://example.com/a#frag">docs</link>"#
        );
    }

    #[test]
    fn anchor_without_href_degrades_to_text() {
        assert_eq!(format_first_p("<p><a>just text</a></p>"), "just text");
    }

    #[test]
    fn enlarged_span_becomes_font_run() {
        let rich = format_first_p(r#"<p><span style="font-size: 14px">big</span></p>"#);
        assert_eq!(rich, r#"<font size="14">big</font>"#);
    }

    #[test]
    fn small_and_unstyled_spans_pass_through() {
        assert_eq!(
            format_first_p(r#"<p><span style="font-size: 9px">small</span></p>"#),
            "small"
        );
        assert_eq!(format_first_p(r#"<p><span class="x">plain</span></p>"#), "plain");
    }

    #[test]
    fn code_subtrees_are_excluded() {
        let rich = format_first_p("<p>before <code>let x = 1;</code> after</p>");
        assert_eq!(rich, "before after");
    }

    #[test]
    fn pictographs_are_stripped_from_inline_text() {
        let rich = format_first_p("<p>ship it \u{1F680} today</p>");
        assert_eq!(rich, "ship it today");
    }

    #[test]
    fn list_item_formatting_skips_nested_lists() {
        let document = Html::parse_fragment("<ul><li>A<ul><li>B</li></ul></li></ul>");
        let selector = Selector::parse("li").expect("selector");
        let item = document.select(&selector).next().expect("no <li> in fixture");
        assert_eq!(format_list_item(item), "A");
    }

    #[test]
    fn list_item_recurses_into_paragraph_children() {
        let document = Html::parse_fragment("<ul><li><p>wrapped text</p></li></ul>");
        let selector = Selector::parse("li").expect("selector");
        let item = document.select(&selector).next().expect("no <li> in fixture");
        assert_eq!(format_list_item(item), "wrapped text");
    }
}
