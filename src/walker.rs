//! Tree walker: converts the main-content subtree into an ordered sequence
//! of layout blocks.
//!
//! Dispatch runs in document order over a fixed whitelist of element kinds.
//! Node identity (`ego_tree::NodeId`) drives the visited set, so a node
//! consumed as part of an ancestor's conversion is never re-walked; code
//! payloads additionally dedup by normalized content, because the same code
//! text routinely appears on both a `<pre>` wrapper and its `<code>` child.

use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::ElementRef;
use tracing::{debug, trace};

use crate::blocks::Block;
use crate::cleanup;
use crate::inline;

/// Per-call conversion state. A fresh context is created for every run so
/// dedup never leaks across conversions.
#[derive(Debug, Default)]
struct ConversionContext {
    visited: HashSet<NodeId>,
    seen_code: HashSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Heading(u8),
    Container,
    Code,
    List { ordered: bool },
}

fn classify(tag: &str) -> Option<NodeKind> {
    match tag {
        "h1" => Some(NodeKind::Heading(1)),
        "h2" => Some(NodeKind::Heading(2)),
        "h3" => Some(NodeKind::Heading(3)),
        "h4" => Some(NodeKind::Heading(4)),
        "h5" => Some(NodeKind::Heading(5)),
        "h6" => Some(NodeKind::Heading(6)),
        "p" | "div" => Some(NodeKind::Container),
        "pre" | "code" => Some(NodeKind::Code),
        "ul" => Some(NodeKind::List { ordered: false }),
        "ol" => Some(NodeKind::List { ordered: true }),
        _ => None,
    }
}

/// Walk the content container and produce the ordered block sequence.
///
/// After each node's non-empty block group a `Spacer` is appended.
pub fn walk_content(root: ElementRef<'_>) -> Vec<Block> {
    let mut ctx = ConversionContext::default();
    let mut blocks = Vec::new();

    for node in root.descendants().skip(1) {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        let Some(kind) = classify(element.value().name()) else {
            continue;
        };
        if ctx.visited.contains(&element.id()) {
            continue;
        }
        // Content under an already-converted node was subsumed into that
        // conversion; never emit it a second time.
        if node.ancestors().any(|ancestor| ctx.visited.contains(&ancestor.id())) {
            continue;
        }
        // Nested lists and list-item paragraphs are produced exclusively by
        // the enclosing list's expansion.
        if matches!(kind, NodeKind::List { .. } | NodeKind::Container) && inside_list(element) {
            continue;
        }

        let before = blocks.len();
        match kind {
            NodeKind::Heading(level) => convert_heading(element, level, &mut blocks),
            NodeKind::Code => convert_code(element, &mut ctx, &mut blocks),
            NodeKind::List { ordered } => expand_list(element, ordered, 1, &mut blocks),
            NodeKind::Container => convert_container(element, &mut ctx, &mut blocks),
        }
        ctx.visited.insert(element.id());
        if blocks.len() > before {
            blocks.push(Block::Spacer);
        }
    }

    debug!(blocks = blocks.len(), "content walk complete");
    blocks
}

fn inside_list(element: ElementRef<'_>) -> bool {
    element.ancestors().any(|ancestor| {
        ancestor
            .value()
            .as_element()
            .is_some_and(|el| matches!(el.name(), "ul" | "ol" | "li"))
    })
}

fn convert_heading(element: ElementRef<'_>, level: u8, out: &mut Vec<Block>) {
    let raw: String = element.text().collect();
    let stripped = cleanup::strip_pictographs(&raw);
    let text = cleanup::collapse_whitespace(cleanup::truncate_at_permalink(&stripped));
    if text.is_empty() {
        return;
    }
    let anchor = element.value().attr("id").map(str::to_owned);
    out.push(Block::Heading { level, text, anchor });
}

fn convert_code(element: ElementRef<'_>, ctx: &mut ConversionContext, out: &mut Vec<Block>) {
    let raw: String = element.text().collect();
    let normalized = cleanup::normalize_code_text(&raw);
    if normalized.is_empty() {
        return;
    }
    if !ctx.seen_code.insert(normalized.clone()) {
        trace!("suppressing duplicate code payload");
        return;
    }
    let text = cleanup::escape_markup(&normalized).replace('\n', "<br/>");
    out.push(Block::CodeBlock { text });
}

/// Paragraphs and generic containers. A subtree with no code descendant
/// yields one paragraph; otherwise the node's own non-code inline content
/// becomes a paragraph and each code descendant its own code block, in
/// document order.
fn convert_container(element: ElementRef<'_>, ctx: &mut ConversionContext, out: &mut Vec<Block>) {
    let code_descendants: Vec<ElementRef<'_>> = element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "pre" | "code"))
        .collect();

    let rich_text = inline::format_inline(element);
    if !rich_text.is_empty() {
        out.push(Block::Paragraph { rich_text });
    }
    for code in code_descendants {
        convert_code(code, ctx, out);
    }
}

/// Expand a list's direct items, flattening any nested list immediately
/// after its parent item with an incremented nesting depth. Ordinals are
/// 1-based positions among the item's siblings.
fn expand_list(list: ElementRef<'_>, ordered: bool, depth: usize, out: &mut Vec<Block>) {
    let mut position = 0;
    for child in list.children().filter_map(ElementRef::wrap) {
        if child.value().name() != "li" {
            continue;
        }
        position += 1;
        let text = inline::format_list_item(child);
        if !text.is_empty() {
            out.push(Block::ListItem {
                text,
                ordered,
                ordinal: ordered.then_some(position),
                depth,
            });
        }
        for nested in child.children().filter_map(ElementRef::wrap) {
            match nested.value().name() {
                "ul" => expand_list(nested, false, depth + 1, out),
                "ol" => expand_list(nested, true, depth + 1, out),
                _ => {}
            }
        }
    }
}
