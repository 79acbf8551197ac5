//! Page layout: places block content onto US-Letter pages.
//!
//! Line wrapping is greedy and width estimation is a fixed per-font average
//! glyph width; exact font metrics and smarter page breaking are explicitly
//! outside this renderer's contract.

use crate::blocks::Block;
use crate::styles::{Color, Font, ParagraphStyle, StyleRegistry, LINK_ACCENT};

use super::rich_text::{parse_rich_text, Piece};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 72.0;

const CODE_PADDING: f32 = 6.0;
const UNDERLINE_DROP: f32 = 1.8;
const UNDERLINE_THICKNESS: f32 = 0.5;

/// A positioned run of same-styled text. `y` is the text baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub font: Font,
    pub size: f32,
    pub color: Color,
    pub text: String,
}

/// A filled rectangle (code panel or link underline), anchored bottom-left.
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

/// One laid-out page. Rectangles paint before text.
#[derive(Debug, Default)]
pub struct Page {
    pub rects: Vec<RectShape>,
    pub runs: Vec<TextRun>,
}

/// An outline (bookmark) entry pointing at a heading's position.
#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub title: String,
    pub page: usize,
    pub y: f32,
}

#[derive(Debug)]
pub struct LaidOut {
    pub pages: Vec<Page>,
    pub bookmarks: Vec<Bookmark>,
}

/// Estimated advance width of `text` at the given font and size.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let factor = match font {
        Font::Courier => 0.60,
        Font::HelveticaBold => 0.55,
        Font::Helvetica | Font::HelveticaOblique => 0.50,
    };
    text.chars().count() as f32 * factor * size
}

/// Marker text preceding a list item's content.
pub fn list_marker(ordered: bool, ordinal: Option<usize>) -> String {
    match (ordered, ordinal) {
        (true, Some(n)) => format!("{n}."),
        _ => "\u{2022}".to_string(),
    }
}

/// One wrappable word with resolved styling.
#[derive(Debug, Clone)]
struct Word {
    text: String,
    font: Font,
    size: f32,
    color: Color,
    underline: bool,
}

#[derive(Debug, Clone)]
enum Token {
    Word(Word),
    Break,
}

struct LayoutCursor<'a> {
    styles: &'a StyleRegistry,
    pages: Vec<Page>,
    bookmarks: Vec<Bookmark>,
    /// Distance from the page bottom to the next unused line slot.
    y: f32,
}

impl<'a> LayoutCursor<'a> {
    fn new(styles: &'a StyleRegistry) -> Self {
        Self {
            styles,
            pages: vec![Page::default()],
            bookmarks: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn page(&mut self) -> &mut Page {
        self.pages
            .last_mut()
            .expect("BUG: layout cursor always holds at least one page")
    }

    fn page_break(&mut self) {
        self.pages.push(Page::default());
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Break the page unless `needed` vertical space remains.
    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            self.page_break();
        }
    }

    fn tokenize(&self, rich_text: &str, style: &ParagraphStyle) -> Vec<Token> {
        let mut tokens = Vec::new();
        for piece in parse_rich_text(rich_text) {
            match piece {
                Piece::LineBreak => tokens.push(Token::Break),
                Piece::Run(span) => {
                    let (color, underline) = if span.link.is_some() {
                        (LINK_ACCENT, true)
                    } else {
                        (style.color, false)
                    };
                    let size = span.size_override.unwrap_or(style.size);
                    for word in span.text.split_whitespace() {
                        tokens.push(Token::Word(Word {
                            text: word.to_string(),
                            font: style.font,
                            size,
                            color,
                            underline,
                        }));
                    }
                }
            }
        }
        tokens
    }

    fn emit_line(&mut self, line: &[Word], style: &ParagraphStyle, left: f32) {
        if line.is_empty() {
            return;
        }
        self.ensure_room(style.leading);
        self.y -= style.leading;
        let baseline = self.y;
        let space = text_width(" ", style.font, style.size);
        let mut x = left;
        for (index, word) in line.iter().enumerate() {
            if index > 0 {
                x += space;
            }
            let width = text_width(&word.text, word.font, word.size);
            if word.underline {
                self.page().rects.push(RectShape {
                    x,
                    y: baseline - UNDERLINE_DROP,
                    width,
                    height: UNDERLINE_THICKNESS,
                    color: word.color,
                });
            }
            self.page().runs.push(TextRun {
                x,
                y: baseline,
                font: word.font,
                size: word.size,
                color: word.color,
                text: word.text.clone(),
            });
            x += width;
        }
    }

    /// Greedy word wrap of tokenized rich text into lines.
    fn lay_out_tokens(&mut self, tokens: &[Token], style: &ParagraphStyle) {
        let left = MARGIN + style.left_indent;
        let max_width = PAGE_WIDTH - MARGIN - left;
        let space = text_width(" ", style.font, style.size);

        let mut line: Vec<Word> = Vec::new();
        let mut line_width = 0.0;
        for token in tokens {
            match token {
                Token::Break => {
                    self.emit_line(&line, style, left);
                    line.clear();
                    line_width = 0.0;
                }
                Token::Word(word) => {
                    let width = text_width(&word.text, word.font, word.size);
                    if width > max_width {
                        // A single word wider than the column: flush, then
                        // hard-split it across full lines.
                        self.emit_line(&line, style, left);
                        line.clear();
                        line_width = 0.0;
                        let per_char = width / word.text.chars().count().max(1) as f32;
                        let chunk_chars = ((max_width / per_char) as usize).max(1);
                        for part in hard_wrap(&word.text, chunk_chars) {
                            let mut piece = word.clone();
                            piece.text = part;
                            self.emit_line(&[piece], style, left);
                        }
                        continue;
                    }
                    let joined = if line.is_empty() { 0.0 } else { space };
                    if !line.is_empty() && line_width + joined + width > max_width {
                        self.emit_line(&line, style, left);
                        line.clear();
                        line_width = 0.0;
                    }
                    line_width += if line.is_empty() { width } else { joined + width };
                    line.push(word.clone());
                }
            }
        }
        self.emit_line(&line, style, left);
        self.y -= style.space_after;
    }

    fn lay_out_rich(&mut self, rich_text: &str, style: &ParagraphStyle) {
        let tokens = self.tokenize(rich_text, style);
        self.lay_out_tokens(&tokens, style);
    }

    fn lay_out_heading(&mut self, level: u8, text: &str, anchor: Option<&str>) {
        let style = *self.styles.heading(level);
        // Keep the bookmark on the page the first line actually lands on.
        self.ensure_room(style.leading);
        if anchor.is_some() {
            self.bookmarks.push(Bookmark {
                title: text.to_string(),
                page: self.pages.len() - 1,
                y: self.y,
            });
        }
        let tokens: Vec<Token> = text
            .split_whitespace()
            .map(|word| {
                Token::Word(Word {
                    text: word.to_string(),
                    font: style.font,
                    size: style.size,
                    color: style.color,
                    underline: false,
                })
            })
            .collect();
        self.lay_out_tokens(&tokens, &style);
    }

    fn lay_out_list_item(&mut self, text: &str, ordered: bool, ordinal: Option<usize>, depth: usize) {
        let style = *self.styles.bullet(depth);
        let mut tokens = vec![Token::Word(Word {
            text: list_marker(ordered, ordinal),
            font: style.font,
            size: style.size,
            color: style.color,
            underline: false,
        })];
        tokens.extend(self.tokenize(text, &style));
        self.lay_out_tokens(&tokens, &style);
    }

    /// Code blocks keep their explicit line structure, hard-wrapping only
    /// overlong lines, and draw a tinted panel behind each page's segment.
    fn lay_out_code(&mut self, text: &str) {
        let style = *self.styles.code();
        let mut lines: Vec<String> = vec![String::new()];
        for piece in parse_rich_text(text) {
            match piece {
                Piece::LineBreak => lines.push(String::new()),
                Piece::Run(span) => {
                    if let Some(last) = lines.last_mut() {
                        last.push_str(&span.text);
                    }
                }
            }
        }

        let max_width = PAGE_WIDTH - 2.0 * MARGIN - 2.0 * CODE_PADDING;
        let max_chars = (max_width / (0.60 * style.size)).max(1.0) as usize;
        let wrapped: Vec<String> = lines
            .iter()
            .flat_map(|line| hard_wrap(line, max_chars))
            .collect();

        let mut panel_top: Option<f32> = None;
        for line in &wrapped {
            if self.y - style.leading - CODE_PADDING < MARGIN {
                self.close_panel(panel_top.take(), &style);
                self.page_break();
            }
            if panel_top.is_none() {
                panel_top = Some(self.y);
            }
            self.y -= style.leading;
            let baseline = self.y;
            self.page().runs.push(TextRun {
                x: MARGIN + CODE_PADDING,
                y: baseline,
                font: style.font,
                size: style.size,
                color: style.color,
                text: line.clone(),
            });
        }
        self.close_panel(panel_top, &style);
        self.y -= style.space_after;
    }

    fn close_panel(&mut self, panel_top: Option<f32>, style: &ParagraphStyle) {
        let (Some(top), Some(color)) = (panel_top, style.background) else {
            return;
        };
        let bottom = self.y - CODE_PADDING;
        self.page().rects.push(RectShape {
            x: MARGIN,
            y: bottom,
            width: PAGE_WIDTH - 2.0 * MARGIN,
            height: top - bottom,
            color,
        });
    }

    fn finish(self) -> LaidOut {
        LaidOut {
            pages: self.pages,
            bookmarks: self.bookmarks,
        }
    }
}

/// Lay the block sequence onto pages.
pub fn lay_out(blocks: &[Block], styles: &StyleRegistry) -> LaidOut {
    let mut cursor = LayoutCursor::new(styles);
    for block in blocks {
        match block {
            Block::Heading { level, text, anchor } => {
                cursor.lay_out_heading(*level, text, anchor.as_deref());
            }
            Block::Paragraph { rich_text } => {
                let style = *styles.body();
                cursor.lay_out_rich(rich_text, &style);
            }
            Block::CodeBlock { text } => cursor.lay_out_code(text),
            Block::ListItem {
                text,
                ordered,
                ordinal,
                depth,
            } => cursor.lay_out_list_item(text, *ordered, *ordinal, *depth),
            Block::Spacer => cursor.y -= styles.spacer_height(),
        }
    }
    cursor.finish()
}

fn hard_wrap(line: &str, max_chars: usize) -> Vec<String> {
    if line.chars().count() <= max_chars {
        return vec![line.to_string()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
