//! Style registry: a fixed, declarative table of named paragraph styles.
//!
//! The registry is rebuilt fresh for every conversion run. Construction is a
//! pure function of the table below, so building twice yields equivalent
//! definitions and duplicate-registration can't occur.

use std::collections::HashMap;

/// Base body font size; inline `<font>` runs only count as enlarged above this.
pub const BODY_FONT_SIZE: f32 = 10.0;

/// Deepest bullet style available. Overflow nesting clamps here.
pub const MAX_BULLET_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
}

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

pub const TEXT_BLACK: Color = Color { r: 0.07, g: 0.07, b: 0.07 };

/// Accent color for hyperlink spans.
pub const LINK_ACCENT: Color = Color { r: 0.13, g: 0.38, b: 0.68 };

const CODE_TEXT: Color = Color { r: 0.16, g: 0.16, b: 0.18 };
const CODE_PANEL: Color = Color { r: 0.94, g: 0.94, b: 0.96 };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub font: Font,
    pub size: f32,
    /// Baseline-to-baseline line height.
    pub leading: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub color: Color,
    pub background: Option<Color>,
}

const fn text_style(font: Font, size: f32, leading: f32, space_after: f32) -> ParagraphStyle {
    ParagraphStyle {
        font,
        size,
        leading,
        space_after,
        left_indent: 0.0,
        color: TEXT_BLACK,
        background: None,
    }
}

const fn bullet_style(left_indent: f32) -> ParagraphStyle {
    ParagraphStyle {
        font: Font::Helvetica,
        size: BODY_FONT_SIZE,
        leading: 13.0,
        space_after: 2.0,
        left_indent,
        color: TEXT_BLACK,
        background: None,
    }
}

/// The full set of recognized style names.
const STYLE_TABLE: &[(&str, ParagraphStyle)] = &[
    ("Heading1", text_style(Font::HelveticaBold, 18.0, 22.0, 6.0)),
    ("Heading2", text_style(Font::HelveticaBold, 16.0, 20.0, 5.0)),
    ("Heading3", text_style(Font::HelveticaBold, 14.0, 17.0, 4.0)),
    ("Heading4", text_style(Font::HelveticaBold, 12.0, 15.0, 4.0)),
    ("Heading5", text_style(Font::HelveticaBold, 11.0, 14.0, 3.0)),
    ("Heading6", text_style(Font::HelveticaOblique, 10.0, 13.0, 3.0)),
    ("Body", text_style(Font::Helvetica, BODY_FONT_SIZE, 14.0, 0.0)),
    (
        "Code",
        ParagraphStyle {
            font: Font::Courier,
            size: 8.5,
            leading: 11.0,
            space_after: 4.0,
            left_indent: 0.0,
            color: CODE_TEXT,
            background: Some(CODE_PANEL),
        },
    ),
    ("Bullet1", bullet_style(18.0)),
    ("Bullet2", bullet_style(36.0)),
    ("Bullet3", bullet_style(54.0)),
    // Leading doubles as the vertical gap a Spacer block produces.
    ("Spacer", text_style(Font::Helvetica, 0.0, 10.0, 0.0)),
];

/// Mapping from style name to paragraph style, built once per conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRegistry {
    styles: HashMap<&'static str, ParagraphStyle>,
}

impl StyleRegistry {
    /// Build the registry from the declarative table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            styles: STYLE_TABLE.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParagraphStyle> {
        self.styles.get(name)
    }

    /// Heading style for a level, clamped to the supported 1..=6 range.
    #[must_use]
    pub fn heading(&self, level: u8) -> &ParagraphStyle {
        let level = level.clamp(1, 6);
        self.styles
            .get(format!("Heading{level}").as_str())
            .expect("BUG: built-in style table is missing a heading style")
    }

    #[must_use]
    pub fn body(&self) -> &ParagraphStyle {
        self.styles
            .get("Body")
            .expect("BUG: built-in style table is missing 'Body'")
    }

    #[must_use]
    pub fn code(&self) -> &ParagraphStyle {
        self.styles
            .get("Code")
            .expect("BUG: built-in style table is missing 'Code'")
    }

    /// Bullet style for a nesting depth; depths beyond the deepest supported
    /// style clamp rather than fail.
    #[must_use]
    pub fn bullet(&self, depth: usize) -> &ParagraphStyle {
        let depth = depth.clamp(1, MAX_BULLET_DEPTH);
        self.styles
            .get(format!("Bullet{depth}").as_str())
            .expect("BUG: built-in style table is missing a bullet style")
    }

    /// Vertical gap produced by a `Spacer` block.
    #[must_use]
    pub fn spacer_height(&self) -> f32 {
        self.styles
            .get("Spacer")
            .expect("BUG: built-in style table is missing 'Spacer'")
            .leading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_is_idempotent() {
        assert_eq!(StyleRegistry::builtin(), StyleRegistry::builtin());
    }

    #[test]
    fn all_recognized_names_resolve() {
        let registry = StyleRegistry::builtin();
        for (name, _) in STYLE_TABLE {
            assert!(registry.get(name).is_some(), "missing style {name}");
        }
    }

    #[test]
    fn heading_levels_clamp_to_supported_range() {
        let registry = StyleRegistry::builtin();
        assert_eq!(registry.heading(0), registry.heading(1));
        assert_eq!(registry.heading(9), registry.heading(6));
        assert!(registry.heading(1).size > registry.heading(6).size);
    }

    #[test]
    fn bullet_depth_clamps_instead_of_failing() {
        let registry = StyleRegistry::builtin();
        assert_eq!(registry.bullet(17), registry.bullet(MAX_BULLET_DEPTH));
        assert!(registry.bullet(2).left_indent > registry.bullet(1).left_indent);
    }

    #[test]
    fn code_style_is_monospace_with_panel() {
        let registry = StyleRegistry::builtin();
        let code = registry.code();
        assert_eq!(code.font, Font::Courier);
        assert!(code.background.is_some());
    }
}
