//! Glyph system for TUI rendering
//!
//! Provides support for both classic ASCII and Unicode block characters.

use delve_core::{Glyph, Grid};
use strum::{Display, EnumString, VariantNames};

/// Available graphics modes for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Default)]
#[strum(serialize_all = "lowercase")]
pub enum GraphicsMode {
    /// Plain ASCII characters.
    Classic,
    /// Unicode block and dot characters.
    Unicode,
    /// Automatically detect support.
    #[default]
    Auto,
}

/// Set of characters used for rendering map glyphs.
pub trait GlyphSet: Send + Sync {
    fn glyph_char(&self, glyph: Glyph) -> char;
}

/// ASCII glyph set.
pub struct ClassicGlyphs;

impl GlyphSet for ClassicGlyphs {
    fn glyph_char(&self, glyph: Glyph) -> char {
        match glyph {
            Glyph::Wall => '#',
            Glyph::Floor => ' ',
            Glyph::Start => '<',
            Glyph::Finish => '>',
            Glyph::Explored => '.',
            Glyph::Player => '@',
        }
    }
}

/// Unicode glyph set, the default symbols of [`Glyph`].
pub struct UnicodeGlyphs;

impl GlyphSet for UnicodeGlyphs {
    fn glyph_char(&self, glyph: Glyph) -> char {
        glyph.symbol()
    }
}

/// Plain-text rendering of a glyph grid, one string per row
pub fn glyph_lines(glyphs: &Grid<Glyph>, glyph_set: &dyn GlyphSet) -> Vec<String> {
    glyphs.to_lines(|glyph| glyph_set.glyph_char(glyph))
}

/// Detect if the terminal supports Unicode/UTF-8.
pub fn supports_unicode() -> bool {
    effective_locale(|var| std::env::var(var).ok()).is_some_and(|val| locale_is_utf8(&val))
}

/// Character-type locale in POSIX precedence: the first of `LC_ALL`,
/// `LC_CTYPE` and `LANG` that is set and non-empty
fn effective_locale(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .into_iter()
        .filter_map(lookup)
        .find(|val| !val.is_empty())
}

fn locale_is_utf8(value: &str) -> bool {
    let upper = value.to_uppercase();
    upper.contains("UTF-8") || upper.contains("UTF8")
}

/// Returns the best available glyph set for the current environment.
pub fn detect_glyph_set(mode: GraphicsMode) -> Box<dyn GlyphSet> {
    match mode {
        GraphicsMode::Classic => Box::new(ClassicGlyphs),
        GraphicsMode::Unicode => Box::new(UnicodeGlyphs),
        GraphicsMode::Auto => {
            if supports_unicode() {
                Box::new(UnicodeGlyphs)
            } else {
                Box::new(ClassicGlyphs)
            }
        }
    }
}
