//! Map display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use delve_core::{Glyph, Grid, Pos};

use crate::display::GlyphSet;
use crate::theme::Theme;

/// Widget for rendering a grid of glyphs inside a bordered block
///
/// Without a focus the grid is drawn from its top-left corner; with one, the
/// drawn part is centred on the focus position.
pub struct MapWidget<'a> {
    glyphs: &'a Grid<Glyph>,
    glyph_set: &'a dyn GlyphSet,
    theme: &'a Theme,
    title: &'a str,
    focus: Option<Pos>,
}

impl<'a> MapWidget<'a> {
    pub fn new(glyphs: &'a Grid<Glyph>, glyph_set: &'a dyn GlyphSet, theme: &'a Theme) -> Self {
        Self {
            glyphs,
            glyph_set,
            theme,
            title: "",
            focus: None,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn focus(mut self, pos: Pos) -> Self {
        self.focus = Some(pos);
        self
    }

    fn origin(&self, inner: Rect) -> Pos {
        match self.focus {
            Some(pos) => Pos::new(
                pos.row.saturating_sub(usize::from(inner.height) / 2),
                pos.col.saturating_sub(usize::from(inner.width) / 2),
            ),
            None => Pos::new(0, 0),
        }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(self.title);

        let inner = block.inner(area);
        block.render(area, buf);

        let origin = self.origin(inner);
        for y in 0..inner.height {
            for x in 0..inner.width {
                let pos = Pos::new(origin.row + usize::from(y), origin.col + usize::from(x));
                let Some(glyph) = self.glyphs.get(pos) else {
                    continue;
                };

                let mut style = Style::default().fg(self.theme.glyph_color(glyph));
                if glyph == Glyph::Player {
                    style = style.bold();
                }
                if let Some(cell) = buf.cell_mut(Position::new(inner.x + x, inner.y + y)) {
                    cell.set_char(self.glyph_set.glyph_char(glyph));
                    cell.set_style(style);
                }
            }
        }
    }
}
