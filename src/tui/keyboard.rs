//! Keyboard widget for rendering the shuffling board grid.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::GridLayout;

use super::AppState;

/// Keyboard widget renders the key set over the derived grid geometry.
pub struct KeyboardWidget;

impl KeyboardWidget {
    /// Render the board. While the container is unmeasured nothing
    /// interactive is drawn.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;

        let block = Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(layout) = state.keyboard.layout() else {
            let waiting = Paragraph::new("Measuring...")
                .style(Style::default().fg(theme.text_muted));
            f.render_widget(waiting, inner);
            return;
        };

        for (index, slot) in state.keyboard.keys().slots().iter().enumerate() {
            let cell = Self::cell_rect(inner, &layout, index);
            if cell.width == 0 || cell.height == 0 {
                continue;
            }

            let is_selected = state.selected_index == index;
            let is_flashing = state
                .flash
                .is_some_and(|(identity, _)| identity == slot.identity);

            let style = if is_flashing {
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().fg(theme.background).bg(theme.primary)
            } else if slot.symbol.is_blank() {
                Style::default().fg(theme.text_muted).bg(theme.surface)
            } else {
                Style::default().fg(theme.text).bg(theme.surface)
            };

            let label = slot.symbol.to_string();
            let key = if cell.height >= 3 {
                Paragraph::new(Self::centered_lines(&label, cell.height))
                    .style(style)
                    .block(Block::default().borders(Borders::ALL))
                    .alignment(ratatui::layout::Alignment::Center)
            } else {
                Paragraph::new(Line::from(Span::raw(label)))
                    .style(style)
                    .alignment(ratatui::layout::Alignment::Center)
            };
            f.render_widget(key, cell);
        }
        // Placeholder cells for the grid's unbacked tail are left as
        // background; they occupy space but render nothing.
    }

    /// Screen rectangle of the cell at a display index.
    #[must_use]
    pub fn cell_rect(inner: Rect, layout: &GridLayout, index: usize) -> Rect {
        let col = (index % usize::from(layout.columns)) as u16;
        let row = (index / usize::from(layout.columns)) as u16;
        Rect {
            x: inner.x + col * layout.cell_width,
            y: inner.y + row * layout.cell_height,
            width: layout.cell_width,
            height: layout.cell_height,
        }
    }

    /// Maps a screen position to the display index of the cell under it.
    ///
    /// Returns `None` outside the grid or over a placeholder cell.
    #[must_use]
    pub fn hit_test(inner: Rect, layout: &GridLayout, key_count: usize, x: u16, y: u16) -> Option<usize> {
        if x < inner.x || y < inner.y || layout.cell_width == 0 || layout.cell_height == 0 {
            return None;
        }
        let col = (x - inner.x) / layout.cell_width;
        let row = (y - inner.y) / layout.cell_height;
        if col >= layout.columns || row >= layout.rows {
            return None;
        }
        let index = usize::from(row) * usize::from(layout.columns) + usize::from(col);
        (index < key_count).then_some(index)
    }

    /// Pads a single-character label so it sits on the middle line of a
    /// bordered cell.
    fn centered_lines(label: &str, cell_height: u16) -> Vec<Line<'static>> {
        let interior = cell_height.saturating_sub(2).max(1);
        let top_padding = usize::from((interior - 1) / 2);
        let mut lines = vec![Line::raw(""); top_padding];
        lines.push(Line::from(Span::styled(
            label.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        GridLayout::compute(50, 18, 30, 5)
    }

    #[test]
    fn test_cell_rect_walks_the_grid() {
        let inner = Rect::new(2, 1, 50, 18);
        let layout = layout();

        let first = KeyboardWidget::cell_rect(inner, &layout, 0);
        assert_eq!((first.x, first.y), (2, 1));

        let second = KeyboardWidget::cell_rect(inner, &layout, 1);
        assert_eq!(second.x, 2 + layout.cell_width);

        let second_row = KeyboardWidget::cell_rect(inner, &layout, 5);
        assert_eq!(second_row.y, 1 + layout.cell_height);
    }

    #[test]
    fn test_hit_test_round_trips_cell_rect() {
        let inner = Rect::new(2, 1, 50, 18);
        let layout = layout();

        for index in [0, 4, 5, 29] {
            let cell = KeyboardWidget::cell_rect(inner, &layout, index);
            let hit = KeyboardWidget::hit_test(inner, &layout, 30, cell.x, cell.y);
            assert_eq!(hit, Some(index));
        }
    }

    #[test]
    fn test_hit_test_rejects_outside_and_placeholders() {
        let inner = Rect::new(0, 0, 50, 18);
        let ragged = GridLayout::compute(50, 18, 26, 5);

        // A backed cell hits; a point past the grid's right edge misses.
        assert_eq!(KeyboardWidget::hit_test(inner, &ragged, 26, 10, 0), Some(1));
        assert_eq!(KeyboardWidget::hit_test(inner, &ragged, 26, 51, 0), None);

        // Last row's placeholder cells are not pressable.
        let placeholder = KeyboardWidget::cell_rect(inner, &ragged, 29);
        assert_eq!(
            KeyboardWidget::hit_test(inner, &ragged, 26, placeholder.x, placeholder.y),
            None
        );
    }
}
