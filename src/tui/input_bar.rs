//! Input bar widget for the composed message.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::AppState;

/// Input bar renders the composed text, keeping the tail visible when the
/// message outgrows the available width.
pub struct InputBar;

impl InputBar {
    /// Render the input bar.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;

        let block = Block::default()
            .title(" Message ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let line = if state.composed.is_empty() {
            Line::from(Span::styled(
                "Type something...",
                Style::default().fg(theme.text_muted),
            ))
        } else {
            Line::from(Span::styled(
                Self::visible_tail(&state.composed, inner.width),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ))
        };

        f.render_widget(Paragraph::new(line), inner);
    }

    /// The suffix of `text` that fits in `width` columns.
    ///
    /// The composed alphabet is single-width ASCII, so characters map 1:1 to
    /// terminal columns.
    #[must_use]
    pub fn visible_tail(text: &str, width: u16) -> String {
        let width = usize::from(width);
        let len = text.chars().count();
        if len <= width {
            text.to_string()
        } else {
            text.chars().skip(len - width).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(InputBar::visible_tail("ABC", 10), "ABC");
    }

    #[test]
    fn test_long_text_shows_tail() {
        assert_eq!(InputBar::visible_tail("ABCDEFGH", 3), "FGH");
    }

    #[test]
    fn test_exact_fit() {
        assert_eq!(InputBar::visible_tail("ABC", 3), "ABC");
    }
}
