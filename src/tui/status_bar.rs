//! Status bar widget for status messages and contextual key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar: an error or status line when one is active,
    /// contextual key hints otherwise.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let line = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled(
                    "ERROR: ",
                    Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                ),
                Span::styled(error.as_str(), Style::default().fg(theme.error)),
            ])
        } else if !state.status_message.is_empty() {
            Line::from(Span::styled(
                state.status_message.as_str(),
                Style::default().fg(theme.accent),
            ))
        } else {
            Self::hints_line(state, theme)
        };

        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.text_muted)),
        );
        f.render_widget(paragraph, area);
    }

    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let hints: &[(&str, &str)] = if state.orchestrator.state().is_active() {
            &[("Esc", "close"), ("Up/Down", "scroll")]
        } else {
            &[
                ("Arrows", "move"),
                ("Enter", "press"),
                ("t", "translate"),
                ("c", "copy"),
                ("x", "clear"),
                ("Bksp", "undo"),
                ("q", "quit"),
            ]
        };

        let mut spans = Vec::with_capacity(hints.len() * 3);
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(
                format!("{key} "),
                Style::default().fg(theme.accent),
            ));
            spans.push(Span::styled(
                (*action).to_string(),
                Style::default().fg(theme.text_muted),
            ));
        }
        Line::from(spans)
    }
}
