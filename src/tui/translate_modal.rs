//! Centered modal showing the translation while in flight and after it
//! settles.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::models::TranslationResult;
use crate::translate::OrchestratorState;

use super::{AppState, Theme};

/// Translation modal widget.
pub struct TranslateModal;

impl TranslateModal {
    /// Render the modal for any non-idle orchestrator state.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let modal_area = Self::modal_area(area);

        f.render_widget(Clear, modal_area);
        let block = Block::default()
            .title(" Spiritual Translation ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(modal_area);
        f.render_widget(block, modal_area);

        // Progress strip on top, content below.
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);

        match state.orchestrator.state() {
            OrchestratorState::Loading => {
                Self::render_progress(f, chunks[0], state.modal_progress, theme);
                let waiting = Paragraph::new("Translating your message...")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.text_secondary));
                f.render_widget(waiting, chunks[1]);
            }
            OrchestratorState::Success(result) => {
                Self::render_progress(f, chunks[0], 1.0, theme);
                let content = Self::result_lines(result, theme);
                let paragraph = Paragraph::new(content)
                    .wrap(Wrap { trim: false })
                    .scroll((state.modal_scroll, 0));
                f.render_widget(paragraph, chunks[1]);
            }
            OrchestratorState::Failed(detail) => {
                let message = Paragraph::new(Line::from(vec![
                    Span::styled("ERROR: ", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
                    Span::styled(detail.message.clone(), Style::default().fg(theme.error)),
                ]))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false });
                f.render_widget(message, chunks[1]);
            }
            OrchestratorState::Idle => {}
        }
    }

    /// Centered modal geometry (70% width, 70% height).
    #[must_use]
    pub fn modal_area(area: Rect) -> Rect {
        let width = (area.width * 70) / 100;
        let height = (area.height * 70) / 100;
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;

        Rect {
            x: x + area.x,
            y: y + area.y,
            width,
            height,
        }
    }

    fn render_progress(f: &mut Frame, area: Rect, ratio: f64, theme: &Theme) {
        let gauge = Gauge::default()
            .ratio(ratio.clamp(0.0, 1.0))
            .gauge_style(Style::default().fg(theme.primary).bg(theme.highlight_bg))
            .label("");
        f.render_widget(gauge, area);
    }

    fn result_lines<'a>(result: &'a TranslationResult, theme: &Theme) -> Vec<Line<'a>> {
        let header = |title: &'static str| {
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(theme.text_secondary)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let mut lines = vec![
            header("TRANSLATION"),
            Line::from(Span::styled(
                format!("\u{201c}{}\u{201d}", result.translation),
                Style::default().fg(theme.text).add_modifier(Modifier::ITALIC),
            )),
            Line::raw(""),
            header("INTERPRETATION PROCESS"),
        ];
        for step in &result.interpretation {
            lines.push(Line::from(vec![
                Span::styled("- ", Style::default().fg(theme.text_muted)),
                Span::styled(step.as_str(), Style::default().fg(theme.text)),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(header("SPIRITUAL MESSAGE"));
        lines.push(Line::from(Span::styled(
            result.spiritual_message.as_str(),
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        )));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_area_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let modal = TranslateModal::modal_area(area);
        assert_eq!(modal.width, 70);
        assert_eq!(modal.height, 28);
        assert_eq!(modal.x, 15);
        assert_eq!(modal.y, 6);
    }

    #[test]
    fn test_modal_area_survives_tiny_terminal() {
        let area = Rect::new(0, 0, 4, 2);
        let modal = TranslateModal::modal_area(area);
        assert!(modal.width <= area.width);
        assert!(modal.height <= area.height);
    }
}
