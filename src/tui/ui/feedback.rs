//! Feedback entry and sentiment view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};
use zeroize::Zeroize;

use crate::application::MAX_FEEDBACK_CHARS;
use crate::domain::SentimentResult;
use crate::tui::styles::HealthTheme;

/// Feedback screen state
#[derive(Debug, Default)]
pub struct FeedbackState {
    pub text: String,
    pub result: Option<SentimentResult>,
    pub error: Option<String>,
}

impl FeedbackState {
    pub fn input_char(&mut self, c: char) {
        if self.text.chars().count() < MAX_FEEDBACK_CHARS {
            self.text.push(c);
            self.error = None;
        }
    }

    pub fn delete_char(&mut self) {
        self.text.pop();
    }

    /// Wipe the typed text and any previous outcome.
    pub fn clear(&mut self) {
        self.text.zeroize();
        self.result = None;
        self.error = None;
    }
}

/// Render the feedback view
pub fn render_feedback(f: &mut Frame, area: Rect, state: &FeedbackState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Input
            Constraint::Length(5), // Sentiment
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", HealthTheme::text()),
        Span::styled("Feedback", HealthTheme::title()),
        Span::styled(" │ Tell us how we did", HealthTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HealthTheme::border()),
    );
    f.render_widget(header, chunks[0]);

    let input = Paragraph::new(Line::from(vec![
        Span::styled(state.text.as_str(), HealthTheme::text()),
        Span::styled("▌", HealthTheme::cursor()),
    ]))
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .title(Span::styled(
                format!(
                    " Your feedback ({}/{}) ",
                    state.text.chars().count(),
                    MAX_FEEDBACK_CHARS
                ),
                HealthTheme::focused(),
            ))
            .borders(Borders::ALL)
            .border_style(HealthTheme::border_focused()),
    );
    f.render_widget(input, chunks[1]);

    render_sentiment(f, chunks[2], state);

    let footer_line = if let Some(err) = &state.error {
        Line::from(vec![
            Span::styled("! ", HealthTheme::danger()),
            Span::styled(err.as_str(), HealthTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[Enter] ", HealthTheme::key_hint()),
            Span::styled("Analyze ", HealthTheme::key_desc()),
            Span::styled("[Esc] ", HealthTheme::key_hint()),
            Span::styled("Back", HealthTheme::key_desc()),
        ])
    };
    let footer = Paragraph::new(footer_line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HealthTheme::border()),
    );
    f.render_widget(footer, chunks[3]);
}

fn render_sentiment(f: &mut Frame, area: Rect, state: &FeedbackState) {
    let block = Block::default()
        .title(Span::styled(" Sentiment ", HealthTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(HealthTheme::border());

    let Some(result) = state.result else {
        let waiting = Paragraph::new(Line::from(Span::styled(
            "Press Enter to analyze your feedback",
            HealthTheme::text_muted(),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(waiting, area);
        return;
    };

    let style = HealthTheme::sentiment(result.label());
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(style)
        .ratio(result.confidence().clamp(0.0, 1.0))
        .label(Span::styled(
            format!(
                "{} ({:.0}% confidence)",
                result.label(),
                result.confidence() * 100.0
            ),
            HealthTheme::text().add_modifier(Modifier::BOLD),
        ));
    f.render_widget(gauge, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_stops_at_limit() {
        let mut state = FeedbackState::default();
        for _ in 0..MAX_FEEDBACK_CHARS + 10 {
            state.input_char('a');
        }
        assert_eq!(state.text.chars().count(), MAX_FEEDBACK_CHARS);
    }

    #[test]
    fn test_clear() {
        let mut state = FeedbackState {
            text: "great app".into(),
            result: None,
            error: Some("old".into()),
        };
        state.clear();
        assert!(state.text.is_empty());
        assert!(state.error.is_none());
    }
}
