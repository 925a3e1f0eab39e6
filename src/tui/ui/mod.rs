//! UI module: View components for the TUI.

pub mod assessment;
pub mod chart;
pub mod feedback;
pub mod form;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::HealthTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: This tool gives an indicative estimate and does not replace a medical evaluation.",
            HealthTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Recommendations follow fixed thresholds and do not depend on the prediction.",
            HealthTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(HealthTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
