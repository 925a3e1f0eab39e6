//! Risk check progress and result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Advisory, Assessment, PopulationChart, RiskLabel, CLOSING_REMARK};
use crate::tui::styles::HealthTheme;

use super::chart::render_population_chart;

/// Assessment state
#[derive(Debug, Clone)]
pub enum AssessmentState {
    /// Validating and encoding metrics
    Encoding { progress: f64 },
    /// Waiting on the classifier
    Predicting { progress: f64 },
    /// Applying advisory rules
    Advising { progress: f64 },
    /// Completed with result
    Complete { assessment: Box<Assessment> },
    /// Error occurred
    Error { message: String },
}

impl AssessmentState {
    /// Progress fraction while a check is running.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        match self {
            Self::Encoding { progress }
            | Self::Predicting { progress }
            | Self::Advising { progress } => Some(*progress),
            _ => None,
        }
    }
}

/// Render the assessment view
pub fn render_assessment(f: &mut Frame, area: Rect, state: &AssessmentState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_assessment_header(f, chunks[0]);
    render_assessment_content(f, chunks[1], state);
    render_assessment_footer(f, chunks[2], state);
}

fn render_assessment_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", HealthTheme::text()),
        Span::styled("Risk Check", HealthTheme::title()),
        Span::styled(" │ Prediction & Recommendations", HealthTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HealthTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_assessment_content(f: &mut Frame, area: Rect, state: &AssessmentState) {
    match state {
        AssessmentState::Encoding { progress } => {
            render_progress(f, area, "Encoding", *progress, "Preparing your health data...")
        }
        AssessmentState::Predicting { progress } => {
            render_progress(f, area, "Predicting", *progress, "Scoring with the risk model...")
        }
        AssessmentState::Advising { progress } => {
            render_progress(f, area, "Advising", *progress, "Building recommendations...")
        }
        AssessmentState::Complete { assessment } => render_result(f, area, assessment),
        AssessmentState::Error { message } => render_error(f, area, message),
    }
}

fn render_progress(f: &mut Frame, area: Rect, stage: &str, progress: f64, description: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(area);

    let stage_text = Paragraph::new(Line::from(vec![
        Span::styled("Stage: ", HealthTheme::text_secondary()),
        Span::styled(stage, HealthTheme::focused()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(stage_text, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(HealthTheme::border()),
        )
        .gauge_style(HealthTheme::info())
        .ratio(progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);

    let desc = Paragraph::new(Line::from(Span::styled(
        description,
        HealthTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(desc, chunks[2]);
}

fn advisory_item(advisory: &Advisory) -> ListItem<'static> {
    let (marker, style) = if advisory.is_warning() {
        ("! ", HealthTheme::warning())
    } else {
        ("✓ ", HealthTheme::success())
    };
    ListItem::new(Line::from(vec![
        Span::styled(marker, style),
        Span::styled(format!("{}: ", advisory.topic()), style),
        Span::styled(advisory.message(), HealthTheme::text()),
    ]))
}

fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Risk label
            Constraint::Min(6),    // Advisories
            Constraint::Length(3), // Closing remark
        ])
        .split(columns[0]);

    let risk_style = HealthTheme::risk_label(assessment.risk);
    let risk_icon = match assessment.risk {
        RiskLabel::Low => "OK",
        RiskLabel::High => "!",
    };

    let risk_display = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} {}", risk_icon, assessment.risk.label()),
            risk_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            assessment.risk.description(),
            HealthTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Prediction ", HealthTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(HealthTheme::border_focused()),
    );
    f.render_widget(risk_display, left[0]);

    let items: Vec<ListItem> = assessment.advisories.iter().map(advisory_item).collect();
    let advice = List::new(items).block(
        Block::default()
            .title(Span::styled(
                format!(" Recommendations ({} warnings) ", assessment.warning_count()),
                HealthTheme::subtitle(),
            ))
            .borders(Borders::ALL)
            .border_style(HealthTheme::border()),
    );
    f.render_widget(advice, left[1]);

    let closing = Paragraph::new(Line::from(Span::styled(
        CLOSING_REMARK,
        HealthTheme::success(),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(closing, left[2]);

    let chart = PopulationChart::for_metrics(&assessment.metrics);
    render_population_chart(f, columns[1], &chart);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", HealthTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, HealthTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(HealthTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_assessment_footer(f: &mut Frame, area: Rect, state: &AssessmentState) {
    let content = match state {
        AssessmentState::Complete { .. } => Line::from(vec![
            Span::styled("[Enter] ", HealthTheme::key_hint()),
            Span::styled("Back to Form ", HealthTheme::key_desc()),
            Span::styled("[N] ", HealthTheme::key_hint()),
            Span::styled("New Check ", HealthTheme::key_desc()),
            Span::styled("[F] ", HealthTheme::key_hint()),
            Span::styled("Feedback", HealthTheme::key_desc()),
        ]),
        AssessmentState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", HealthTheme::key_hint()),
            Span::styled("Back to Form ", HealthTheme::key_desc()),
            Span::styled("[Esc] ", HealthTheme::key_hint()),
            Span::styled("Cancel", HealthTheme::key_desc()),
        ]),
        _ => Line::from(vec![Span::styled(
            "Processing...",
            HealthTheme::text_muted(),
        )]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HealthTheme::border()),
    );

    f.render_widget(footer, area);
}
