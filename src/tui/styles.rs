//! Health-themed color palette and styles.
//!
//! Colors chosen for:
//! - Calm, clinical appearance
//! - High contrast for accessibility

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{RiskLabel, SentimentLabel};

/// Health theme color palette.
pub struct HealthTheme;

impl HealthTheme {
    // === Primary Colors ===

    /// Deep teal - Primary color
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488

    /// Lighter teal for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    /// Emerald - healthy / low risk
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber - overweight band, warnings
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose - obese band, high risk
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Blue - population points, progress
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subtitles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for key hints
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Get risk label style
    #[must_use]
    pub fn risk_label(label: RiskLabel) -> Style {
        let (r, g, b) = label.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }

    #[must_use]
    pub fn sentiment(label: SentimentLabel) -> Style {
        match label {
            SentimentLabel::Positive => Self::success(),
            SentimentLabel::Negative => Self::danger(),
            SentimentLabel::Neutral => Self::text_secondary(),
        }
    }

    /// Style for a BMI band on the population chart, mildest first.
    #[must_use]
    pub fn bmi_band(index: usize) -> Style {
        match index {
            0 => Self::success(),
            1 => Self::warning(),
            _ => Self::danger(),
        }
    }
}
