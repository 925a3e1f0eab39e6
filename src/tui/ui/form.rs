//! Health metrics input form.

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{
    ActivityLevel, Gender, HealthMetrics, YesNo, AGE_RANGE, BLOOD_PRESSURE_RANGE, BMI_RANGE,
    CHOLESTEROL_RANGE, GLUCOSE_RANGE,
};
use crate::tui::styles::HealthTheme;

const GENDER_OPTIONS: &[&str] = &["Male", "Female"];
const ACTIVITY_OPTIONS: &[&str] = &["Low", "Moderate", "High"];
const YES_NO_OPTIONS: &[&str] = &["No", "Yes"];

// Field positions, in display order.
const AGE: usize = 0;
const GENDER: usize = 1;
const BMI: usize = 2;
const BLOOD_PRESSURE: usize = 3;
const CHOLESTEROL: usize = 4;
const GLUCOSE: usize = 5;
const ACTIVITY: usize = 6;
const SMOKING: usize = 7;
const ALCOHOL: usize = 8;
const FAMILY_HISTORY: usize = 9;

/// How a field is edited.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Typed number within [min, max]
    Numeric { min: f64, max: f64, integer: bool },
    /// One of a fixed list, cycled with the arrow keys
    Choice { options: &'static [&'static str] },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl FormField {
    fn integer(label: &'static str, hint: &'static str, range: &RangeInclusive<u32>) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Numeric {
                min: f64::from(*range.start()),
                max: f64::from(*range.end()),
                integer: true,
            },
            value: String::new(),
        }
    }

    fn choice(label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            label,
            hint: "←/→ to choose",
            kind: FieldKind::Choice { options },
            value: String::new(),
        }
    }
}

/// Health form state
pub struct HealthFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for HealthFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField::integer("Age", "years (18-100)", &AGE_RANGE),
                FormField::choice("Gender", GENDER_OPTIONS),
                FormField {
                    label: "BMI",
                    hint: "kg/m² (10.0-50.0)",
                    kind: FieldKind::Numeric {
                        min: *BMI_RANGE.start(),
                        max: *BMI_RANGE.end(),
                        integer: false,
                    },
                    value: String::new(),
                },
                FormField::integer("Blood Pressure", "mmHg (80-200)", &BLOOD_PRESSURE_RANGE),
                FormField::integer("Cholesterol", "mg/dL (100-400)", &CHOLESTEROL_RANGE),
                FormField::integer("Glucose", "mg/dL (70-300)", &GLUCOSE_RANGE),
                FormField::choice("Physical Activity", ACTIVITY_OPTIONS),
                FormField::choice("Smoking", YES_NO_OPTIONS),
                FormField::choice("Alcohol Intake", YES_NO_OPTIONS),
                FormField::choice("Family History", YES_NO_OPTIONS),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl HealthFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current numeric field
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        if let FieldKind::Numeric { integer, .. } = field.kind {
            if c.is_ascii_digit() || (c == '.' && !integer) {
                field.value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Step the current choice field forwards or backwards
    pub fn cycle_choice(&mut self, forward: bool) {
        let field = &mut self.fields[self.selected_field];
        if let FieldKind::Choice { options } = field.kind {
            let next = match options.iter().position(|o| *o == field.value) {
                None if forward => 0,
                None => options.len() - 1,
                Some(i) if forward => (i + 1) % options.len(),
                Some(0) => options.len() - 1,
                Some(i) => i - 1,
            };
            field.value = options[next].to_string();
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        let field = &mut self.fields[self.selected_field];
        match field.kind {
            FieldKind::Numeric { .. } => {
                field.value.pop();
            }
            FieldKind::Choice { .. } => field.value.clear(),
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    /// Wipe all field buffers from memory and clear values.
    ///
    /// Called as soon as a check starts so plaintext inputs do not persist in
    /// the UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    fn number(&self, index: usize) -> Result<f64, String> {
        let field = &self.fields[index];
        let FieldKind::Numeric { min, max, integer } = field.kind else {
            return Err(format!("{}: not a numeric field", field.label));
        };

        if field.value.is_empty() {
            return Err(format!("{}: required", field.label));
        }
        let value: f64 = field
            .value
            .parse()
            .map_err(|_| format!("{}: Invalid number", field.label))?;
        if !value.is_finite() {
            return Err(format!("{}: Invalid number", field.label));
        }
        if integer && value.fract() != 0.0 {
            return Err(format!("{}: Must be a whole number", field.label));
        }
        if value < min || value > max {
            return Err(format!(
                "{}: Value must be between {} and {}",
                field.label, min, max
            ));
        }
        Ok(value)
    }

    fn whole(&self, index: usize) -> Result<u32, String> {
        // Range and integrality already checked.
        self.number(index).map(|v| v as u32)
    }

    fn choice<T>(&self, index: usize) -> Result<T, String>
    where
        T: FromStr,
        T::Err: Display,
    {
        let field = &self.fields[index];
        if field.value.is_empty() {
            return Err(format!("{}: choose a value", field.label));
        }
        field
            .value
            .parse()
            .map_err(|e| format!("{}: {}", field.label, e))
    }

    /// Validate and convert to HealthMetrics
    pub fn to_health_metrics(&self) -> Result<HealthMetrics, String> {
        Ok(HealthMetrics {
            age: self.whole(AGE)?,
            gender: self.choice::<Gender>(GENDER)?,
            bmi: self.number(BMI)?,
            blood_pressure: self.whole(BLOOD_PRESSURE)?,
            cholesterol: self.whole(CHOLESTEROL)?,
            glucose: self.whole(GLUCOSE)?,
            activity: self.choice::<ActivityLevel>(ACTIVITY)?,
            smoking: self.choice::<YesNo>(SMOKING)?,
            alcohol: self.choice::<YesNo>(ALCOHOL)?,
            family_history: self.choice::<YesNo>(FAMILY_HISTORY)?,
        })
    }

    /// Fill every field from a metrics record
    pub fn load(&mut self, metrics: &HealthMetrics) {
        let values = [
            metrics.age.to_string(),
            metrics.gender.to_string(),
            format!("{:.1}", metrics.bmi),
            metrics.blood_pressure.to_string(),
            metrics.cholesterol.to_string(),
            metrics.glucose.to_string(),
            metrics.activity.to_string(),
            metrics.smoking.to_string(),
            metrics.alcohol.to_string(),
            metrics.family_history.to_string(),
        ];
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.value = value;
        }
        self.error_message = None;
    }

    /// Load the default sample profile
    pub fn load_sample_data(&mut self) {
        self.load(&HealthMetrics::sample());
    }
}

/// Render the health metrics form
pub fn render_health_form(f: &mut Frame, area: Rect, state: &HealthFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", HealthTheme::text()),
        Span::styled("Vitalis", HealthTheme::title()),
        Span::styled(" │ ", HealthTheme::text_muted()),
        Span::styled(
            "Enter your health details",
            HealthTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HealthTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &HealthFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (HealthTheme::border_focused(), HealthTheme::focused())
        } else {
            (HealthTheme::border(), HealthTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(field.hint, HealthTheme::text_muted())
        } else {
            Span::styled(field.value.as_str(), HealthTheme::text())
        };

        let mut spans = vec![Span::raw(" ")];
        match (&field.kind, is_selected) {
            (FieldKind::Choice { .. }, true) => {
                spans.push(Span::styled("◀ ", HealthTheme::cursor()));
                spans.push(value_display);
                spans.push(Span::styled(" ▶", HealthTheme::cursor()));
            }
            (FieldKind::Numeric { .. }, true) => {
                spans.push(value_display);
                spans.push(Span::styled("▌", HealthTheme::cursor()));
            }
            _ => spans.push(value_display),
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &HealthFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", HealthTheme::danger()),
            Span::styled(err.as_str(), HealthTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", HealthTheme::key_hint()),
            Span::styled("Navigate ", HealthTheme::key_desc()),
            Span::styled("[←→] ", HealthTheme::key_hint()),
            Span::styled("Choose ", HealthTheme::key_desc()),
            Span::styled("[Enter] ", HealthTheme::key_hint()),
            Span::styled("Predict Risk ", HealthTheme::key_desc()),
            Span::styled("[S] ", HealthTheme::key_hint()),
            Span::styled("Sample ", HealthTheme::key_desc()),
            Span::styled("[F] ", HealthTheme::key_hint()),
            Span::styled("Feedback ", HealthTheme::key_desc()),
            Span::styled("[Q] ", HealthTheme::key_hint()),
            Span::styled("Quit", HealthTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HealthTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_roundtrip() {
        let mut state = HealthFormState::default();
        state.load_sample_data();
        assert_eq!(
            state.to_health_metrics().expect("Should parse"),
            HealthMetrics::sample()
        );
    }

    #[test]
    fn test_unselected_choice_is_an_error() {
        let mut state = HealthFormState::default();
        state.load_sample_data();
        state.fields[GENDER].value.clear();
        let err = state.to_health_metrics().expect_err("Should fail");
        assert!(err.starts_with("Gender"));
    }

    #[test]
    fn test_numeric_validation() {
        let mut state = HealthFormState::default();
        state.load_sample_data();

        state.fields[AGE].value = "17".into();
        assert!(state.to_health_metrics().is_err());

        state.fields[AGE].value = "30.5".into();
        assert!(state.to_health_metrics().is_err());

        state.fields[AGE].value = "30".into();
        state.fields[BMI].value = "50.1".into();
        assert!(state.to_health_metrics().is_err());

        state.fields[BMI].value = "24.5".into();
        assert!((state.to_health_metrics().expect("Should parse").bmi - 24.5).abs() < 1e-9);
    }

    #[test]
    fn test_input_filters() {
        let mut state = HealthFormState::default();
        state.selected_field = AGE;
        for c in "4x.2".chars() {
            state.input_char(c);
        }
        assert_eq!(state.fields[AGE].value, "42");

        state.selected_field = BMI;
        for c in "22.5".chars() {
            state.input_char(c);
        }
        assert_eq!(state.fields[BMI].value, "22.5");

        state.selected_field = GENDER;
        state.input_char('1');
        assert!(state.fields[GENDER].value.is_empty());
    }

    #[test]
    fn test_cycle_choice_wraps() {
        let mut state = HealthFormState::default();
        state.selected_field = ACTIVITY;
        state.cycle_choice(true);
        assert_eq!(state.fields[ACTIVITY].value, "Low");
        state.cycle_choice(false);
        assert_eq!(state.fields[ACTIVITY].value, "High");
        state.cycle_choice(true);
        assert_eq!(state.fields[ACTIVITY].value, "Low");
    }

    #[test]
    fn test_clear_sensitive() {
        let mut state = HealthFormState::default();
        state.load_sample_data();
        state.selected_field = 4;
        state.clear_sensitive();
        assert!(state.fields.iter().all(|f| f.value.is_empty()));
        assert_eq!(state.selected_field, 0);
    }
}
