//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a health-themed interface for:
//! - Health metrics entry
//! - Risk prediction with recommendations and a population chart
//! - Feedback sentiment

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::HealthTheme;
pub use worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle};
