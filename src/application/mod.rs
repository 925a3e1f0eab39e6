//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod assessment;
mod feedback;

pub use assessment::{AssessmentService, AssessmentStage};
pub use feedback::{FeedbackService, MAX_FEEDBACK_CHARS};
