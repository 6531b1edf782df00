#![warn(clippy::pedantic)]

pub mod chart;
pub mod exercise_form;
pub mod log;
pub mod ongoing_session;
pub mod plan_draft;
pub mod service;

pub use exercise_form::{ExerciseForm, ExerciseFormError};
pub use ongoing_session::{OngoingSession, OngoingSessionError};
pub use plan_draft::{
    DraftDay, DraftExercise, ExercisePatch, PlanDraft, PlanDraftError, PlanEditor, PlanSaveError,
    parse_count, parse_frequency,
};

/// A message shown inline after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub tone: Tone,
    pub message: String,
}

impl Feedback {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}
