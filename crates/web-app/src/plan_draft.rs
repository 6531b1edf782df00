use chrono::{DateTime, Utc};
use gymlog_domain as domain;

use crate::Feedback;

pub const DEFAULT_FREQUENCY_PER_WEEK: u32 = 3;

pub const FOCUS_OPTIONS: [&str; 5] = [
    "Strength",
    "Hypertrophy",
    "Endurance",
    "Reconditioning",
    "Custom",
];

const FALLBACK_EXERCISE_NAME: &str = "Exercise";
const FALLBACK_DAY_TITLE: &str = "Session";
const FALLBACK_DAY_EMPHASIS: &str = "General";
const FALLBACK_FOCUS: &str = "Custom";

/// A plan under construction.
///
/// All operations leave `self` untouched and return the updated draft.
/// Operations referring to a day or exercise index that does not exist return
/// an unchanged copy.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDraft {
    pub name: String,
    pub focus: String,
    pub frequency_per_week: Option<u32>,
    pub notes: String,
    pub days: Vec<DraftDay>,
}

impl Default for PlanDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            focus: String::new(),
            frequency_per_week: Some(DEFAULT_FREQUENCY_PER_WEEK),
            notes: String::new(),
            days: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftDay {
    pub id: domain::PlanDayID,
    pub title: String,
    pub emphasis: String,
    pub exercises: Vec<DraftExercise>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftExercise {
    pub exercise_id: Option<domain::ExerciseID>,
    pub custom_name: String,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub notes: String,
}

/// Fields to overwrite in a `DraftExercise`. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExercisePatch {
    pub exercise_id: Option<Option<domain::ExerciseID>>,
    pub custom_name: Option<String>,
    pub sets: Option<Option<u32>>,
    pub reps: Option<Option<u32>>,
    pub notes: Option<String>,
}

impl PlanDraft {
    #[must_use]
    pub fn with_name(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_focus(&self, focus: &str) -> Self {
        Self {
            focus: focus.to_string(),
            ..self.clone()
        }
    }

    /// A frequency of `None` or `Some(0)` is not kept: `build` uses the number
    /// of days instead.
    #[must_use]
    pub fn with_frequency(&self, frequency_per_week: Option<u32>) -> Self {
        Self {
            frequency_per_week,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_notes(&self, notes: &str) -> Self {
        Self {
            notes: notes.to_string(),
            ..self.clone()
        }
    }

    /// Append an empty day titled "Day N", N being the new number of days.
    #[must_use]
    pub fn add_day(&self) -> Self {
        let mut draft = self.clone();
        draft.days.push(DraftDay {
            id: domain::PlanDayID::random(),
            title: format!("Day {}", self.days.len() + 1),
            emphasis: String::new(),
            exercises: vec![],
        });
        draft
    }

    #[must_use]
    pub fn remove_day(&self, index: usize) -> Self {
        let mut draft = self.clone();
        if index < draft.days.len() {
            draft.days.remove(index);
        }
        draft
    }

    #[must_use]
    pub fn with_day_title(&self, day: usize, title: &str) -> Self {
        self.map_day(day, |d| d.title = title.to_string())
    }

    #[must_use]
    pub fn with_day_emphasis(&self, day: usize, emphasis: &str) -> Self {
        self.map_day(day, |d| d.emphasis = emphasis.to_string())
    }

    #[must_use]
    pub fn add_exercise(&self, day: usize) -> Self {
        self.map_day(day, |d| d.exercises.push(DraftExercise::default()))
    }

    #[must_use]
    pub fn remove_exercise(&self, day: usize, index: usize) -> Self {
        self.map_day(day, |d| {
            if index < d.exercises.len() {
                d.exercises.remove(index);
            }
        })
    }

    #[must_use]
    pub fn with_exercise(&self, day: usize, index: usize, patch: ExercisePatch) -> Self {
        self.map_day(day, |d| {
            let Some(exercise) = d.exercises.get_mut(index) else {
                return;
            };
            if let Some(exercise_id) = patch.exercise_id {
                exercise.exercise_id = exercise_id;
            }
            if let Some(custom_name) = patch.custom_name {
                exercise.custom_name = custom_name;
            }
            if let Some(sets) = patch.sets {
                exercise.sets = sets;
            }
            if let Some(reps) = patch.reps {
                exercise.reps = reps;
            }
            if let Some(notes) = patch.notes {
                exercise.notes = notes;
            }
        })
    }

    fn map_day(&self, index: usize, f: impl FnOnce(&mut DraftDay)) -> Self {
        let mut draft = self.clone();
        if let Some(day) = draft.days.get_mut(index) {
            f(day);
        }
        draft
    }

    /// Whether the draft has a name and at least one valid exercise.
    #[must_use]
    pub fn can_save(&self) -> bool {
        !self.name.trim().is_empty()
            && self
                .days
                .iter()
                .any(|d| d.exercises.iter().any(DraftExercise::is_valid))
    }

    /// Turn the draft into a plan.
    ///
    /// Invalid exercises and days without valid exercises are dropped. Blank
    /// exercise names are taken from `catalog`.
    pub fn build(
        &self,
        id: domain::PlanID,
        created_at: DateTime<Utc>,
        catalog: &[domain::Exercise],
    ) -> Result<domain::Plan, PlanDraftError> {
        let days = self
            .days
            .iter()
            .filter_map(|day| day.build(catalog))
            .collect::<Vec<_>>();

        if self.name.trim().is_empty() || days.is_empty() {
            return Err(PlanDraftError::Incomplete);
        }

        Ok(domain::Plan {
            id,
            name: domain::Name::new(&self.name)?,
            focus: or_fallback(&self.focus, FALLBACK_FOCUS),
            frequency_per_week: self
                .frequency_per_week
                .filter(|f| *f > 0)
                .unwrap_or(u32::try_from(days.len()).unwrap_or(u32::MAX)),
            notes: non_blank(&self.notes),
            created_at,
            days,
        })
    }
}

impl DraftDay {
    fn build(&self, catalog: &[domain::Exercise]) -> Option<domain::PlanDay> {
        let exercises = self
            .exercises
            .iter()
            .filter_map(|e| e.build(catalog))
            .collect::<Vec<_>>();

        if exercises.is_empty() {
            return None;
        }

        Some(domain::PlanDay {
            id: self.id,
            title: or_fallback(&self.title, FALLBACK_DAY_TITLE),
            emphasis: or_fallback(&self.emphasis, FALLBACK_DAY_EMPHASIS),
            exercises,
        })
    }
}

impl DraftExercise {
    fn is_valid(&self) -> bool {
        self.exercise_id.is_some()
            && self.sets.is_some_and(|s| s > 0)
            && self.reps.is_some_and(|r| r > 0)
    }

    fn build(&self, catalog: &[domain::Exercise]) -> Option<domain::PlanExercise> {
        let exercise_id = self.exercise_id?;
        let custom_name = self.custom_name.trim();
        let name = if custom_name.is_empty() {
            catalog
                .iter()
                .find(|e| e.id == exercise_id)
                .map_or_else(|| FALLBACK_EXERCISE_NAME.to_string(), |e| e.name.to_string())
        } else {
            custom_name.to_string()
        };

        Some(domain::PlanExercise {
            exercise_id,
            name,
            sets: domain::Sets::new(self.sets?).ok()?,
            reps: domain::Reps::new(self.reps?).ok()?,
            notes: non_blank(&self.notes),
        })
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    non_blank(value).unwrap_or_else(|| fallback.to_string())
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PlanDraftError {
    #[error("Enter a plan name and at least one valid session")]
    Incomplete,
    #[error(transparent)]
    Name(#[from] domain::NameError),
}

#[derive(thiserror::Error, Debug)]
pub enum PlanSaveError {
    #[error(transparent)]
    Invalid(#[from] PlanDraftError),
    #[error("Failed to save plan")]
    Create(#[from] domain::CreateError),
}

/// Parse the content of a count field.
///
/// Blank, non-numeric and negative input yields `None`, fractions are
/// rounded down.
#[must_use]
pub fn parse_count(value: &str) -> Option<u32> {
    let parsed = value.trim().parse::<f64>().ok()?;
    if !parsed.is_finite() || parsed < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(parsed.floor().min(f64::from(u32::MAX)) as u32)
}

/// Like `parse_count`, but zero yields `None`.
#[must_use]
pub fn parse_frequency(value: &str) -> Option<u32> {
    parse_count(value).filter(|f| *f > 0)
}

/// Holds the draft and the result of the last save attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanEditor {
    draft: PlanDraft,
    feedback: Option<Feedback>,
}

impl PlanEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn draft(&self) -> &PlanDraft {
        &self.draft
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn update(&mut self, f: impl FnOnce(&PlanDraft) -> PlanDraft) {
        self.draft = f(&self.draft);
    }

    pub fn dismiss_feedback(&mut self) {
        self.feedback = None;
    }

    /// Discard the draft and any feedback.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Store the draft as a new plan.
    ///
    /// On success the draft is reset. On failure the draft is kept and an
    /// error message is set.
    pub fn save<S: domain::PlanService>(
        &mut self,
        service: &S,
        catalog: &[domain::Exercise],
    ) -> Result<domain::Plan, PlanSaveError> {
        let result = self
            .draft
            .build(domain::PlanID::random(), Utc::now(), catalog)
            .map_err(PlanSaveError::from)
            .and_then(|plan| Ok(service.create_plan(plan)?));

        match result {
            Ok(plan) => {
                self.draft = PlanDraft::default();
                self.feedback = Some(Feedback::success("Plan saved to the library"));
                Ok(plan)
            }
            Err(err) => {
                self.feedback = Some(Feedback::error(err.to_string()));
                Err(err)
            }
        }
    }
}
