use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{CreateError, DeleteError, ExerciseID, Name, ReadError, Reps, Sets};

pub trait PlanService {
    fn get_plans(&self) -> Result<Vec<Plan>, ReadError>;
    fn create_plan(&self, plan: Plan) -> Result<Plan, CreateError>;
    fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;
}

pub trait PlanRepository {
    fn read_plans(&self) -> Result<Vec<Plan>, ReadError>;
    fn create_plan(&self, plan: Plan) -> Result<Plan, CreateError>;
    fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;
}

/// A multi-day training template. Plans are never modified after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: PlanID,
    pub name: Name,
    pub focus: String,
    pub frequency_per_week: u32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub days: Vec<PlanDay>,
}

impl Plan {
    #[must_use]
    pub fn num_exercises(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }

    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.days.iter().map(PlanDay::num_sets).sum()
    }

    #[must_use]
    pub fn exercises(&self) -> BTreeSet<ExerciseID> {
        self.days
            .iter()
            .flat_map(|d| d.exercises.iter().map(|e| e.exercise_id))
            .collect()
    }
}

#[derive(Deref, Debug, Default, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlanID(Uuid);

impl PlanID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for PlanID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for PlanID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanDay {
    pub id: PlanDayID,
    pub title: String,
    pub emphasis: String,
    pub exercises: Vec<PlanExercise>,
}

impl PlanDay {
    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises.iter().map(|e| u32::from(e.sets)).sum()
    }
}

#[derive(Deref, Debug, Default, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlanDayID(Uuid);

impl PlanDayID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for PlanDayID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for PlanDayID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Snapshot of a catalog exercise at the time the plan was created.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanExercise {
    pub exercise_id: ExerciseID,
    pub name: String,
    pub sets: Sets,
    pub reps: Reps,
    pub notes: Option<String>,
}
