use std::{fmt, ops::Mul, slice::Iter};

use derive_more::{Deref, Display, Into};
use thiserror::Error;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError};

pub trait ExerciseService {
    fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError>;
    fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;

    fn get_exercise(&self, id: ExerciseID) -> Result<Option<Exercise>, ReadError> {
        Ok(self.get_exercises()?.into_iter().find(|e| e.id == id))
    }
}

pub trait ExerciseRepository {
    fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError>;
    fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub muscle_group: MuscleGroup,
    pub sets: Sets,
    pub reps: Reps,
    pub weight: Option<Weight>,
    pub notes: Option<String>,
}

impl Exercise {
    /// Volume of one execution with the default targets.
    #[must_use]
    pub fn target_volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let total_reps = u32::from(self.sets * self.reps) as f32;
        total_reps * self.weight.map_or(0.0, f32::from)
    }
}

/// An exercise whose id has not been assigned by the store yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub name: Name,
    pub muscle_group: MuscleGroup,
    pub sets: Sets,
    pub reps: Reps,
    pub weight: Option<Weight>,
    pub notes: Option<String>,
}

impl NewExercise {
    #[must_use]
    pub fn with_id(self, id: ExerciseID) -> Exercise {
        Exercise {
            id,
            name: self.name,
            muscle_group: self.muscle_group,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            notes: self.notes,
        }
    }
}

#[derive(
    Deref, Debug, Default, Display, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct ExerciseID(u32);

impl ExerciseID {
    /// `None` once the id space is used up.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u32> for ExerciseID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Determine the id for a newly created exercise.
///
/// The result is greater than every id in `exercises` and never lower than
/// `watermark`, so ids of deleted exercises are not handed out again. Returns
/// `None` if an existing id is already the largest possible one.
#[must_use]
pub fn next_exercise_id(exercises: &[Exercise], watermark: ExerciseID) -> Option<ExerciseID> {
    exercises
        .iter()
        .try_fold(watermark, |id, e| Some(id.max(e.id.next()?)))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
    Core,
    Other(String),
}

impl MuscleGroup {
    pub fn new(value: &str) -> Result<Self, MuscleGroupError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(MuscleGroupError::Empty);
        }

        Ok(MuscleGroup::iter()
            .find(|g| g.name().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| MuscleGroup::Other(trimmed.to_string())))
    }

    pub fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 6] = [
            MuscleGroup::Chest,
            MuscleGroup::Shoulders,
            MuscleGroup::Legs,
            MuscleGroup::Arms,
            MuscleGroup::Core,
            MuscleGroup::Back,
        ];
        MUSCLE_GROUPS.iter()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Core => "Core",
            MuscleGroup::Other(name) => name,
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum MuscleGroupError {
    #[error("Muscle group is required")]
    Empty,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sets(u32);

impl Sets {
    pub fn new(value: u32) -> Result<Self, SetsError> {
        if value == 0 {
            return Err(SetsError::Zero);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Sets::new(parsed_value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

impl Mul<Reps> for Sets {
    type Output = Reps;

    fn mul(self, rhs: Reps) -> Self::Output {
        Reps(self.0.saturating_mul(rhs.0))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be greater than 0")]
    Zero,
    #[error("Sets must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if value == 0 {
            return Err(RepsError::Zero);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be greater than 0")]
    Zero,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must not be negative")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}
