use std::{collections::BTreeSet, str::FromStr};

use chrono::{DateTime, Utc};
use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, Exercise, ExerciseID, ExerciseStats, ReadError, exercise_stats,
};

pub trait WorkoutSessionService {
    fn get_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError>;
    fn create_workout_session(
        &self,
        workout_session: WorkoutSession,
    ) -> Result<WorkoutSession, CreateError>;
    fn clear_workout_sessions(&self) -> Result<(), DeleteError>;

    fn get_exercise_stats(
        &self,
        exercise_id: Option<ExerciseID>,
    ) -> Result<ExerciseStats, ReadError> {
        if exercise_id.is_none() {
            return Ok(ExerciseStats::default());
        }
        Ok(exercise_stats(&self.get_workout_sessions()?, exercise_id))
    }
}

pub trait WorkoutSessionRepository {
    fn read_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError>;
    fn create_workout_session(
        &self,
        workout_session: WorkoutSession,
    ) -> Result<WorkoutSession, CreateError>;
    fn clear_workout_sessions(&self) -> Result<(), DeleteError>;
}

/// A completed workout. The history is append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub id: WorkoutSessionID,
    pub date: DateTime<Utc>,
    pub exercises: Vec<SessionExerciseLog>,
}

impl WorkoutSession {
    #[must_use]
    pub fn exercise_ids(&self) -> BTreeSet<ExerciseID> {
        self.exercises.iter().map(|e| e.exercise_id).collect()
    }

    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }

    #[must_use]
    pub fn total_volume(&self) -> f32 {
        self.exercises.iter().map(SessionExerciseLog::volume).sum()
    }
}

/// Identifier whose upper half is the creation time in milliseconds, so that
/// ids sort in creation order.
#[derive(Deref, Debug, Default, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutSessionID(Uuid);

impl WorkoutSessionID {
    #[must_use]
    pub fn at(time: DateTime<Utc>) -> Self {
        let millis = u64::try_from(time.timestamp_millis()).unwrap_or_default();
        let (_, random) = Uuid::new_v4().as_u64_pair();
        Self(Uuid::from_u64_pair(millis, random))
    }

    #[must_use]
    pub fn timestamp_millis(&self) -> u64 {
        self.0.as_u64_pair().0
    }
}

/// Accepts the hyphenated UUID form as well as a bare millisecond timestamp,
/// which maps to that time with zero random bits.
impl FromStr for WorkoutSessionID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(millis) = s.trim().parse::<u64>() {
            return Ok(Self(Uuid::from_u64_pair(millis, 0)));
        }
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for WorkoutSessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// What was performed for one exercise, copied from the catalog when the
/// exercise was added to the session.
///
/// The weight is kept as recorded and is not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionExerciseLog {
    pub exercise_id: ExerciseID,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f32,
}

impl SessionExerciseLog {
    #[must_use]
    pub fn total_reps(&self) -> u32 {
        self.sets.saturating_mul(self.reps)
    }

    /// Sets × reps × weight, where negative weights count as zero.
    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let total_reps = self.total_reps() as f32;
        total_reps * self.weight.max(0.0)
    }
}

impl From<&Exercise> for SessionExerciseLog {
    fn from(value: &Exercise) -> Self {
        Self {
            exercise_id: value.id,
            name: value.name.to_string(),
            sets: value.sets.into(),
            reps: value.reps.into(),
            weight: value.weight.map_or(0.0, f32::from),
        }
    }
}
