use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fmt::Display,
};

use chrono::{DateTime, Utc};
use gymlog_domain as domain;
use gymlog_web_app::log;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{BackendError, Key, KeyValueStore};

/// Collections held in memory and written through to a key-value backend on
/// every mutation.
pub struct LocalStorage<S> {
    backend: S,
    exercises: RefCell<Vec<domain::Exercise>>,
    exercise_id_watermark: Cell<Option<domain::ExerciseID>>,
    plans: RefCell<Vec<domain::Plan>>,
    workout_sessions: RefCell<Vec<domain::WorkoutSession>>,
}

impl<S: KeyValueStore> LocalStorage<S> {
    /// Load all collections from `backend`.
    ///
    /// Missing or malformed exercise data is replaced by the default catalog,
    /// other malformed collections start empty.
    pub fn open(backend: S) -> Result<Self, domain::StorageError> {
        let exercises = load::<_, Exercise, domain::Exercise>(&backend, Key::Exercises)?
            .unwrap_or_else(domain::default_exercises);
        let plans = load::<_, Plan, domain::Plan>(&backend, Key::Plans)?.unwrap_or_default();
        let workout_sessions =
            load::<_, WorkoutSession, domain::WorkoutSession>(&backend, Key::WorkoutSessions)?
                .unwrap_or_default();
        let exercise_id_watermark =
            domain::next_exercise_id(&exercises, domain::first_custom_exercise_id());

        Ok(Self {
            backend,
            exercises: RefCell::new(exercises),
            exercise_id_watermark: Cell::new(exercise_id_watermark),
            plans: RefCell::new(plans),
            workout_sessions: RefCell::new(workout_sessions),
        })
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn write<'a, T: 'a, D: From<&'a T> + Serialize>(
        &self,
        key: Key,
        values: &'a [T],
    ) -> Result<(), domain::StorageError> {
        let values = values.iter().map(D::from).collect::<Vec<_>>();
        Ok(self.backend.set(key, &values)?)
    }
}

fn load<S, D, T>(backend: &S, key: Key) -> Result<Option<Vec<T>>, domain::StorageError>
where
    S: KeyValueStore,
    D: DeserializeOwned,
    T: TryFrom<D>,
    T::Error: Display,
{
    match backend.get::<Vec<D>>(key) {
        Ok(Some(values)) => match values
            .into_iter()
            .map(T::try_from)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(values) => Ok(Some(values)),
            Err(err) => {
                ::log::warn!("discarding invalid data in {}: {err}", key.as_ref());
                Ok(None)
            }
        },
        Ok(None) => Ok(None),
        Err(BackendError::Malformed(err)) => {
            ::log::warn!("discarding malformed data in {}: {err}", key.as_ref());
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

impl<S: KeyValueStore> domain::ExerciseRepository for LocalStorage<S> {
    fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        Ok(self.exercises.borrow().clone())
    }

    fn create_exercise(
        &self,
        exercise: domain::NewExercise,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let mut exercises = self.exercises.borrow().clone();
        let id = self
            .exercise_id_watermark
            .get()
            .and_then(|watermark| domain::next_exercise_id(&exercises, watermark))
            .ok_or(domain::CreateError::IdExhausted)?;
        let exercise = exercise.with_id(id);
        exercises.push(exercise.clone());
        self.write::<_, Exercise>(Key::Exercises, &exercises)?;
        self.exercise_id_watermark.set(id.next());
        *self.exercises.borrow_mut() = exercises;
        Ok(exercise)
    }

    fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let mut exercises = self.exercises.borrow().clone();
        let Some(entry) = exercises.iter_mut().find(|e| e.id == exercise.id) else {
            return Ok(exercise);
        };
        *entry = exercise.clone();
        self.write::<_, Exercise>(Key::Exercises, &exercises)?;
        *self.exercises.borrow_mut() = exercises;
        Ok(exercise)
    }

    fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        let mut exercises = self.exercises.borrow().clone();
        let len = exercises.len();
        exercises.retain(|e| e.id != id);
        if exercises.len() != len {
            self.write::<_, Exercise>(Key::Exercises, &exercises)?;
            *self.exercises.borrow_mut() = exercises;
        }
        Ok(id)
    }
}

impl<S: KeyValueStore> domain::PlanRepository for LocalStorage<S> {
    fn read_plans(&self) -> Result<Vec<domain::Plan>, domain::ReadError> {
        Ok(self.plans.borrow().clone())
    }

    fn create_plan(&self, plan: domain::Plan) -> Result<domain::Plan, domain::CreateError> {
        let mut plans = self.plans.borrow().clone();
        if plans.iter().any(|p| p.id == plan.id) {
            return Err(domain::CreateError::Conflict);
        }
        plans.push(plan.clone());
        self.write::<_, Plan>(Key::Plans, &plans)?;
        *self.plans.borrow_mut() = plans;
        Ok(plan)
    }

    fn delete_plan(&self, id: domain::PlanID) -> Result<domain::PlanID, domain::DeleteError> {
        let mut plans = self.plans.borrow().clone();
        let len = plans.len();
        plans.retain(|p| p.id != id);
        if plans.len() != len {
            self.write::<_, Plan>(Key::Plans, &plans)?;
            *self.plans.borrow_mut() = plans;
        }
        Ok(id)
    }
}

impl<S: KeyValueStore> domain::WorkoutSessionRepository for LocalStorage<S> {
    fn read_workout_sessions(&self) -> Result<Vec<domain::WorkoutSession>, domain::ReadError> {
        Ok(self.workout_sessions.borrow().clone())
    }

    fn create_workout_session(
        &self,
        workout_session: domain::WorkoutSession,
    ) -> Result<domain::WorkoutSession, domain::CreateError> {
        let mut workout_sessions = self.workout_sessions.borrow().clone();
        if workout_sessions.iter().any(|s| s.id == workout_session.id) {
            return Err(domain::CreateError::Conflict);
        }
        workout_sessions.push(workout_session.clone());
        self.write::<_, WorkoutSession>(Key::WorkoutSessions, &workout_sessions)?;
        *self.workout_sessions.borrow_mut() = workout_sessions;
        Ok(workout_session)
    }

    fn clear_workout_sessions(&self) -> Result<(), domain::DeleteError> {
        self.write::<domain::WorkoutSession, WorkoutSession>(Key::WorkoutSessions, &[])?;
        self.workout_sessions.borrow_mut().clear();
        Ok(())
    }
}

/// Application log kept under its own key.
pub struct Log<S> {
    backend: S,
}

impl<S> Log<S> {
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self { backend }
    }
}

impl<S: KeyValueStore + Send + Sync + 'static> log::Repository for Log<S> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.backend
            .get(Key::Log)
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::prepend(&mut entries, entry);
        self.backend
            .set(Key::Log, &entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    MuscleGroup(#[from] domain::MuscleGroupError),
    #[error(transparent)]
    Sets(#[from] domain::SetsError),
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error("invalid workout session id: {0}")]
    WorkoutSessionID(#[from] uuid::Error),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: u32,
    pub name: String,
    pub muscle_group: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            muscle_group: value.muscle_group.to_string(),
            sets: value.sets.into(),
            reps: value.reps.into(),
            weight_kg: value.weight.map(f32::from),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = DecodeError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            muscle_group: domain::MuscleGroup::new(&value.muscle_group)?,
            sets: domain::Sets::new(value.sets)?,
            reps: domain::Reps::new(value.reps)?,
            weight: value.weight_kg.map(domain::Weight::new).transpose()?,
            notes: value.notes,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub focus: String,
    pub frequency_per_week: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub days: Vec<PlanDay>,
}

impl From<&domain::Plan> for Plan {
    fn from(value: &domain::Plan) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            focus: value.focus.clone(),
            frequency_per_week: value.frequency_per_week,
            notes: value.notes.clone(),
            created_at: value.created_at,
            days: value.days.iter().map(PlanDay::from).collect(),
        }
    }
}

impl TryFrom<Plan> for domain::Plan {
    type Error = DecodeError;

    fn try_from(value: Plan) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            focus: value.focus,
            frequency_per_week: value.frequency_per_week,
            notes: value.notes,
            created_at: value.created_at,
            days: value
                .days
                .into_iter()
                .map(domain::PlanDay::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDay {
    pub id: Uuid,
    pub title: String,
    pub emphasis: String,
    pub exercises: Vec<PlanExercise>,
}

impl From<&domain::PlanDay> for PlanDay {
    fn from(value: &domain::PlanDay) -> Self {
        Self {
            id: *value.id,
            title: value.title.clone(),
            emphasis: value.emphasis.clone(),
            exercises: value.exercises.iter().map(PlanExercise::from).collect(),
        }
    }
}

impl TryFrom<PlanDay> for domain::PlanDay {
    type Error = DecodeError;

    fn try_from(value: PlanDay) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            title: value.title,
            emphasis: value.emphasis,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::PlanExercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanExercise {
    pub exercise_id: u32,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&domain::PlanExercise> for PlanExercise {
    fn from(value: &domain::PlanExercise) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            name: value.name.clone(),
            sets: value.sets.into(),
            reps: value.reps.into(),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<PlanExercise> for domain::PlanExercise {
    type Error = DecodeError;

    fn try_from(value: PlanExercise) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_id: value.exercise_id.into(),
            name: value.name,
            sets: domain::Sets::new(value.sets)?,
            reps: domain::Reps::new(value.reps)?,
            notes: value.notes,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: String,
    pub date: DateTime<Utc>,
    pub exercises: Vec<SessionExerciseLog>,
}

impl From<&domain::WorkoutSession> for WorkoutSession {
    fn from(value: &domain::WorkoutSession) -> Self {
        Self {
            id: value.id.to_string(),
            date: value.date,
            exercises: value
                .exercises
                .iter()
                .map(SessionExerciseLog::from)
                .collect(),
        }
    }
}

impl TryFrom<WorkoutSession> for domain::WorkoutSession {
    type Error = DecodeError;

    fn try_from(value: WorkoutSession) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.parse()?,
            date: value.date,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::SessionExerciseLog::from)
                .collect(),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionExerciseLog {
    pub exercise_id: u32,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight_kg: f32,
}

impl From<&domain::SessionExerciseLog> for SessionExerciseLog {
    fn from(value: &domain::SessionExerciseLog) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            name: value.name.clone(),
            sets: value.sets,
            reps: value.reps,
            weight_kg: value.weight,
        }
    }
}

impl From<SessionExerciseLog> for domain::SessionExerciseLog {
    fn from(value: SessionExerciseLog) -> Self {
        Self {
            exercise_id: value.exercise_id.into(),
            name: value.name,
            sets: value.sets,
            reps: value.reps,
            weight: value.weight_kg,
        }
    }
}
