use chrono::Utc;
use gymlog_domain as domain;

/// The exercises of a workout that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OngoingSession {
    exercises: Vec<domain::SessionExerciseLog>,
}

impl OngoingSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn exercises(&self) -> &[domain::SessionExerciseLog] {
        &self.exercises
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Log the exercise with its current targets.
    pub fn add_exercise(&mut self, exercise: &domain::Exercise) {
        self.exercises.push(domain::SessionExerciseLog::from(exercise));
    }

    /// Log the exercise with the given id. Returns false if it is not part of
    /// `catalog`.
    pub fn add_exercise_by_id(
        &mut self,
        id: domain::ExerciseID,
        catalog: &[domain::Exercise],
    ) -> bool {
        let Some(exercise) = catalog.iter().find(|e| e.id == id) else {
            return false;
        };
        self.add_exercise(exercise);
        true
    }

    pub fn remove_exercise(&mut self, index: usize) {
        if index < self.exercises.len() {
            self.exercises.remove(index);
        }
    }

    pub fn reset(&mut self) {
        self.exercises.clear();
    }

    /// Store the logged exercises as a new workout session and start over.
    pub fn save<S: domain::WorkoutSessionService>(
        &mut self,
        service: &S,
    ) -> Result<domain::WorkoutSession, OngoingSessionError> {
        if self.exercises.is_empty() {
            return Err(OngoingSessionError::Empty);
        }

        let date = Utc::now();
        let workout_session = service.create_workout_session(domain::WorkoutSession {
            id: domain::WorkoutSessionID::at(date),
            date,
            exercises: self.exercises.clone(),
        })?;
        self.reset();
        Ok(workout_session)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum OngoingSessionError {
    #[error("Add at least one exercise")]
    Empty,
    #[error("Failed to save workout")]
    Create(#[from] domain::CreateError),
}
