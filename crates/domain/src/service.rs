use log::{debug, error};

use crate::{
    CreateError, DeleteError, Exercise, ExerciseID, ExerciseRepository, ExerciseService,
    NewExercise, Plan, PlanID, PlanRepository, PlanService, ReadError, UpdateError,
    WorkoutSession, WorkoutSessionRepository, WorkoutSessionService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($result: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $result;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable(_)) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(exercise),
            CreateError,
            "create",
            "exercise"
        )
    }

    fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository.replace_exercise(exercise),
            UpdateError,
            "replace",
            "exercise"
        )
    }

    fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

impl<R: PlanRepository> PlanService for Service<R> {
    fn get_plans(&self) -> Result<Vec<Plan>, ReadError> {
        log_on_error!(self.repository.read_plans(), ReadError, "get", "plans")
    }

    fn create_plan(&self, plan: Plan) -> Result<Plan, CreateError> {
        log_on_error!(
            self.repository.create_plan(plan),
            CreateError,
            "create",
            "plan"
        )
    }

    fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError> {
        log_on_error!(
            self.repository.delete_plan(id),
            DeleteError,
            "delete",
            "plan"
        )
    }
}

impl<R: WorkoutSessionRepository> WorkoutSessionService for Service<R> {
    fn get_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError> {
        log_on_error!(
            self.repository.read_workout_sessions(),
            ReadError,
            "get",
            "workout sessions"
        )
    }

    fn create_workout_session(
        &self,
        workout_session: WorkoutSession,
    ) -> Result<WorkoutSession, CreateError> {
        log_on_error!(
            self.repository.create_workout_session(workout_session),
            CreateError,
            "create",
            "workout session"
        )
    }

    fn clear_workout_sessions(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.clear_workout_sessions(),
            DeleteError,
            "clear",
            "workout sessions"
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use assert_approx_eq::assert_approx_eq;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use crate::{MuscleGroup, Name, Reps, SessionExerciseLog, Sets, StorageError, Weight};

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        exercises: RefCell<Vec<Exercise>>,
        workout_sessions: RefCell<Vec<WorkoutSession>>,
        unavailable: bool,
    }

    impl ExerciseRepository for FakeRepository {
        fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
            if self.unavailable {
                return Err(StorageError::Unavailable("offline".into()).into());
            }
            Ok(self.exercises.borrow().clone())
        }

        fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError> {
            let exercise = exercise.with_id(99.into());
            self.exercises.borrow_mut().push(exercise.clone());
            Ok(exercise)
        }

        fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
            Ok(exercise)
        }

        fn delete_exercise(&self, _id: ExerciseID) -> Result<ExerciseID, DeleteError> {
            Err(DeleteError::Other("read-only".into()))
        }
    }

    impl WorkoutSessionRepository for FakeRepository {
        fn read_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError> {
            Ok(self.workout_sessions.borrow().clone())
        }

        fn create_workout_session(
            &self,
            workout_session: WorkoutSession,
        ) -> Result<WorkoutSession, CreateError> {
            self.workout_sessions
                .borrow_mut()
                .push(workout_session.clone());
            Ok(workout_session)
        }

        fn clear_workout_sessions(&self) -> Result<(), DeleteError> {
            self.workout_sessions.borrow_mut().clear();
            Ok(())
        }
    }

    fn new_exercise() -> NewExercise {
        NewExercise {
            name: Name::new("Bench Press").unwrap(),
            muscle_group: MuscleGroup::Chest,
            sets: Sets::new(3).unwrap(),
            reps: Reps::new(8).unwrap(),
            weight: Some(Weight::new(50.0).unwrap()),
            notes: None,
        }
    }

    #[test]
    fn test_service_exercises() {
        let service = Service::new(FakeRepository::default());

        let exercise = service.create_exercise(new_exercise()).unwrap();

        assert_eq!(service.get_exercises().unwrap(), vec![exercise.clone()]);
        assert_eq!(service.get_exercise(99.into()).unwrap(), Some(exercise));
        assert_eq!(service.get_exercise(1.into()).unwrap(), None);
        assert!(matches!(
            service.delete_exercise(99.into()),
            Err(DeleteError::Other(_))
        ));
    }

    #[test]
    fn test_service_passes_storage_errors() {
        let service = Service::new(FakeRepository {
            unavailable: true,
            ..FakeRepository::default()
        });

        assert!(matches!(
            service.get_exercises(),
            Err(ReadError::Storage(StorageError::Unavailable(_)))
        ));
    }

    #[test]
    fn test_service_exercise_stats() {
        let service = Service::new(FakeRepository::default());
        let exercise = service.create_exercise(new_exercise()).unwrap();

        assert_eq!(
            service.get_exercise_stats(Some(exercise.id)).unwrap(),
            crate::ExerciseStats::default()
        );

        service
            .create_workout_session(WorkoutSession {
                id: 1.into(),
                date: Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
                exercises: vec![SessionExerciseLog::from(&exercise)],
            })
            .unwrap();

        let stats = service.get_exercise_stats(Some(exercise.id)).unwrap();
        assert_eq!(stats.session_count, 1);
        assert_approx_eq!(stats.total_volume, 1200.0);
        assert_eq!(
            service.get_exercise_stats(None).unwrap(),
            crate::ExerciseStats::default()
        );

        service.clear_workout_sessions().unwrap();
        assert_eq!(service.get_workout_sessions().unwrap(), vec![]);
    }
}
