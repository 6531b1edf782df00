use gymlog_domain as domain;

use crate::Feedback;

/// Raw text of the exercise form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseForm {
    pub name: String,
    pub muscle_group: String,
    pub sets: String,
    pub reps: String,
    pub weight: String,
    pub notes: String,
}

impl ExerciseForm {
    /// Prefill the form for editing an existing exercise.
    #[must_use]
    pub fn from_exercise(exercise: &domain::Exercise) -> Self {
        Self {
            name: exercise.name.to_string(),
            muscle_group: exercise.muscle_group.to_string(),
            sets: exercise.sets.to_string(),
            reps: exercise.reps.to_string(),
            weight: exercise.weight.map(|w| w.to_string()).unwrap_or_default(),
            notes: exercise.notes.clone().unwrap_or_default(),
        }
    }

    /// A blank weight means no weight. Blank notes become `None`.
    pub fn validate(&self) -> Result<domain::NewExercise, ExerciseFormError> {
        let weight = self.weight.trim();
        let notes = self.notes.trim();
        Ok(domain::NewExercise {
            name: domain::Name::new(&self.name)?,
            muscle_group: domain::MuscleGroup::new(&self.muscle_group)?,
            sets: domain::Sets::try_from(self.sets.as_str())?,
            reps: domain::Reps::try_from(self.reps.as_str())?,
            weight: if weight.is_empty() {
                None
            } else {
                Some(domain::Weight::try_from(weight)?)
            },
            notes: if notes.is_empty() {
                None
            } else {
                Some(notes.to_string())
            },
        })
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Add the exercise to the catalog and clear the form.
    ///
    /// The form is kept unchanged if validation or storing fails.
    pub fn submit<S: domain::ExerciseService>(
        &mut self,
        service: &S,
    ) -> Result<domain::Exercise, ExerciseFormError> {
        let exercise = service.create_exercise(self.validate()?)?;
        *self = Self::default();
        Ok(exercise)
    }

    /// Replace the exercise with the given id by the form content.
    pub fn submit_changes<S: domain::ExerciseService>(
        &self,
        id: domain::ExerciseID,
        service: &S,
    ) -> Result<domain::Exercise, ExerciseFormError> {
        Ok(service.replace_exercise(self.validate()?.with_id(id))?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExerciseFormError {
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
    #[error("Failed to create exercise")]
    Create(#[from] domain::CreateError),
    #[error("Failed to update exercise")]
    Update(#[from] domain::UpdateError),
}

impl From<&ExerciseFormError> for Feedback {
    fn from(value: &ExerciseFormError) -> Self {
        Feedback::error(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn form() -> ExerciseForm {
        ExerciseForm {
            name: String::from(" Cable Row "),
            muscle_group: String::from("back"),
            sets: String::from("4"),
            reps: String::from("10"),
            weight: String::from("35.5"),
            notes: String::from("  "),
        }
    }

    #[derive(Default)]
    struct FakeService {
        exercises: RefCell<Vec<domain::Exercise>>,
    }

    impl domain::ExerciseService for FakeService {
        fn get_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
            Ok(self.exercises.borrow().clone())
        }

        fn create_exercise(
            &self,
            exercise: domain::NewExercise,
        ) -> Result<domain::Exercise, domain::CreateError> {
            let exercise = exercise.with_id(7.into());
            self.exercises.borrow_mut().push(exercise.clone());
            Ok(exercise)
        }

        fn replace_exercise(
            &self,
            exercise: domain::Exercise,
        ) -> Result<domain::Exercise, domain::UpdateError> {
            Ok(exercise)
        }

        fn delete_exercise(
            &self,
            id: domain::ExerciseID,
        ) -> Result<domain::ExerciseID, domain::DeleteError> {
            Ok(id)
        }
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            form().validate().unwrap(),
            domain::NewExercise {
                name: domain::Name::new("Cable Row").unwrap(),
                muscle_group: domain::MuscleGroup::Back,
                sets: domain::Sets::new(4).unwrap(),
                reps: domain::Reps::new(10).unwrap(),
                weight: Some(domain::Weight::new(35.5).unwrap()),
                notes: None,
            }
        );
    }

    #[test]
    fn test_validate_blank_weight() {
        let form = ExerciseForm {
            weight: String::new(),
            notes: String::from(" Hold 30 seconds "),
            ..form()
        };
        let exercise = form.validate().unwrap();

        assert_eq!(exercise.weight, None);
        assert_eq!(exercise.notes, Some(String::from("Hold 30 seconds")));
    }

    #[rstest]
    #[case::name(ExerciseForm { name: String::new(), ..form() }, "Name is required")]
    #[case::muscle_group(
        ExerciseForm { muscle_group: String::new(), ..form() },
        "Muscle group is required"
    )]
    #[case::sets(ExerciseForm { sets: String::from("0"), ..form() }, "Sets must be greater than 0")]
    #[case::reps(ExerciseForm { reps: String::new(), ..form() }, "Reps must be an integer")]
    #[case::weight(
        ExerciseForm { weight: String::from("-1"), ..form() },
        "Weight must not be negative"
    )]
    fn test_validate_invalid(#[case] form: ExerciseForm, #[case] message: &str) {
        let err = form.validate().unwrap_err();

        assert!(!form.is_valid());
        assert_eq!(Feedback::from(&err), Feedback::error(message));
    }

    #[test]
    fn test_submit() {
        let service = FakeService::default();
        let mut form = form();

        let exercise = form.submit(&service).unwrap();

        assert_eq!(exercise.id, 7.into());
        assert_eq!(form, ExerciseForm::default());
        assert_eq!(
            domain::ExerciseService::get_exercises(&service).unwrap(),
            vec![exercise]
        );
    }

    #[test]
    fn test_submit_invalid() {
        let service = FakeService::default();
        let mut form = ExerciseForm {
            reps: String::from("0"),
            ..form()
        };

        assert!(matches!(
            form.submit(&service),
            Err(ExerciseFormError::Reps(domain::RepsError::Zero))
        ));
        assert_eq!(form.reps, "0");
        assert!(service.exercises.borrow().is_empty());
    }

    #[test]
    fn test_from_exercise() {
        let exercise = form().validate().unwrap().with_id(3.into());
        let form = ExerciseForm::from_exercise(&exercise);

        assert_eq!(form.name, "Cable Row");
        assert_eq!(form.muscle_group, "Back");
        assert_eq!(form.weight, "35.5");
        assert_eq!(
            form.submit_changes(3.into(), &FakeService::default())
                .unwrap(),
            exercise
        );
    }
}
