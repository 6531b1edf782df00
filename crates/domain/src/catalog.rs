use crate::{Exercise, ExerciseID, MuscleGroup, Name, Reps, Sets, Weight};

struct Template {
    name: &'static str,
    muscle_group: MuscleGroup,
    sets: u32,
    reps: u32,
    weight: Option<f32>,
    notes: Option<&'static str>,
}

impl Template {
    fn to_exercise(&self, id: ExerciseID) -> Option<Exercise> {
        Some(Exercise {
            id,
            name: Name::new(self.name).ok()?,
            muscle_group: self.muscle_group.clone(),
            sets: Sets::new(self.sets).ok()?,
            reps: Reps::new(self.reps).ok()?,
            weight: match self.weight {
                Some(weight) => Some(Weight::new(weight).ok()?),
                None => None,
            },
            notes: self.notes.map(str::to_string),
        })
    }
}

static DEFAULT_EXERCISES: [Template; 6] = [
    Template {
        name: "Barbell Bench Press",
        muscle_group: MuscleGroup::Chest,
        sets: 3,
        reps: 8,
        weight: Some(50.0),
        notes: Some("Focus on technique, no bouncing"),
    },
    Template {
        name: "Front Lat Pulldown",
        muscle_group: MuscleGroup::Back,
        sets: 3,
        reps: 10,
        weight: Some(40.0),
        notes: Some("Pull to the chest without swinging"),
    },
    Template {
        name: "Smith Machine Squat",
        muscle_group: MuscleGroup::Legs,
        sets: 4,
        reps: 8,
        weight: Some(60.0),
        notes: Some("Go at least to parallel"),
    },
    Template {
        name: "Standing Dumbbell Curl",
        muscle_group: MuscleGroup::Arms,
        sets: 3,
        reps: 12,
        weight: Some(10.0),
        notes: None,
    },
    Template {
        name: "EZ Bar French Press",
        muscle_group: MuscleGroup::Arms,
        sets: 3,
        reps: 10,
        weight: Some(25.0),
        notes: None,
    },
    Template {
        name: "Plank",
        muscle_group: MuscleGroup::Core,
        sets: 3,
        reps: 30,
        weight: None,
        notes: Some("30 seconds per set"),
    },
];

/// Exercises a fresh installation starts with, numbered from 1.
#[must_use]
pub fn default_exercises() -> Vec<Exercise> {
    (1..)
        .zip(DEFAULT_EXERCISES.iter())
        .filter_map(|(id, template)| template.to_exercise(ExerciseID::from(id)))
        .collect()
}

/// Lowest id given to a user-created exercise, even after built-in exercises
/// have been deleted.
#[must_use]
pub fn first_custom_exercise_id() -> ExerciseID {
    ExerciseID::from(
        u32::try_from(DEFAULT_EXERCISES.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1),
    )
}
