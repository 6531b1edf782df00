use chrono::{DateTime, Utc};

use crate::{ExerciseID, WorkoutSession};

/// One logged execution of an exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStatRow {
    pub date: DateTime<Utc>,
    pub sets: u32,
    pub reps: u32,
    pub weight: f32,
}

impl ExerciseStatRow {
    #[must_use]
    pub fn total_reps(&self) -> u32 {
        self.sets.saturating_mul(self.reps)
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let total_reps = self.total_reps() as f32;
        total_reps * self.weight.max(0.0)
    }
}

/// Summary of all executions of a single exercise.
///
/// `rows` is ordered from the most recent to the oldest execution. All other
/// fields are derived from `rows`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseStats {
    pub rows: Vec<ExerciseStatRow>,
    pub session_count: usize,
    pub total_sets: u32,
    pub total_reps: u32,
    pub total_volume: f32,
    pub best_weight: f32,
    pub peak: Option<ExerciseStatRow>,
    pub first_weight: f32,
    pub last_weight: f32,
    pub progress_delta: f32,
    pub progress_percent: Option<f32>,
    pub average_volume: f32,
}

impl ExerciseStats {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Aggregate the history of one exercise.
///
/// Without a selected exercise, or if no session contains the exercise, the
/// result is `ExerciseStats::default()`.
#[must_use]
pub fn exercise_stats(
    workout_sessions: &[WorkoutSession],
    exercise_id: Option<ExerciseID>,
) -> ExerciseStats {
    let Some(exercise_id) = exercise_id else {
        return ExerciseStats::default();
    };

    let mut rows = workout_sessions
        .iter()
        .flat_map(|s| {
            s.exercises
                .iter()
                .filter(move |e| e.exercise_id == exercise_id)
                .map(|e| ExerciseStatRow {
                    date: s.date,
                    sets: e.sets,
                    reps: e.reps,
                    weight: e.weight,
                })
        })
        .collect::<Vec<_>>();

    // Stable, so rows with the same date keep their recording order.
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    summarize(rows)
}

fn summarize(rows: Vec<ExerciseStatRow>) -> ExerciseStats {
    let mut stats = ExerciseStats::default();
    let mut peak: Option<(usize, f32)> = None;

    for (i, row) in rows.iter().enumerate() {
        let volume = row.volume();

        stats.session_count += 1;
        stats.total_sets = stats.total_sets.saturating_add(row.sets);
        stats.total_reps = stats.total_reps.saturating_add(row.total_reps());
        stats.total_volume += volume;
        stats.best_weight = stats.best_weight.max(row.weight);

        if peak.is_none_or(|(_, peak_volume)| volume > peak_volume) {
            peak = Some((i, volume));
        }
    }

    stats.peak = peak.map(|(i, _)| rows[i].clone());
    stats.last_weight = rows.first().map_or(0.0, |r| r.weight);
    stats.first_weight = rows.last().map_or(0.0, |r| r.weight);
    stats.progress_delta = stats.last_weight - stats.first_weight;
    stats.progress_percent = if stats.first_weight > 0.0 {
        Some(stats.progress_delta / stats.first_weight * 100.0)
    } else {
        None
    };

    #[allow(clippy::cast_precision_loss)]
    if stats.session_count > 0 {
        stats.average_volume = stats.total_volume / stats.session_count as f32;
    }

    stats.rows = rows;
    stats
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    use crate::SessionExerciseLog;

    use super::*;

    static START: std::sync::LazyLock<DateTime<Utc>> =
        std::sync::LazyLock::new(|| Utc.with_ymd_and_hms(2024, 1, 8, 18, 0, 0).unwrap());

    fn workout_session(
        day: i64,
        exercises: &[(u32, u32, u32, f32)],
    ) -> WorkoutSession {
        WorkoutSession {
            id: u128::try_from(day).unwrap().into(),
            date: *START + Duration::days(day),
            exercises: exercises
                .iter()
                .map(|(id, sets, reps, weight)| SessionExerciseLog {
                    exercise_id: (*id).into(),
                    name: format!("Exercise {id}"),
                    sets: *sets,
                    reps: *reps,
                    weight: *weight,
                })
                .collect(),
        }
    }

    fn row(day: i64, sets: u32, reps: u32, weight: f32) -> ExerciseStatRow {
        ExerciseStatRow {
            date: *START + Duration::days(day),
            sets,
            reps,
            weight,
        }
    }

    #[test]
    fn test_exercise_stats_without_selection() {
        let workout_sessions = vec![workout_session(0, &[(1, 3, 8, 50.0)])];

        assert_eq!(
            exercise_stats(&workout_sessions, None),
            ExerciseStats::default()
        );
    }

    #[test]
    fn test_exercise_stats_without_matching_sessions() {
        let workout_sessions = vec![
            workout_session(0, &[(1, 3, 8, 50.0)]),
            workout_session(2, &[(2, 3, 10, 40.0)]),
        ];

        let stats = exercise_stats(&workout_sessions, Some(3.into()));

        assert_eq!(stats, ExerciseStats::default());
        assert_eq!(stats.session_count, 0);
        assert_approx_eq!(stats.total_volume, 0.0);
        assert_eq!(stats.progress_percent, None);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_exercise_stats_progress() {
        let workout_sessions = vec![
            workout_session(0, &[(1, 3, 8, 50.0), (2, 3, 10, 40.0)]),
            workout_session(3, &[(2, 3, 10, 42.5), (1, 3, 8, 55.0)]),
            workout_session(7, &[(1, 3, 6, 60.0)]),
        ];

        let stats = exercise_stats(&workout_sessions, Some(1.into()));

        assert_eq!(
            stats.rows,
            vec![row(7, 3, 6, 60.0), row(3, 3, 8, 55.0), row(0, 3, 8, 50.0)]
        );
        assert_eq!(stats.session_count, 3);
        assert_eq!(stats.total_sets, 9);
        assert_eq!(stats.total_reps, 66);
        assert_approx_eq!(stats.total_volume, 1080.0 + 1320.0 + 1200.0);
        assert_approx_eq!(stats.best_weight, 60.0);
        assert_eq!(stats.peak, Some(row(3, 3, 8, 55.0)));
        assert_approx_eq!(stats.first_weight, 50.0);
        assert_approx_eq!(stats.last_weight, 60.0);
        assert_approx_eq!(stats.progress_delta, 10.0);
        assert_approx_eq!(stats.progress_percent.unwrap(), 20.0);
        assert_approx_eq!(stats.average_volume, 1200.0);
    }

    #[test]
    fn test_exercise_stats_unordered_history() {
        let workout_sessions = vec![
            workout_session(7, &[(1, 3, 8, 60.0)]),
            workout_session(0, &[(1, 3, 8, 50.0)]),
            workout_session(3, &[(1, 3, 8, 55.0)]),
        ];

        let stats = exercise_stats(&workout_sessions, Some(1.into()));

        assert_approx_eq!(stats.first_weight, 50.0);
        assert_approx_eq!(stats.last_weight, 60.0);
        assert_eq!(stats.peak, Some(row(7, 3, 8, 60.0)));
    }

    #[test]
    fn test_exercise_stats_peak_tie_prefers_most_recent() {
        let workout_sessions = vec![
            workout_session(0, &[(1, 2, 10, 50.0)]),
            workout_session(1, &[(1, 4, 5, 50.0)]),
            workout_session(2, &[(1, 1, 1, 20.0)]),
        ];

        let stats = exercise_stats(&workout_sessions, Some(1.into()));

        assert_eq!(stats.peak, Some(row(1, 4, 5, 50.0)));
    }

    #[test]
    fn test_exercise_stats_negative_weight() {
        let workout_sessions = vec![
            workout_session(0, &[(1, 3, 10, -10.0)]),
            workout_session(1, &[(1, 3, 10, 20.0)]),
        ];

        let stats = exercise_stats(&workout_sessions, Some(1.into()));

        assert_approx_eq!(stats.total_volume, 600.0);
        assert_approx_eq!(stats.average_volume, 300.0);
        assert_approx_eq!(stats.progress_delta, 30.0);
        assert_eq!(stats.progress_percent, None);
    }

    #[test]
    fn test_exercise_stats_bodyweight_exercise() {
        let workout_sessions = vec![
            workout_session(0, &[(6, 3, 30, 0.0)]),
            workout_session(1, &[(6, 3, 30, 0.0)]),
        ];

        let stats = exercise_stats(&workout_sessions, Some(6.into()));

        assert_eq!(stats.session_count, 2);
        assert_eq!(stats.total_reps, 180);
        assert_approx_eq!(stats.best_weight, 0.0);
        assert_eq!(stats.peak, Some(row(1, 3, 30, 0.0)));
        assert_eq!(stats.progress_percent, None);
    }

    #[test]
    fn test_exercise_stats_repeated_exercise_in_session() {
        let workout_sessions = vec![workout_session(0, &[(1, 3, 8, 50.0), (1, 2, 5, 70.0)])];

        let stats = exercise_stats(&workout_sessions, Some(1.into()));

        assert_eq!(stats.rows, vec![row(0, 3, 8, 50.0), row(0, 2, 5, 70.0)]);
        assert_approx_eq!(stats.last_weight, 50.0);
        assert_approx_eq!(stats.first_weight, 70.0);
    }
}
