//! Attempt bookkeeping.
//!
//! Pure updates applied to a student's per-skill progress and global stats
//! after each scored attempt. Loading and saving the records is the caller's
//! job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ExerciseType;

/// Score as a percentage of the maximum (0 when the maximum is not positive).
pub fn attempt_percentage(score: f64, max_score: f64) -> f64 {
    if max_score > 0.0 {
        score / max_score * 100.0
    } else {
        0.0
    }
}

/// Progress of one student on one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProgress {
    pub skill: ExerciseType,
    pub total_exercises: u32,
    pub completed_exercises: u32,
    /// Running mean of attempt percentages.
    pub average_score: f64,
    #[serde(default)]
    pub last_practice: Option<DateTime<Utc>>,
}

impl SkillProgress {
    pub fn new(skill: ExerciseType) -> Self {
        Self {
            skill,
            total_exercises: 0,
            completed_exercises: 0,
            average_score: 0.0,
            last_practice: None,
        }
    }

    pub fn record_attempt(&mut self, percentage: f64, at: DateTime<Utc>) {
        let previous = self.completed_exercises as f64;
        self.completed_exercises += 1;
        self.total_exercises = self.total_exercises.max(self.completed_exercises);
        self.average_score =
            (self.average_score * previous + percentage) / self.completed_exercises as f64;
        self.last_practice = Some(at);
    }
}

/// Global statistics of one student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_time_minutes: u64,
    pub total_attempts: u32,
    pub average_score: f64,
    pub streak_days: u32,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

impl UserStats {
    pub fn record_attempt(&mut self, percentage: f64, duration_seconds: u64, at: DateTime<Utc>) {
        let previous = self.total_attempts as f64;
        self.total_attempts += 1;
        self.average_score =
            (self.average_score * previous + percentage) / self.total_attempts as f64;
        self.total_time_minutes += duration_seconds / 60;
        self.streak_days = self.next_streak(at);
        self.last_activity = Some(at);
    }

    /// Streak after activity at `at`, counted in whole 24-hour periods since
    /// the last activity: within one period it holds, after exactly one it
    /// grows, after more it restarts at 1.
    fn next_streak(&self, at: DateTime<Utc>) -> u32 {
        let Some(last) = self.last_activity else {
            return 1;
        };
        match (at - last).num_days() {
            1 => self.streak_days + 1,
            d if d > 1 => 1,
            _ => self.streak_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn percentage() {
        assert_eq!(attempt_percentage(20.0, 25.0), 80.0);
        assert_eq!(attempt_percentage(5.0, 0.0), 0.0);
    }

    #[test]
    fn skill_progress_running_average() {
        let mut progress = SkillProgress::new(ExerciseType::ProductionEcrite);
        progress.record_attempt(80.0, at(1, 9));
        progress.record_attempt(60.0, at(1, 10));
        assert_eq!(progress.completed_exercises, 2);
        assert_eq!(progress.total_exercises, 2);
        assert_eq!(progress.average_score, 70.0);
        assert_eq!(progress.last_practice, Some(at(1, 10)));
    }

    #[test]
    fn total_exercises_never_shrinks() {
        let mut progress = SkillProgress::new(ExerciseType::ComprehensionEcrite);
        progress.total_exercises = 10;
        progress.record_attempt(50.0, at(1, 9));
        assert_eq!(progress.total_exercises, 10);
        assert_eq!(progress.completed_exercises, 1);
    }

    #[test]
    fn first_activity_starts_streak() {
        let mut stats = UserStats::default();
        stats.record_attempt(90.0, 600, at(1, 9));
        assert_eq!(stats.streak_days, 1);
        assert_eq!(stats.total_time_minutes, 10);
        assert_eq!(stats.average_score, 90.0);
    }

    #[test]
    fn streak_grows_holds_and_resets() {
        let mut stats = UserStats::default();
        stats.record_attempt(50.0, 59, at(1, 9));
        assert_eq!(stats.total_time_minutes, 0);

        stats.record_attempt(50.0, 120, at(1, 20));
        assert_eq!(stats.streak_days, 1, "same period holds");

        stats.record_attempt(50.0, 120, at(1, 20) + Duration::hours(30));
        assert_eq!(stats.streak_days, 2, "one period later grows");

        stats.record_attempt(50.0, 120, at(10, 9));
        assert_eq!(stats.streak_days, 1, "gap resets");

        assert_eq!(stats.total_attempts, 4);
        assert_eq!(stats.total_time_minutes, 6);
    }

    #[test]
    fn same_period_keeps_stored_streak() {
        let mut stats = UserStats {
            streak_days: 0,
            last_activity: Some(at(1, 9)),
            ..UserStats::default()
        };
        stats.record_attempt(70.0, 300, at(1, 15));
        assert_eq!(stats.streak_days, 0);
        assert_eq!(stats.last_activity, Some(at(1, 15)));
    }
}
