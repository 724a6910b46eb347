#![allow(dead_code)]

//! Client-facing progress state over a canonical roadmap: task toggling,
//! derived aggregates, the streak counter, and the assessment feedback loop
//! that flags weak-area tasks on the following day.

use serde::Serialize;

use crate::roadmap::assessment::AssessmentOutcome;
use crate::roadmap::schema::{Day, TaskType};

/// A completed assessment with `score >= 70` extends the streak.
const STREAK_SCORE_THRESHOLD: u32 = 70;

/// Controls the assessment feedback loop. By default every system-design
/// task on the following day is flagged after any miss, regardless of the
/// missed topics; the switch exists for callers that only want topic matches.
#[derive(Debug, Clone)]
pub struct WeakAreaConfig {
    pub flag_system_design: bool,
}

impl Default for WeakAreaConfig {
    fn default() -> Self {
        WeakAreaConfig {
            flag_system_design: true,
        }
    }
}

/// Aggregates derived from the current roadmap state. Always recomputed,
/// never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStats {
    pub total_days: usize,
    pub completed_days: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overall_progress_percent: u32,
}

/// Owns the canonical roadmap in mutable form for one session.
#[derive(Debug)]
pub struct ProgressTracker {
    days: Vec<Day>,
    streak: u32,
    weak_area_config: WeakAreaConfig,
}

impl ProgressTracker {
    pub fn new(days: Vec<Day>) -> Self {
        Self::with_config(days, WeakAreaConfig::default())
    }

    pub fn with_config(days: Vec<Day>, weak_area_config: WeakAreaConfig) -> Self {
        Self {
            days,
            streak: 0,
            weak_area_config,
        }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn into_days(self) -> Vec<Day> {
        self.days
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Flips `completed` on exactly the matching task. A no-op when the day
    /// index or task id does not exist; no other day or task is touched.
    /// Returns whether a task was toggled.
    pub fn toggle_task(&mut self, day_index: usize, task_id: &str) -> bool {
        let Some(day) = self.days.get_mut(day_index) else {
            return false;
        };
        match day.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn stats(&self) -> RoadmapStats {
        let total_days = self.days.len();
        let completed_days = self.days.iter().filter(|d| d.is_complete()).count();
        let total_tasks: usize = self.days.iter().map(|d| d.tasks.len()).sum();
        let completed_tasks: usize = self
            .days
            .iter()
            .map(|d| d.tasks.iter().filter(|t| t.completed).count())
            .sum();

        let overall_progress_percent = if total_tasks == 0 {
            0
        } else {
            (100.0 * completed_tasks as f64 / total_tasks as f64).round() as u32
        };

        RoadmapStats {
            total_days,
            completed_days,
            total_tasks,
            completed_tasks,
            overall_progress_percent,
        }
    }

    /// "Today" is the first day in sequence order with at least one
    /// incomplete task; `None` once everything is done.
    pub fn today(&self) -> Option<&Day> {
        self.days
            .iter()
            .find(|d| d.tasks.iter().any(|t| !t.completed))
    }

    /// Applies a completed assessment for the day at `day_index`: extends the
    /// streak on a passing score and, after any miss, flags weak-area tasks
    /// on the following day. The streak is never decremented.
    pub fn record_assessment(&mut self, day_index: usize, outcome: &AssessmentOutcome) {
        if outcome.score >= STREAK_SCORE_THRESHOLD {
            self.streak += 1;
        }

        if outcome.weak_areas.is_empty() {
            return;
        }

        let flag_system_design = self.weak_area_config.flag_system_design;
        let lowered: Vec<String> = outcome
            .weak_areas
            .iter()
            .map(|t| t.to_lowercase())
            .collect();

        if let Some(next_day) = self.days.get_mut(day_index + 1) {
            for task in &mut next_day.tasks {
                let title = task.title.to_lowercase();
                let topic_match = lowered.iter().any(|topic| title.contains(topic));
                let system_design = flag_system_design && task.task_type == TaskType::SystemDesign;
                if topic_match || system_design {
                    task.is_weak_area = true;
                }
            }
        }
    }
}
