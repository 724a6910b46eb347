//! Canonical roadmap schema. Every other component reads or produces this
//! shape; upstream Gemini payloads are mapped into it by `normalize`.

use serde::{Deserialize, Serialize};

/// Closed category set for preparation tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    Reading,
    Coding,
    Behavioral,
    SystemDesign,
}

impl TaskType {
    /// Lenient parse for loosely-typed upstream payloads. Unknown labels
    /// default to `Reading` rather than failing the whole day.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw {
            "coding" => TaskType::Coding,
            "behavioral" => TaskType::Behavioral,
            "system-design" => TaskType::SystemDesign,
            _ => TaskType::Reading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

/// A single actionable preparation item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within its owning day. Generated ids are composite keys of
    /// day number, category abbreviation and index within the category.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Opaque display label ("30 min"), not a machine-parseable duration.
    pub duration: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Mutated only by explicit user toggle.
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    /// Set by the assessment feedback loop, never by the user.
    #[serde(default)]
    pub is_weak_area: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question: String,
    /// Ordered, 2+ entries. Enforced at normalization time.
    pub options: Vec<String>,
    /// Zero-based index into `options`. Enforced at normalization time.
    pub correct_answer: usize,
    /// Free-text label used for weak-area matching.
    pub topic: String,
}

/// Zero-or-one quiz set per day. Empty questions means no assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub questions: Vec<Question>,
}

/// One calendar unit of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Positive, 1-based, unique within a roadmap.
    pub day: u32,
    /// Literal calendar date or a placeholder label like "Day 7".
    pub date: String,
    /// Derived by the configured milestone policy, never read from input.
    pub is_milestone: bool,
    pub tasks: Vec<Task>,
    pub assessment: Assessment,
}

impl Day {
    /// A day is complete iff it has at least one task and all are completed.
    pub fn is_complete(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.completed)
    }
}

/// Career goals captured by the onboarding wizard. Write-once per flow;
/// never merged with a prior profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    #[serde(default)]
    pub target_role: String,
    #[serde(default)]
    pub target_company: String,
    /// Timeline in days, kept as a display string.
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub resume_content: String,
    #[serde(default)]
    pub aspirations: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: "t".to_string(),
            description: String::new(),
            duration: "30 min".to_string(),
            task_type: TaskType::Reading,
            completed,
            resources: vec![],
            is_weak_area: false,
        }
    }

    #[test]
    fn day_with_no_tasks_is_not_complete() {
        let day = Day {
            day: 1,
            date: "Day 1".to_string(),
            is_milestone: false,
            tasks: vec![],
            assessment: Assessment::default(),
        };
        assert!(!day.is_complete());
    }

    #[test]
    fn day_complete_only_when_all_tasks_done() {
        let mut day = Day {
            day: 1,
            date: "Day 1".to_string(),
            is_milestone: false,
            tasks: vec![task("a", true), task("b", false)],
            assessment: Assessment::default(),
        };
        assert!(!day.is_complete());
        day.tasks[1].completed = true;
        assert!(day.is_complete());
    }

    #[test]
    fn task_type_serializes_kebab_case() {
        let json = serde_json::to_string(&TaskType::SystemDesign).unwrap();
        assert_eq!(json, "\"system-design\"");
    }

    #[test]
    fn unknown_task_type_defaults_to_reading() {
        assert_eq!(TaskType::parse_lenient("quantum"), TaskType::Reading);
        assert_eq!(TaskType::parse_lenient("coding"), TaskType::Coding);
    }
}
