//! Maps heterogeneous upstream Gemini payloads into the canonical roadmap
//! schema. Three shapes are observed in the wild: a bare array of days, an
//! object wrapping that array in a `roadmap` field, and a legacy shape with
//! string-or-array `key_topics` / `practice_tasks` / `daily_checkup_questions`
//! fields instead of an explicit `tasks` array.
//!
//! The normalizer never fails: the upstream producer is an untrusted language
//! model and any malformed or missing field degrades to an empty or default
//! value instead of an error.

use serde_json::Value;

use crate::roadmap::schema::{Assessment, Day, Question, Resource, Task, TaskType};

/// Decides which day numbers are milestones. The two observed generation
/// paths disagree (every 7th day vs. fixed days 7 and 14), so the policy is
/// injected by the caller instead of hard-coded.
#[derive(Debug, Clone)]
pub enum MilestonePolicy {
    EveryNthDay(u32),
    FixedDays(Vec<u32>),
}

impl Default for MilestonePolicy {
    fn default() -> Self {
        MilestonePolicy::EveryNthDay(7)
    }
}

impl MilestonePolicy {
    pub fn is_milestone(&self, day: u32) -> bool {
        match self {
            MilestonePolicy::EveryNthDay(n) => *n > 0 && day % n == 0,
            MilestonePolicy::FixedDays(days) => days.contains(&day),
        }
    }
}

/// Discriminated upstream day shape. A single check on the `tasks` field
/// selects one of two pure conversion functions.
enum DayShape<'a> {
    Canonical(&'a Value),
    Legacy(&'a Value),
}

fn classify(entry: &Value) -> DayShape<'_> {
    if entry.get("tasks").is_some() {
        DayShape::Canonical(entry)
    } else {
        DayShape::Legacy(entry)
    }
}

/// Normalizes an upstream payload into the canonical ordered day sequence.
///
/// Input ordering is preserved; out-of-order day numbers pass through
/// unchanged. Always produces a fresh, unstarted roadmap: `completed` and
/// `isWeakArea` are reset regardless of any value in the input.
pub fn normalize_roadmap(raw: &Value, policy: &MilestonePolicy) -> Vec<Day> {
    day_entries(raw)
        .iter()
        .enumerate()
        .map(|(position, entry)| convert_day(entry, position, policy))
        .collect()
}

/// Locates the day array: top-level array, or a `roadmap` field holding one,
/// otherwise empty.
fn day_entries(raw: &Value) -> &[Value] {
    match raw {
        Value::Array(days) => days,
        Value::Object(obj) => obj
            .get("roadmap")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

fn convert_day(entry: &Value, position: usize, policy: &MilestonePolicy) -> Day {
    let number = entry
        .get("day")
        .and_then(Value::as_u64)
        .map(|n| n as u32)
        .unwrap_or(position as u32 + 1);

    let date = entry
        .get("date")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| format!("Day {number}"));

    let tasks = match classify(entry) {
        DayShape::Canonical(day) => canonical_tasks(day, number),
        DayShape::Legacy(day) => legacy_tasks(day, number),
    };

    Day {
        day: number,
        date,
        is_milestone: policy.is_milestone(number),
        tasks,
        assessment: Assessment {
            questions: parse_questions(entry),
        },
    }
}

// ── canonical shape ─────────────────────────────────────────────────────────

fn canonical_tasks(entry: &Value, day: u32) -> Vec<Task> {
    entry
        .get("tasks")
        .and_then(Value::as_array)
        .map(|tasks| {
            tasks
                .iter()
                .enumerate()
                .map(|(i, t)| canonical_task(t, day, i))
                .collect()
        })
        .unwrap_or_default()
}

/// Tasks pass through field by field, except `completed` and `isWeakArea`
/// are force-reset so a persisted snapshot never leaks prior progress.
fn canonical_task(task: &Value, day: u32, index: usize) -> Task {
    Task {
        id: task
            .get("id")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| format!("d{day}-t-{index}")),
        title: str_field(task, "title"),
        description: str_field(task, "description"),
        duration: task
            .get("duration")
            .and_then(Value::as_str)
            .unwrap_or("30 min")
            .to_string(),
        task_type: TaskType::parse_lenient(
            task.get("type").and_then(Value::as_str).unwrap_or("reading"),
        ),
        completed: false,
        resources: parse_resources(task),
        is_weak_area: false,
    }
}

fn parse_resources(task: &Value) -> Vec<Resource> {
    task.get("resources")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|r| {
                    Some(Resource {
                        title: r.get("title").and_then(Value::as_str)?.to_string(),
                        url: r.get("url").and_then(Value::as_str)?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

// ── legacy shape ────────────────────────────────────────────────────────────

/// Legacy days carry three scalar-or-sequence fields. Each coerced string
/// becomes one task in its category; generated ids are composite keys of
/// day number, category abbreviation and index, unique within the day.
fn legacy_tasks(entry: &Value, day: u32) -> Vec<Task> {
    let mut tasks = Vec::new();

    for (i, topic) in coerce_strings(entry.get("key_topics")).into_iter().enumerate() {
        tasks.push(legacy_task(
            format!("d{day}-kt-{i}"),
            topic,
            "Review concepts and patterns".to_string(),
            "30 min",
            TaskType::Reading,
        ));
    }

    for (i, practice) in coerce_strings(entry.get("practice_tasks"))
        .into_iter()
        .enumerate()
    {
        tasks.push(legacy_task(
            format!("d{day}-pt-{i}"),
            "Practice Problem".to_string(),
            practice,
            "45 min",
            TaskType::Coding,
        ));
    }

    for (i, checkup) in coerce_strings(entry.get("daily_checkup_questions"))
        .into_iter()
        .enumerate()
    {
        tasks.push(legacy_task(
            format!("d{day}-cq-{i}"),
            "Self Check".to_string(),
            checkup,
            "10 min",
            TaskType::Behavioral,
        ));
    }

    tasks
}

fn legacy_task(
    id: String,
    title: String,
    description: String,
    duration: &str,
    task_type: TaskType,
) -> Task {
    Task {
        id,
        title,
        description,
        duration: duration.to_string(),
        task_type,
        completed: false,
        resources: vec![],
        is_weak_area: false,
    }
}

/// Coerces a scalar-or-sequence field to a string sequence: a bare string
/// becomes one element, null/missing/other shapes become empty.
fn coerce_strings(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        _ => vec![],
    }
}

// ── assessments ─────────────────────────────────────────────────────────────

fn parse_questions(entry: &Value) -> Vec<Question> {
    entry
        .get("assessment")
        .and_then(|a| a.get("questions"))
        .and_then(Value::as_array)
        .map(|questions| {
            questions
                .iter()
                .enumerate()
                .filter_map(|(i, q)| parse_question(q, i))
                .collect()
        })
        .unwrap_or_default()
}

/// Questions with fewer than two options or a `correctAnswer` outside the
/// option range are unanswerable-correctly by construction and are dropped
/// here rather than surfaced to the assessment engine.
fn parse_question(question: &Value, index: usize) -> Option<Question> {
    let options: Vec<String> = question
        .get("options")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(Value::as_str)
        .map(String::from)
        .collect();

    let correct_answer = question.get("correctAnswer").and_then(Value::as_u64)? as usize;

    if options.len() < 2 || correct_answer >= options.len() {
        return None;
    }

    Some(Question {
        id: question
            .get("id")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| format!("q{index}")),
        question: str_field(question, "question"),
        options,
        correct_answer,
        topic: str_field(question, "topic"),
    })
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_day_with_bare_string_topic() {
        // A bare string coerces to a one-element topic list.
        let raw = json!([{ "day": 7, "key_topics": "Arrays" }]);
        let days = normalize_roadmap(&raw, &MilestonePolicy::default());

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, 7);
        assert_eq!(days[0].tasks.len(), 1);
        assert_eq!(days[0].tasks[0].title, "Arrays");
        assert_eq!(days[0].tasks[0].task_type, TaskType::Reading);
        assert_eq!(days[0].tasks[0].id, "d7-kt-0");
        assert!(days[0].is_milestone);
    }

    #[test]
    fn key_topics_coercion_never_fails() {
        for (value, expected_len) in [
            (json!(null), 0),
            (json!("Graphs"), 1),
            (json!(["Graphs", "Heaps", "Tries"]), 3),
            (json!(42), 0),
            (json!({"nested": true}), 0),
        ] {
            let raw = json!([{ "day": 1, "key_topics": value }]);
            let days = normalize_roadmap(&raw, &MilestonePolicy::default());
            assert_eq!(days[0].tasks.len(), expected_len);
            assert!(days[0]
                .tasks
                .iter()
                .all(|t| t.task_type == TaskType::Reading));
        }
    }

    #[test]
    fn legacy_categories_map_to_task_types() {
        let raw = json!([{
            "day": 3,
            "key_topics": ["Dynamic Programming"],
            "practice_tasks": ["Solve LC 322", "Solve LC 518"],
            "daily_checkup_questions": "Can you explain memoization?"
        }]);
        let days = normalize_roadmap(&raw, &MilestonePolicy::default());
        let types: Vec<TaskType> = days[0].tasks.iter().map(|t| t.task_type).collect();

        assert_eq!(
            types,
            vec![
                TaskType::Reading,
                TaskType::Coding,
                TaskType::Coding,
                TaskType::Behavioral
            ]
        );
        assert_eq!(days[0].tasks[1].id, "d3-pt-0");
        assert_eq!(days[0].tasks[3].id, "d3-cq-0");
        // Generated ids are unique within the day.
        let mut ids: Vec<&str> = days[0].tasks.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), days[0].tasks.len());
    }

    #[test]
    fn canonical_tasks_reset_completed() {
        let raw = json!([{
            "day": 1,
            "date": "2026-03-01",
            "tasks": [{
                "id": "t1",
                "title": "Read CTCI ch. 4",
                "description": "Trees and graphs",
                "duration": "1 hr",
                "type": "system-design",
                "completed": true,
                "resources": [{"title": "CTCI", "url": "https://example.com"}]
            }]
        }]);
        let days = normalize_roadmap(&raw, &MilestonePolicy::default());
        let task = &days[0].tasks[0];

        assert!(!task.completed);
        assert!(!task.is_weak_area);
        assert_eq!(task.task_type, TaskType::SystemDesign);
        assert_eq!(task.resources.len(), 1);
        assert_eq!(days[0].date, "2026-03-01");
    }

    #[test]
    fn renormalizing_canonical_output_is_idempotent() {
        let raw = json!([{
            "day": 7,
            "tasks": [{"id": "t1", "title": "Heaps", "description": "x",
                       "duration": "30 min", "type": "coding", "completed": true}],
            "assessment": {"questions": [{
                "id": "q1", "question": "?", "options": ["a", "b"],
                "correctAnswer": 1, "topic": "Heaps"
            }]}
        }]);
        let policy = MilestonePolicy::default();

        let first = normalize_roadmap(&raw, &policy);
        let reserialized = serde_json::to_value(&first).unwrap();
        let second = normalize_roadmap(&reserialized, &policy);

        assert_eq!(first, second);
        assert!(!second[0].tasks[0].completed);
    }

    #[test]
    fn roadmap_field_is_unwrapped() {
        let raw = json!({ "meta": {"targetRole": "SWE"}, "roadmap": [{"day": 1}] });
        let days = normalize_roadmap(&raw, &MilestonePolicy::default());
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, "Day 1");
    }

    #[test]
    fn non_array_without_roadmap_field_is_empty() {
        for raw in [json!("oops"), json!(7), json!({"plan": []}), json!(null)] {
            assert!(normalize_roadmap(&raw, &MilestonePolicy::default()).is_empty());
        }
    }

    #[test]
    fn out_of_range_correct_answer_is_dropped() {
        let raw = json!([{
            "day": 1,
            "tasks": [],
            "assessment": {"questions": [
                {"id": "q1", "question": "?", "options": ["a", "b"], "correctAnswer": 5, "topic": "x"},
                {"id": "q2", "question": "?", "options": ["a", "b"], "correctAnswer": 0, "topic": "y"},
                {"id": "q3", "question": "?", "options": ["only one"], "correctAnswer": 0, "topic": "z"}
            ]}
        }]);
        let days = normalize_roadmap(&raw, &MilestonePolicy::default());
        let questions = &days[0].assessment.questions;

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "q2");
    }

    #[test]
    fn input_ordering_is_preserved() {
        let raw = json!([{ "day": 9 }, { "day": 2 }, { "day": 5 }]);
        let days = normalize_roadmap(&raw, &MilestonePolicy::default());
        let order: Vec<u32> = days.iter().map(|d| d.day).collect();
        assert_eq!(order, vec![9, 2, 5]);
    }

    #[test]
    fn fixed_days_policy_ignores_modulus() {
        let policy = MilestonePolicy::FixedDays(vec![7, 14]);
        let raw = json!([{ "day": 7 }, { "day": 14 }, { "day": 21 }]);
        let days = normalize_roadmap(&raw, &policy);

        assert!(days[0].is_milestone);
        assert!(days[1].is_milestone);
        assert!(!days[2].is_milestone);
    }

    #[test]
    fn missing_day_number_falls_back_to_position() {
        let raw = json!([{ "key_topics": "Arrays" }, { "key_topics": "Graphs" }]);
        let days = normalize_roadmap(&raw, &MilestonePolicy::default());
        assert_eq!(days[0].day, 1);
        assert_eq!(days[1].day, 2);
        assert_eq!(days[1].tasks[0].id, "d2-kt-0");
    }
}
