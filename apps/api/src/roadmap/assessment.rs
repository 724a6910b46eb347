#![allow(dead_code)]

//! Daily assessment engine: a linear, single-pass state machine over a fixed
//! ordered question sequence. A completed pass is terminal; retaking requires
//! a fresh engine.

use std::collections::HashMap;

use crate::roadmap::schema::Question;

/// Emitted exactly once when the final question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentOutcome {
    /// `round(100 * correct / total)`.
    pub score: u32,
    /// Topics of incorrectly-answered questions, de-duplicated in
    /// first-seen order. An unanswered question counts as incorrect.
    pub weak_areas: Vec<String>,
}

#[derive(Debug)]
enum State {
    NotStarted,
    InProgress { current: usize },
    Completed(AssessmentOutcome),
}

#[derive(Debug)]
pub struct AssessmentEngine {
    questions: Vec<Question>,
    answers: HashMap<String, usize>,
    state: State,
}

impl AssessmentEngine {
    /// Returns `None` for an empty question set: a zero-question assessment
    /// must not be offered, so the engine refuses to exist rather than
    /// carrying a divide-by-zero fault path.
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            answers: HashMap::new(),
            state: State::NotStarted,
        })
    }

    pub fn start(&mut self) {
        if matches!(self.state, State::NotStarted) {
            self.state = State::InProgress { current: 0 };
        }
    }

    /// The question awaiting an answer, if the pass is in progress.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            State::InProgress { current } => self.questions.get(current),
            _ => None,
        }
    }

    /// Records an answer for the current question. Answers are irrevocable
    /// within a pass. Returns the outcome exactly once, when the final
    /// question is answered; otherwise `None`. A no-op before `start()` and
    /// after completion.
    pub fn answer(&mut self, option_index: usize) -> Option<AssessmentOutcome> {
        let State::InProgress { current } = self.state else {
            return None;
        };

        let question_id = self.questions[current].id.clone();
        self.answers.entry(question_id).or_insert(option_index);

        if current + 1 < self.questions.len() {
            self.state = State::InProgress {
                current: current + 1,
            };
            None
        } else {
            let outcome = self.grade();
            self.state = State::Completed(outcome.clone());
            Some(outcome)
        }
    }

    pub fn outcome(&self) -> Option<&AssessmentOutcome> {
        match &self.state {
            State::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, State::Completed(_))
    }

    fn grade(&self) -> AssessmentOutcome {
        let total = self.questions.len();
        let correct = self
            .questions
            .iter()
            .filter(|q| self.answers.get(&q.id) == Some(&q.correct_answer))
            .count();

        let score = (100.0 * correct as f64 / total as f64).round() as u32;

        let mut weak_areas: Vec<String> = Vec::new();
        for question in &self.questions {
            if self.answers.get(&question.id) != Some(&question.correct_answer)
                && !weak_areas.contains(&question.topic)
            {
                weak_areas.push(question.topic.clone());
            }
        }

        AssessmentOutcome { score, weak_areas }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: usize, topic: &str) -> Question {
        Question {
            id: id.to_string(),
            question: format!("{id}?"),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: correct,
            topic: topic.to_string(),
        }
    }

    fn run(questions: Vec<Question>, answers: &[usize]) -> AssessmentOutcome {
        let mut engine = AssessmentEngine::new(questions).unwrap();
        engine.start();
        let mut outcome = None;
        for &answer in answers {
            outcome = engine.answer(answer);
        }
        outcome.expect("final answer must complete the pass")
    }

    #[test]
    fn two_of_three_correct_scores_sixty_seven() {
        let questions = vec![
            question("q1", 1, "Arrays"),
            question("q2", 2, "Graphs"),
            question("q3", 2, "Heaps"),
        ];
        let outcome = run(questions, &[1, 0, 2]);

        assert_eq!(outcome.score, 67);
        assert_eq!(outcome.weak_areas, vec!["Graphs".to_string()]);
    }

    #[test]
    fn outcome_is_deterministic() {
        let questions = || {
            vec![
                question("q1", 0, "DP"),
                question("q2", 1, "DP"),
                question("q3", 2, "Tries"),
            ]
        };
        let first = run(questions(), &[1, 0, 0]);
        let second = run(questions(), &[1, 0, 0]);
        assert_eq!(first, second);
    }

    #[test]
    fn weak_areas_dedup_in_first_seen_order() {
        let questions = vec![
            question("q1", 0, "Graphs"),
            question("q2", 0, "DP"),
            question("q3", 0, "Graphs"),
        ];
        // All wrong: Graphs appears twice but is reported once, first.
        let outcome = run(questions, &[1, 1, 1]);
        assert_eq!(
            outcome.weak_areas,
            vec!["Graphs".to_string(), "DP".to_string()]
        );
    }

    #[test]
    fn zero_questions_refused_at_construction() {
        assert!(AssessmentEngine::new(vec![]).is_none());
    }

    #[test]
    fn answer_before_start_is_a_no_op() {
        let mut engine = AssessmentEngine::new(vec![question("q1", 0, "x")]).unwrap();
        assert!(engine.answer(0).is_none());
        assert!(!engine.is_completed());
    }

    #[test]
    fn completed_state_is_terminal() {
        let mut engine = AssessmentEngine::new(vec![question("q1", 0, "x")]).unwrap();
        engine.start();
        let outcome = engine.answer(0).unwrap();
        assert_eq!(outcome.score, 100);

        // No transition leaves Completed; the outcome is emitted once.
        assert!(engine.answer(1).is_none());
        assert!(engine.current_question().is_none());
        assert_eq!(engine.outcome().unwrap().score, 100);
    }

    #[test]
    fn single_question_pass_completes_immediately() {
        let mut engine = AssessmentEngine::new(vec![question("q1", 2, "Heaps")]).unwrap();
        engine.start();
        let outcome = engine.answer(1).unwrap();
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.weak_areas, vec!["Heaps".to_string()]);
    }
}
