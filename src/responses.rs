use serde::Serialize;
use std::collections::HashMap;

use crate::taxonomy::{QuestionId, Taxonomy};

/// A single yes/no response. `Unanswered` scores the same as `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    #[default]
    Unanswered,
}

impl Answer {
    pub fn is_yes(self) -> bool {
        matches!(self, Answer::Yes)
    }

    pub fn is_answered(self) -> bool {
        !matches!(self, Answer::Unanswered)
    }

    /// Short marker used in question lists
    pub fn marker(self) -> &'static str {
        match self {
            Answer::Yes => "Y",
            Answer::No => "N",
            Answer::Unanswered => " ",
        }
    }
}

/// Answers collected during one assessment session, keyed by question id.
///
/// Questions with no entry read as [`Answer::Unanswered`]. Entries for ids
/// that are not in the taxonomy are kept but never scored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseSet {
    answers: HashMap<QuestionId, Answer>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Setting `Unanswered` removes any previous answer.
    pub fn set(&mut self, id: QuestionId, answer: Answer) {
        if answer.is_answered() {
            self.answers.insert(id, answer);
        } else {
            self.answers.remove(&id);
        }
    }

    pub fn get(&self, id: QuestionId) -> Answer {
        self.answers.get(&id).copied().unwrap_or_default()
    }

    /// Forget the answer to a question.
    /// Returns true if the question had been answered.
    pub fn clear(&mut self, id: QuestionId) -> bool {
        self.answers.remove(&id).is_some()
    }

    /// Number of taxonomy questions with a Yes or No answer
    pub fn answered_count(&self, taxonomy: &Taxonomy) -> usize {
        taxonomy
            .questions()
            .filter(|q| self.get(q.id()).is_answered())
            .count()
    }

    pub fn is_complete(&self, taxonomy: &Taxonomy) -> bool {
        self.answered_count(taxonomy) == taxonomy.len()
    }

    /// First unanswered question after `after` (wrapping), or the first one
    /// overall when `after` is None.
    pub fn next_unanswered(&self, taxonomy: &Taxonomy, after: Option<QuestionId>) -> Option<QuestionId> {
        let total = taxonomy.len();
        if total == 0 {
            return None;
        }
        let start = after.map(|id| id.index() + 1).unwrap_or(0);
        let ids: Vec<QuestionId> = taxonomy.questions().map(|q| q.id()).collect();
        (0..total)
            .map(|offset| ids[(start + offset) % total])
            .find(|id| !self.get(*id).is_answered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::builtin_taxonomy;

    fn id(index: usize) -> QuestionId {
        QuestionId::new(index)
    }

    #[test]
    fn test_missing_entry_reads_unanswered() {
        let responses = ResponseSet::new();
        assert_eq!(responses.get(id(0)), Answer::Unanswered);
    }

    #[test]
    fn test_set_and_overwrite() {
        let mut responses = ResponseSet::new();
        responses.set(id(1), Answer::Yes);
        assert_eq!(responses.get(id(1)), Answer::Yes);
        responses.set(id(1), Answer::No);
        assert_eq!(responses.get(id(1)), Answer::No);
    }

    #[test]
    fn test_setting_unanswered_clears() {
        let mut responses = ResponseSet::new();
        responses.set(id(2), Answer::Yes);
        responses.set(id(2), Answer::Unanswered);
        assert_eq!(responses, ResponseSet::new());
    }

    #[test]
    fn test_clear_reports_previous_state() {
        let mut responses = ResponseSet::new();
        responses.set(id(3), Answer::No);
        assert!(responses.clear(id(3)));
        assert!(!responses.clear(id(3)));
    }

    #[test]
    fn test_answered_count_ignores_foreign_ids() {
        let taxonomy = builtin_taxonomy();
        let mut responses = ResponseSet::new();
        responses.set(id(0), Answer::Yes);
        responses.set(id(5), Answer::No);
        responses.set(id(500), Answer::Yes);
        assert_eq!(responses.answered_count(&taxonomy), 2);
        assert!(!responses.is_complete(&taxonomy));
    }

    #[test]
    fn test_is_complete() {
        let taxonomy = builtin_taxonomy();
        let mut responses = ResponseSet::new();
        for q in taxonomy.questions() {
            responses.set(q.id(), Answer::No);
        }
        assert!(responses.is_complete(&taxonomy));
    }

    #[test]
    fn test_next_unanswered_wraps() {
        let taxonomy = builtin_taxonomy();
        let mut responses = ResponseSet::new();
        for q in taxonomy.questions().skip(1) {
            responses.set(q.id(), Answer::Yes);
        }
        assert_eq!(responses.next_unanswered(&taxonomy, Some(id(10))), Some(id(0)));
        assert_eq!(responses.next_unanswered(&taxonomy, None), Some(id(0)));

        responses.set(id(0), Answer::No);
        assert_eq!(responses.next_unanswered(&taxonomy, None), None);
    }
}
