use std::collections::HashMap;
use thiserror::Error;

use super::types::{Category, Pillar, Question, QuestionId, Taxonomy};

/// Returned when a questionnaire definition breaks a taxonomy invariant.
/// Carries every problem found, not just the first.
#[derive(Debug, Error, PartialEq)]
pub enum TaxonomyError {
    #[error("invalid questionnaire:\n  - {}", .0.join("\n  - "))]
    Invalid(Vec<String>),
}

impl TaxonomyError {
    pub fn problems(&self) -> &[String] {
        match self {
            TaxonomyError::Invalid(problems) => problems,
        }
    }
}

#[derive(Debug, Default)]
struct CategoryDraft {
    name: String,
    questions: [Vec<String>; 3],
}

/// Collects categories and questions, then validates and assigns ids.
///
/// ```
/// use esg_score::taxonomy::{Pillar, TaxonomyBuilder};
///
/// let taxonomy = TaxonomyBuilder::new()
///     .category("Claims Management")
///     .question(Pillar::Environmental, "Does the claims process encourage repair over replacement?")
///     .build()
///     .unwrap();
/// assert_eq!(taxonomy.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    categories: Vec<CategoryDraft>,
    orphans: Vec<String>,
}

impl TaxonomyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new category; following questions are added to it
    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(CategoryDraft {
            name: name.into(),
            ..Default::default()
        });
        self
    }

    /// Add a question to the most recently started category
    pub fn question(mut self, pillar: Pillar, text: impl Into<String>) -> Self {
        let text = text.into();
        match self.categories.last_mut() {
            Some(draft) => draft.questions[pillar.index()].push(text),
            None => self.orphans.push(text),
        }
        self
    }

    /// Validate the collected definition and produce the taxonomy.
    pub fn build(self) -> Result<Taxonomy, TaxonomyError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(self.assemble())
        } else {
            Err(TaxonomyError::Invalid(problems))
        }
    }

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for text in &self.orphans {
            problems.push(format!("question '{}' is not inside a category", text));
        }

        let mut seen_categories: HashMap<String, usize> = HashMap::new();
        // normalized text -> (category name, pillar)
        let mut seen_questions: HashMap<String, (String, Pillar)> = HashMap::new();

        for (i, draft) in self.categories.iter().enumerate() {
            let name = draft.name.trim();
            if name.is_empty() {
                problems.push(format!("category #{}: name must not be empty", i + 1));
            } else if let Some(first) = seen_categories.insert(name.to_lowercase(), i) {
                problems.push(format!(
                    "category #{}: duplicate name '{}' (also category #{})",
                    i + 1,
                    name,
                    first + 1
                ));
            }

            for pillar in Pillar::ALL {
                for (j, text) in draft.questions[pillar.index()].iter().enumerate() {
                    let key = text.trim().to_lowercase();
                    if key.is_empty() {
                        problems.push(format!(
                            "category '{}' {}[{}]: question text must not be empty",
                            name,
                            pillar.name().to_lowercase(),
                            j
                        ));
                        continue;
                    }
                    if let Some((other_category, other_pillar)) =
                        seen_questions.get(&key)
                    {
                        problems.push(format!(
                            "category '{}' {}[{}]: duplicate question '{}' (already in '{}' / {})",
                            name,
                            pillar.name().to_lowercase(),
                            j,
                            text.trim(),
                            other_category,
                            other_pillar
                        ));
                    } else {
                        seen_questions.insert(key, (name.to_string(), pillar));
                    }
                }
            }
        }

        problems
    }

    /// Assign ids without validating. Callers must know the input is sound.
    pub(crate) fn assemble(self) -> Taxonomy {
        let mut next_id = 0;
        let categories = self
            .categories
            .into_iter()
            .map(|draft| {
                let CategoryDraft { name, questions } = draft;
                let mut built: [Vec<Question>; 3] = Default::default();
                for (pillar, texts) in Pillar::ALL.into_iter().zip(questions) {
                    for text in texts {
                        built[pillar.index()].push(Question::new(
                            QuestionId::new(next_id),
                            text.trim().to_string(),
                            pillar,
                        ));
                        next_id += 1;
                    }
                }
                Category::new(name.trim().to_string(), built)
            })
            .collect();

        Taxonomy::from_categories(categories)
    }
}
