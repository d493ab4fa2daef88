use serde::Serialize;

use super::rating::Rating;
use crate::responses::ResponseSet;
use crate::taxonomy::{Pillar, Taxonomy};

/// One count per pillar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PillarCounts {
    pub environmental: usize,
    pub social: usize,
    pub governance: usize,
}

impl PillarCounts {
    pub fn get(&self, pillar: Pillar) -> usize {
        match pillar {
            Pillar::Environmental => self.environmental,
            Pillar::Social => self.social,
            Pillar::Governance => self.governance,
        }
    }

    fn set(&mut self, pillar: Pillar, value: usize) {
        match pillar {
            Pillar::Environmental => self.environmental = value,
            Pillar::Social => self.social = value,
            Pillar::Governance => self.governance = value,
        }
    }

    pub fn sum(&self) -> usize {
        self.environmental + self.social + self.governance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub name: String,
    /// Yes answers per pillar
    pub yes: PillarCounts,
    /// Questions per pillar
    pub totals: PillarCounts,
    pub category_yes: usize,
    pub category_total: usize,
}

/// Result of scoring a response set against a taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub total_yes: usize,
    pub total_questions: usize,
    /// Questions without a Yes/No answer; already counted as No
    pub unanswered: usize,
    pub percentage: f64,
    pub rating: Rating,
    pub categories: Vec<CategoryScore>,
    /// Largest `category_total`, used to scale chart axes
    pub max_category_total: usize,
}

impl ScoreReport {
    /// Percentage rounded to two decimals, e.g. "74.07"
    pub fn percentage_display(&self) -> String {
        format!("{:.2}", self.percentage)
    }

    /// "{yes} out of {total} ({pct}%)"
    pub fn headline(&self) -> String {
        format!(
            "{} out of {} ({}%)",
            self.total_yes,
            self.total_questions,
            self.percentage_display()
        )
    }

    /// Yes answers for a pillar across all categories
    pub fn pillar_yes(&self, pillar: Pillar) -> usize {
        self.categories.iter().map(|c| c.yes.get(pillar)).sum()
    }
}

/// Score `responses` against `taxonomy`.
///
/// Only questions of the taxonomy are visited, so responses for unknown ids
/// are ignored. No and Unanswered both leave the Yes count untouched. An
/// empty taxonomy scores 0%.
pub fn score(taxonomy: &Taxonomy, responses: &ResponseSet) -> ScoreReport {
    let mut unanswered = 0;

    let categories: Vec<CategoryScore> = taxonomy
        .categories()
        .iter()
        .map(|category| {
            let mut yes = PillarCounts::default();
            let mut totals = PillarCounts::default();
            for pillar in Pillar::ALL {
                let questions = category.questions(pillar);
                let mut pillar_yes = 0;
                for question in questions {
                    let answer = responses.get(question.id());
                    if answer.is_yes() {
                        pillar_yes += 1;
                    } else if !answer.is_answered() {
                        unanswered += 1;
                    }
                }
                yes.set(pillar, pillar_yes);
                totals.set(pillar, questions.len());
            }
            CategoryScore {
                name: category.name().to_string(),
                category_yes: yes.sum(),
                category_total: totals.sum(),
                yes,
                totals,
            }
        })
        .collect();

    let total_yes: usize = categories.iter().map(|c| c.category_yes).sum();
    let total_questions: usize = categories.iter().map(|c| c.category_total).sum();
    let percentage = if total_questions > 0 {
        100.0 * total_yes as f64 / total_questions as f64
    } else {
        0.0
    };
    let max_category_total = categories
        .iter()
        .map(|c| c.category_total)
        .max()
        .unwrap_or(0);

    ScoreReport {
        total_yes,
        total_questions,
        unanswered,
        percentage,
        rating: Rating::from_percentage(percentage),
        categories,
        max_category_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::Answer;
    use crate::taxonomy::{builtin_taxonomy, QuestionId, TaxonomyBuilder};

    /// Answer the first `yes` questions Yes and the rest No
    fn answer_first(taxonomy: &Taxonomy, yes: usize) -> ResponseSet {
        let mut responses = ResponseSet::new();
        for (i, q) in taxonomy.questions().enumerate() {
            responses.set(q.id(), if i < yes { Answer::Yes } else { Answer::No });
        }
        responses
    }

    #[test]
    fn test_all_no_is_bronze_zero() {
        let taxonomy = builtin_taxonomy();
        let report = score(&taxonomy, &answer_first(&taxonomy, 0));
        assert_eq!(report.percentage, 0.0);
        assert_eq!(report.rating, Rating::Bronze);
        assert_eq!(report.unanswered, 0);
    }

    #[test]
    fn test_all_unanswered_is_bronze_zero() {
        let taxonomy = builtin_taxonomy();
        let report = score(&taxonomy, &ResponseSet::new());
        assert_eq!(report.total_yes, 0);
        assert_eq!(report.total_questions, 27);
        assert_eq!(report.unanswered, 27);
        assert_eq!(report.percentage, 0.0);
        assert_eq!(report.rating, Rating::Bronze);
    }

    #[test]
    fn test_all_yes_is_green_hundred() {
        let taxonomy = builtin_taxonomy();
        let report = score(&taxonomy, &answer_first(&taxonomy, 27));
        assert_eq!(report.percentage, 100.0);
        assert_eq!(report.rating, Rating::Green);
    }

    #[test]
    fn test_twenty_of_twenty_seven_is_silver() {
        let taxonomy = builtin_taxonomy();
        let report = score(&taxonomy, &answer_first(&taxonomy, 20));
        assert_eq!(report.total_yes, 20);
        assert_eq!(report.total_questions, 27);
        assert_eq!(report.percentage_display(), "74.07");
        assert_eq!(report.rating, Rating::Silver);
        assert_eq!(report.headline(), "20 out of 27 (74.07%)");
    }

    #[test]
    fn test_twenty_two_is_green_thirteen_is_bronze() {
        let taxonomy = builtin_taxonomy();

        let report = score(&taxonomy, &answer_first(&taxonomy, 22));
        assert_eq!(report.percentage_display(), "81.48");
        assert_eq!(report.rating, Rating::Green);

        let report = score(&taxonomy, &answer_first(&taxonomy, 13));
        assert_eq!(report.percentage_display(), "48.15");
        assert_eq!(report.rating, Rating::Bronze);
    }

    #[test]
    fn test_exact_fifty_percent_is_silver() {
        let taxonomy = TaxonomyBuilder::new()
            .category("A")
            .question(Pillar::Environmental, "One?")
            .question(Pillar::Social, "Two?")
            .build()
            .unwrap();
        let report = score(&taxonomy, &answer_first(&taxonomy, 1));
        assert_eq!(report.percentage, 50.0);
        assert_eq!(report.rating, Rating::Silver);
    }

    #[test]
    fn test_exact_eighty_percent_is_green() {
        let mut builder = TaxonomyBuilder::new().category("A");
        for i in 0..5 {
            builder = builder.question(Pillar::Governance, format!("Question {}?", i));
        }
        let taxonomy = builder.build().unwrap();
        let report = score(&taxonomy, &answer_first(&taxonomy, 4));
        assert_eq!(report.percentage, 80.0);
        assert_eq!(report.rating, Rating::Green);
    }

    #[test]
    fn test_aggregation_is_consistent() {
        let taxonomy = builtin_taxonomy();
        let mut responses = ResponseSet::new();
        for (i, q) in taxonomy.questions().enumerate() {
            if i % 3 != 1 {
                responses.set(q.id(), Answer::Yes);
            }
        }
        let report = score(&taxonomy, &responses);

        let by_category: usize = report.categories.iter().map(|c| c.category_yes).sum();
        let by_pillar: usize = Pillar::ALL.iter().map(|p| report.pillar_yes(*p)).sum();
        assert_eq!(report.total_yes, by_category);
        assert_eq!(report.total_yes, by_pillar);
        assert_eq!(report.total_yes, 18);
        for category in &report.categories {
            assert_eq!(category.category_yes, category.yes.sum());
            assert_eq!(category.category_total, category.totals.sum());
        }
    }

    #[test]
    fn test_per_pillar_breakdown() {
        let taxonomy = builtin_taxonomy();
        let mut responses = ResponseSet::new();
        // every Social question of the second category
        for q in taxonomy.categories()[1].questions(Pillar::Social) {
            responses.set(q.id(), Answer::Yes);
        }
        let report = score(&taxonomy, &responses);
        let claims = &report.categories[1];
        assert_eq!(claims.name, "Claims Management");
        assert_eq!(claims.yes.social, 3);
        assert_eq!(claims.yes.environmental, 0);
        assert_eq!(claims.category_total, 9);
        assert_eq!(report.max_category_total, 9);
        assert_eq!(report.categories[0].category_yes, 0);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let taxonomy = builtin_taxonomy();
        let mut responses = ResponseSet::new();
        responses.set(QuestionId::new(999), Answer::Yes);
        let report = score(&taxonomy, &responses);
        assert_eq!(report.total_yes, 0);
    }

    #[test]
    fn test_empty_taxonomy_guard() {
        let report = score(&Taxonomy::empty(), &ResponseSet::new());
        assert_eq!(report.percentage, 0.0);
        assert_eq!(report.total_questions, 0);
        assert_eq!(report.max_category_total, 0);
        assert_eq!(report.rating, Rating::Bronze);
        assert_eq!(report.headline(), "0 out of 0 (0.00%)");
    }

    #[test]
    fn test_category_without_questions() {
        let taxonomy = TaxonomyBuilder::new().category("Empty").build().unwrap();
        let report = score(&taxonomy, &ResponseSet::new());
        assert_eq!(report.percentage, 0.0);
        assert_eq!(report.categories.len(), 1);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let taxonomy = builtin_taxonomy();
        let responses = answer_first(&taxonomy, 11);
        let first = score(&taxonomy, &responses);
        let second = score(&taxonomy, &responses);
        assert_eq!(first, second);
        assert_eq!(first.percentage.to_bits(), second.percentage.to_bits());
    }
}
