use serde::Serialize;
use std::fmt;

/// ESG pillar a question belongs to within its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Environmental,
    Social,
    Governance,
}

impl Pillar {
    /// All pillars in display order
    pub const ALL: [Pillar; 3] = [Pillar::Environmental, Pillar::Social, Pillar::Governance];

    pub fn name(self) -> &'static str {
        match self {
            Pillar::Environmental => "Environmental",
            Pillar::Social => "Social",
            Pillar::Governance => "Governance",
        }
    }

    /// Position in `Pillar::ALL`
    pub fn index(self) -> usize {
        match self {
            Pillar::Environmental => 0,
            Pillar::Social => 1,
            Pillar::Governance => 2,
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stable identifier of a question, assigned when the taxonomy is built.
///
/// Ids are sequential in taxonomy order (category, then pillar, then
/// question), so `id.index()` is also the question's position in
/// [`Taxonomy::questions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(u32);

impl QuestionId {
    pub(crate) fn new(index: usize) -> Self {
        QuestionId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("Q{}", self.0 + 1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: QuestionId,
    text: String,
    pillar: Pillar,
}

impl Question {
    pub(crate) fn new(id: QuestionId, text: String, pillar: Pillar) -> Self {
        Self { id, text, pillar }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pillar(&self) -> Pillar {
        self.pillar
    }
}

/// Top-level grouping of questions, split by pillar.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    name: String,
    questions: [Vec<Question>; 3],
}

impl Category {
    pub(crate) fn new(name: String, questions: [Vec<Question>; 3]) -> Self {
        Self { name, questions }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Questions of one pillar, in the order they were defined
    pub fn questions(&self, pillar: Pillar) -> &[Question] {
        &self.questions[pillar.index()]
    }

    /// Every question of the category, pillar by pillar
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.questions.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable question catalogue: Category -> Pillar -> ordered questions.
///
/// Built once through [`TaxonomyBuilder`](super::TaxonomyBuilder) and then
/// only read. Question text is unique across the whole taxonomy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    pub(crate) fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// A taxonomy with no questions at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every question in id order
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.categories.iter().flat_map(Category::iter)
    }

    /// Total number of questions
    pub fn len(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
