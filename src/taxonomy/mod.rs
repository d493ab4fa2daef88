pub mod builder;
pub mod builtin;
pub mod types;

pub use builder::{TaxonomyBuilder, TaxonomyError};
pub use builtin::{builtin_taxonomy, BUILTIN_TITLE};
pub use types::{Category, Pillar, Question, QuestionId, Taxonomy};
