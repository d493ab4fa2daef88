pub mod engine;
pub mod rating;

pub use engine::{score, CategoryScore, PillarCounts, ScoreReport};
pub use rating::Rating;
