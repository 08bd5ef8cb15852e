pub mod category;
pub mod project;
pub mod scores;

pub use category::{Category, CategoryFilter, UnknownCategory};
pub use project::ProjectRecord;
pub use scores::{ProjectScores, ScoreKey, UnknownScoreKey, MAX_SCORE};
