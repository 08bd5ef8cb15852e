// HTTP routes
pub mod ai;
pub mod arxiv;
pub mod health;
pub mod projects;
pub mod social;

pub use ai::*;
pub use arxiv::*;
pub use health::*;
pub use projects::*;
pub use social::*;
