//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod clock;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use ai::OpenAIClient;
pub use clock::{Clock, SystemClock};
pub use deps::ServerDeps;
pub use test_dependencies::{ManualClock, MockAI, MockProvider, TestDependencies};
pub use traits::*;
