// DeSci Explorer - API Core
//
// Aggregates decentralized-science projects from code hosting, social,
// preprint and ledger sources, caches the merged list, and serves it over
// HTTP for filtering and sorting.
//
// Domains live in domains/*, infrastructure (AI client, clock, dependency
// wiring, test doubles) in kernel/, and the axum layer in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
