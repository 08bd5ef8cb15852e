// Business domains
pub mod assistant;
pub mod enrichment;
pub mod ledger;
pub mod projects;
pub mod sources;
