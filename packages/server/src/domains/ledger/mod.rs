//! Ledger domain - the Hetu protocol registry of DeSci projects and the
//! anchoring of submitted projects with a verification hash.

pub mod hetu;
pub mod models;

pub use hetu::{verification_hash, HetuLedger};
pub use models::LedgerMetadata;
