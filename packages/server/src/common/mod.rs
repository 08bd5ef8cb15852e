// Common utilities shared across the application

pub mod stable_id;

pub use stable_id::stable_id;
