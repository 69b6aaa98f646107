pub mod aggregate;
pub mod holding;
pub mod sizing;
