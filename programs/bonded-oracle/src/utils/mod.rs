pub mod funding;
pub mod hashing;
pub mod settlement;
