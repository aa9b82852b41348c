pub mod arbitrator;
pub mod balance;
pub mod commitment;
pub mod config;
pub mod question;

pub use arbitrator::*;
pub use balance::*;
pub use commitment::*;
pub use config::*;
pub use question::*;
