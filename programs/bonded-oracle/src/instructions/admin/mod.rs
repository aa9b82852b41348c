pub mod create_balance_account;
pub mod init_config;
pub mod set_arbitrator_fees;

pub use create_balance_account::*;
pub use init_config::*;
pub use set_arbitrator_fees::*;
