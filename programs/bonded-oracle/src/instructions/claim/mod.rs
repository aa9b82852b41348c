pub mod claim_multiple_and_withdraw;
pub mod claim_winnings;
pub mod withdraw;

pub use claim_multiple_and_withdraw::*;
pub use claim_winnings::*;
pub use withdraw::*;
