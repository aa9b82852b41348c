pub mod ask_question;
pub mod fund_answer_bounty;
pub mod reopen_question;

pub use ask_question::*;
pub use fund_answer_bounty::*;
pub use reopen_question::*;
