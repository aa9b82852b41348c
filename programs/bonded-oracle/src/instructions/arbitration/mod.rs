pub mod assign_winner;
pub mod cancel_arbitration;
pub mod request_arbitration;
pub mod submit_answer_by_arbitrator;

pub use assign_winner::*;
pub use cancel_arbitration::*;
pub use request_arbitration::*;
pub use submit_answer_by_arbitrator::*;
