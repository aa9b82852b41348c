pub mod submit_answer;
pub mod submit_answer_commitment;
pub mod submit_answer_reveal;

pub use submit_answer::*;
pub use submit_answer_commitment::*;
pub use submit_answer_reveal::*;
