use anchor_lang::prelude::*;

/// A hidden answer. Participates in the history chain by its id; if the
/// deadline passes unrevealed it can never win a claim.
#[account]
pub struct Commitment {
    pub commitment_id: [u8; 32],  // 32
    pub question_id: [u8; 32],    // 32
    pub reveal_deadline: i64,     // 8
    pub is_revealed: bool,        // 1
    pub revealed_answer: [u8; 32],// 32
    pub bump: u8,                 // 1
}

impl Commitment {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 1 + 32 + 1;
}
