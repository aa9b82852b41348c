use anchor_lang::prelude::*;

#[event]
pub struct ConfigInitialized {
    pub collateral_mint: Pubkey,
    pub treasury: Pubkey,
    pub claim_fee_divisor: u64,
    pub max_opening_delay: i64,
}

#[event]
pub struct ArbitratorFeesSet {
    pub arbitrator: Pubkey,
    pub question_fee: u64,
    pub dispute_fee: u64,
}

#[event]
pub struct QuestionAsked {
    pub question_id: [u8; 32],
    pub asker: Pubkey,
    pub template_id: u64,
    pub question: String,
    pub content_hash: [u8; 32],
    pub arbitrator: Pubkey,
    pub timeout: u32,
    pub opening_ts: i64,
    pub nonce: u64,
    pub min_bond: u64,
    pub bounty: u64,
    pub timestamp: i64,
}

#[event]
pub struct BountyFunded {
    pub question_id: [u8; 32],
    pub funder: Pubkey,
    pub amount: u64,
    pub new_bounty: u64,
}

/// The replayable history log: one event per chain link, carrying
/// everything a claimant needs to rebuild the HistoryLink sequence.
#[event]
pub struct AnswerSubmitted {
    pub question_id: [u8; 32],
    pub answer_or_commitment_id: [u8; 32],
    pub answerer: Pubkey,
    pub bond: u64,
    pub history_hash: [u8; 32],
    pub is_commitment: bool,
    pub timestamp: i64,
}

#[event]
pub struct AnswerRevealed {
    pub question_id: [u8; 32],
    pub commitment_id: [u8; 32],
    pub answer: [u8; 32],
    pub nonce: u64,
    pub bond: u64,
}

#[event]
pub struct ArbitrationRequested {
    pub question_id: [u8; 32],
    pub requester: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ArbitrationCancelled {
    pub question_id: [u8; 32],
    pub new_finalization_ts: i64,
}

#[event]
pub struct QuestionFinalized {
    pub question_id: [u8; 32],
    pub answer: [u8; 32],
    pub timestamp: i64,
}

#[event]
pub struct QuestionReopened {
    pub question_id: [u8; 32],
    pub reopened_question_id: [u8; 32],
    pub inherited_bounty: u64,
}

#[event]
pub struct WinningsClaimed {
    pub question_id: [u8; 32],
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct BalanceWithdrawn {
    pub user: Pubkey,
    pub amount: u64,
}
