use anchor_lang::prelude::*;

/// Fees advertised by an arbitrator. The question fee is skimmed from ask
/// funding into the arbitrator's balance; the dispute fee is informational
/// for whoever fronts an arbitration request.
#[account]
pub struct ArbitratorMeta {
    pub authority: Pubkey, // 32
    pub question_fee: u64, // 8
    pub dispute_fee: u64,  // 8
    pub bump: u8,          // 1
}

impl ArbitratorMeta {
    pub const LEN: usize = 8 + 32 + 8 + 8 + 1;
}
