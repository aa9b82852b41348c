use anchor_lang::prelude::*;

/// Internal withdrawable balance against the shared token vault. Credited
/// by settlement and fee skims, drained by an explicit withdraw.
#[account]
pub struct UserBalance {
    pub owner: Pubkey, // 32
    pub amount: u64,   // 8
    pub bump: u8,      // 1
}

impl UserBalance {
    pub const LEN: usize = 8 + 32 + 8 + 1;
}
