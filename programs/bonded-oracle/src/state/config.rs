use anchor_lang::prelude::*;

#[account]
pub struct OracleConfig {
    pub collateral_mint: Pubkey,  // 32
    pub treasury: Pubkey,         // 32 (claim fees accrue to this balance)
    pub claim_fee_divisor: u64,   // 8  (fee = bond / divisor, 0 = no fee)
    pub max_opening_delay: i64,   // 8
    pub vault_bump: u8,           // 1
    pub bump: u8,                 // 1
}

impl OracleConfig {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 1 + 1;
}
