use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::events::ConfigInitialized;
use crate::state::OracleConfig;

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(
        init,
        seeds = [b"config"],
        bump,
        payer = payer,
        space = OracleConfig::LEN
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        init,
        seeds = [b"vault"],
        bump,
        payer = payer,
        token::mint = collateral_mint,
        token::authority = config,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub collateral_mint: Account<'info, Mint>,

    /// CHECK: claim fees are credited to this account's internal balance
    pub treasury: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn process_init_config(
    ctx: Context<InitConfig>,
    claim_fee_divisor: u64,
    max_opening_delay: i64,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.collateral_mint = ctx.accounts.collateral_mint.key();
    config.treasury = ctx.accounts.treasury.key();
    config.claim_fee_divisor = claim_fee_divisor;
    config.max_opening_delay = max_opening_delay;
    config.vault_bump = ctx.bumps.vault;
    config.bump = ctx.bumps.config;

    emit!(ConfigInitialized {
        collateral_mint: config.collateral_mint,
        treasury: config.treasury,
        claim_fee_divisor,
        max_opening_delay,
    });

    Ok(())
}
