use anchor_lang::prelude::*;

use crate::events::ArbitratorFeesSet;
use crate::state::ArbitratorMeta;

#[derive(Accounts)]
pub struct SetArbitratorFees<'info> {
    #[account(
        init_if_needed,
        seeds = [b"arbitrator", authority.key().as_ref()],
        bump,
        payer = authority,
        space = ArbitratorMeta::LEN
    )]
    pub arbitrator_meta: Account<'info, ArbitratorMeta>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_set_arbitrator_fees(
    ctx: Context<SetArbitratorFees>,
    question_fee: u64,
    dispute_fee: u64,
) -> Result<()> {
    let meta = &mut ctx.accounts.arbitrator_meta;
    meta.authority = ctx.accounts.authority.key();
    meta.question_fee = question_fee;
    meta.dispute_fee = dispute_fee;
    meta.bump = ctx.bumps.arbitrator_meta;

    emit!(ArbitratorFeesSet {
        arbitrator: meta.authority,
        question_fee,
        dispute_fee,
    });

    Ok(())
}
