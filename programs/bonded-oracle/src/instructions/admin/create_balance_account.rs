use anchor_lang::prelude::*;

use crate::state::UserBalance;

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct CreateBalanceAccount<'info> {
    #[account(
        init_if_needed,
        seeds = [b"balance", owner.as_ref()],
        bump,
        payer = payer,
        space = UserBalance::LEN
    )]
    pub balance: Account<'info, UserBalance>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Permissionless: claimants create balance accounts for the answerers
/// they are about to credit. Re-creating an existing one is a no-op.
pub fn process_create_balance_account(
    ctx: Context<CreateBalanceAccount>,
    owner: Pubkey,
) -> Result<()> {
    let balance = &mut ctx.accounts.balance;
    balance.owner = owner;
    balance.bump = ctx.bumps.balance;
    Ok(())
}
