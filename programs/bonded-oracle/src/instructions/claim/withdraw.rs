use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::OracleError;
use crate::events::BalanceWithdrawn;
use crate::state::{OracleConfig, UserBalance};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, OracleConfig>,

    #[account(
        mut,
        seeds = [b"balance", user.key().as_ref()],
        bump = user_balance.bump,
    )]
    pub user_balance: Account<'info, UserBalance>,

    #[account(
        mut,
        constraint = user_ata.mint == config.collateral_mint @ OracleError::InvalidMint,
        constraint = user_ata.owner == user.key() @ OracleError::InvalidMint,
    )]
    pub user_ata: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [b"vault"],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let amount = ctx.accounts.user_balance.amount;
    require!(amount > 0, OracleError::NothingToWithdraw);
    ctx.accounts.user_balance.amount = 0;

    let bump = ctx.accounts.config.bump;
    let seeds: &[&[u8]] = &[b"config", &[bump]];
    let signer = &[seeds];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.user_ata.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            signer,
        ),
        amount,
    )?;

    emit!(BalanceWithdrawn {
        user: ctx.accounts.user.key(),
        amount,
    });

    Ok(())
}
