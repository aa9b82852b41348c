use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::OracleError;
use crate::events::BountyFunded;
use crate::state::{OracleConfig, Question, UserBalance};
use crate::utils::funding::deduct_funding;

#[derive(Accounts)]
pub struct FundAnswerBounty<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, OracleConfig>,

    #[account(
        mut,
        seeds = [b"question", question.question_id.as_ref()],
        bump = question.bump,
    )]
    pub question: Box<Account<'info, Question>>,

    #[account(
        init_if_needed,
        seeds = [b"balance", funder.key().as_ref()],
        bump,
        payer = funder,
        space = UserBalance::LEN
    )]
    pub funder_balance: Account<'info, UserBalance>,

    #[account(
        mut,
        constraint = funder_ata.mint == config.collateral_mint @ OracleError::InvalidMint,
    )]
    pub funder_ata: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [b"vault"],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub funder: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn process_fund_answer_bounty(ctx: Context<FundAnswerBounty>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.question.ensure_open(now)?;
    require!(amount > 0, OracleError::AmountMustBePositive);

    let funder_balance = &mut ctx.accounts.funder_balance;
    if funder_balance.owner == Pubkey::default() {
        funder_balance.owner = ctx.accounts.funder.key();
        funder_balance.bump = ctx.bumps.funder_balance;
    }
    deduct_funding(
        amount,
        funder_balance,
        &ctx.accounts.funder_ata,
        &ctx.accounts.vault,
        &ctx.accounts.funder,
        &ctx.accounts.token_program,
    )?;

    let question = &mut ctx.accounts.question;
    question.bounty = question
        .bounty
        .checked_add(amount)
        .ok_or(OracleError::MathOverflow)?;

    emit!(BountyFunded {
        question_id: question.question_id,
        funder: ctx.accounts.funder.key(),
        amount,
        new_bounty: question.bounty,
    });

    Ok(())
}
