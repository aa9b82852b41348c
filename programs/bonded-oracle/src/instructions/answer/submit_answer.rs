use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::OracleError;
use crate::events::AnswerSubmitted;
use crate::state::{OracleConfig, Question, UserBalance};
use crate::utils::funding::deduct_funding;

#[derive(Accounts)]
pub struct SubmitAnswer<'info> {
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
        seeds = [b"balance", answerer.key().as_ref()],
        bump,
        payer = answerer,
        space = UserBalance::LEN
    )]
    pub answerer_balance: Account<'info, UserBalance>,

    #[account(
        mut,
        constraint = answerer_ata.mint == config.collateral_mint @ OracleError::InvalidMint,
    )]
    pub answerer_ata: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [b"vault"],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub answerer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn process_submit_answer(
    ctx: Context<SubmitAnswer>,
    answer: [u8; 32],
    max_previous: u64,
    bond: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let question = &ctx.accounts.question;
    question.ensure_open(now)?;
    question.check_new_bond(bond, max_previous)?;

    let balance = &mut ctx.accounts.answerer_balance;
    if balance.owner == Pubkey::default() {
        balance.owner = ctx.accounts.answerer.key();
        balance.bump = ctx.bumps.answerer_balance;
    }
    deduct_funding(
        bond,
        balance,
        &ctx.accounts.answerer_ata,
        &ctx.accounts.vault,
        &ctx.accounts.answerer,
        &ctx.accounts.token_program,
    )?;

    let question = &mut ctx.accounts.question;
    question.apply_answer(&answer, &ctx.accounts.answerer.key(), bond, false, now)?;

    emit!(AnswerSubmitted {
        question_id: question.question_id,
        answer_or_commitment_id: answer,
        answerer: ctx.accounts.answerer.key(),
        bond,
        history_hash: question.history_hash,
        is_commitment: false,
        timestamp: now,
    });

    Ok(())
}
