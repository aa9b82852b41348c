use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::OracleError;
use crate::events::AnswerSubmitted;
use crate::state::{Commitment, OracleConfig, Question, UserBalance};
use crate::utils::funding::deduct_funding;
use crate::utils::hashing::{self, COMMITMENT_TIMEOUT_RATIO, NULL_HASH};

#[derive(Accounts)]
#[instruction(commitment_id: [u8; 32])]
pub struct SubmitAnswerCommitment<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, OracleConfig>,

    #[account(
        mut,
        seeds = [b"question", question.question_id.as_ref()],
        bump = question.bump,
    )]
    pub question: Box<Account<'info, Question>>,

    #[account(
        init,
        seeds = [b"commitment", commitment_id.as_ref()],
        bump,
        payer = payer,
        space = Commitment::LEN
    )]
    pub commitment: Account<'info, Commitment>,

    #[account(
        init_if_needed,
        seeds = [b"balance", payer.key().as_ref()],
        bump,
        payer = payer,
        space = UserBalance::LEN
    )]
    pub payer_balance: Account<'info, UserBalance>,

    #[account(
        mut,
        constraint = payer_ata.mint == config.collateral_mint @ OracleError::InvalidMint,
    )]
    pub payer_ata: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [b"vault"],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Pays the bond, possibly on behalf of `answerer`.
    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn process_submit_answer_commitment(
    ctx: Context<SubmitAnswerCommitment>,
    commitment_id: [u8; 32],
    answer_hash: [u8; 32],
    max_previous: u64,
    bond: u64,
    answerer: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let question = &ctx.accounts.question;
    question.ensure_open(now)?;
    question.check_new_bond(bond, max_previous)?;
    require!(answerer != Pubkey::default(), OracleError::AnswererMustBeSet);

    let derived = hashing::commitment_id(&question.question_id, &answer_hash, bond);
    require!(derived == commitment_id, OracleError::CommitmentNotFound);

    let balance = &mut ctx.accounts.payer_balance;
    if balance.owner == Pubkey::default() {
        balance.owner = ctx.accounts.payer.key();
        balance.bump = ctx.bumps.payer_balance;
    }
    deduct_funding(
        bond,
        balance,
        &ctx.accounts.payer_ata,
        &ctx.accounts.vault,
        &ctx.accounts.payer,
        &ctx.accounts.token_program,
    )?;

    let question = &mut ctx.accounts.question;
    let commitment = &mut ctx.accounts.commitment;
    commitment.commitment_id = commitment_id;
    commitment.question_id = question.question_id;
    commitment.reveal_deadline = now
        .checked_add((question.timeout / COMMITMENT_TIMEOUT_RATIO) as i64)
        .ok_or(OracleError::MathOverflow)?;
    commitment.is_revealed = false;
    commitment.revealed_answer = NULL_HASH;
    commitment.bump = ctx.bumps.commitment;

    question.apply_answer(&commitment_id, &answerer, bond, true, now)?;

    emit!(AnswerSubmitted {
        question_id: question.question_id,
        answer_or_commitment_id: commitment_id,
        answerer,
        bond,
        history_hash: question.history_hash,
        is_commitment: true,
        timestamp: now,
    });

    Ok(())
}
