use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::OracleError;
use crate::events::{QuestionAsked, QuestionReopened};
use crate::instructions::ask::ask_question::{check_opening_ts, question_fee_due};
use crate::state::{OracleConfig, Question, UserBalance};
use crate::utils::funding::deduct_funding;
use crate::utils::hashing::{self, MAX_TIMEOUT, NULL_HASH};

#[derive(Accounts)]
#[instruction(question_id: [u8; 32])]
pub struct ReopenQuestion<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, OracleConfig>,

    #[account(
        init,
        seeds = [b"question", question_id.as_ref()],
        bump,
        payer = asker,
        space = Question::LEN
    )]
    pub question: Box<Account<'info, Question>>,

    #[account(
        mut,
        seeds = [b"question", reopened_question.question_id.as_ref()],
        bump = reopened_question.bump,
    )]
    pub reopened_question: Box<Account<'info, Question>>,

    /// The prior replacement, required when the question was already
    /// reopened once and that attempt also settled too soon.
    #[account(mut)]
    pub existing_reopen: Option<Box<Account<'info, Question>>>,

    /// CHECK: verified in the handler against the fee-schedule PDA of the
    /// chosen arbitrator. Empty data means no fee was registered.
    pub arbitrator_meta: UncheckedAccount<'info>,

    #[account(mut)]
    pub arbitrator_balance: Option<Account<'info, UserBalance>>,

    #[account(
        init_if_needed,
        seeds = [b"balance", asker.key().as_ref()],
        bump,
        payer = asker,
        space = UserBalance::LEN
    )]
    pub asker_balance: Account<'info, UserBalance>,

    #[account(
        mut,
        constraint = asker_ata.mint == config.collateral_mint @ OracleError::InvalidMint,
    )]
    pub asker_ata: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [b"vault"],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub asker: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[allow(clippy::too_many_arguments)]
pub fn process_reopen_question(
    ctx: Context<ReopenQuestion>,
    question_id: [u8; 32],
    template_id: u64,
    question_text: String,
    arbitrator: Pubkey,
    timeout: u32,
    opening_ts: i64,
    nonce: u64,
    min_bond: u64,
    funding: u64,
) -> Result<()> {
    let config = &ctx.accounts.config;
    let now = Clock::get()?.unix_timestamp;

    require!(timeout > 0 && timeout <= MAX_TIMEOUT, OracleError::TimeoutOutOfRange);
    check_opening_ts(opening_ts, now, config.max_opening_delay)?;

    let content_hash = hashing::content_hash(template_id, opening_ts, &question_text);
    let derived = hashing::question_id(
        &content_hash,
        &arbitrator,
        timeout,
        min_bond,
        &crate::ID,
        &ctx.accounts.asker.key(),
        nonce,
    );
    require!(derived == question_id, OracleError::QuestionIdMismatch);

    let prior = &mut ctx.accounts.reopened_question;
    require!(prior.is_settled_too_soon(now), OracleError::NotSettledTooSoon);
    require!(
        content_hash == prior.content_hash
            && arbitrator == prior.arbitrator
            && timeout == prior.timeout
            && min_bond == prior.min_bond,
        OracleError::ReopenParamMismatch
    );
    // A live replacement cannot itself be reopened until its own parent
    // has been re-reopened, otherwise the bounty would be stranded.
    require!(!prior.is_reopener, OracleError::ReopenerStillActive);

    // Work out where the bounty comes from. If a previous reopen attempt
    // also settled too soon, the bounty moved there and follows us onward;
    // otherwise it is still sitting on the prior question.
    let inherited = if prior.reopened_by != NULL_HASH {
        let existing = ctx
            .accounts
            .existing_reopen
            .as_mut()
            .ok_or(OracleError::AlreadyReopened)?;
        require!(
            existing.question_id == prior.reopened_by,
            OracleError::QuestionIdMismatch
        );
        require!(existing.is_settled_too_soon(now), OracleError::AlreadyReopened);
        let carried = existing.bounty;
        existing.bounty = 0;
        existing.is_reopener = false;
        carried
    } else {
        let carried = prior.bounty;
        prior.bounty = 0;
        carried
    };

    let fee = question_fee_due(
        &arbitrator,
        &ctx.accounts.asker.key(),
        &ctx.accounts.arbitrator_meta,
    )?;
    require!(funding >= fee, OracleError::FundingBelowQuestionFee);

    let asker_balance = &mut ctx.accounts.asker_balance;
    if asker_balance.owner == Pubkey::default() {
        asker_balance.owner = ctx.accounts.asker.key();
        asker_balance.bump = ctx.bumps.asker_balance;
    }
    if funding > 0 {
        deduct_funding(
            funding,
            asker_balance,
            &ctx.accounts.asker_ata,
            &ctx.accounts.vault,
            &ctx.accounts.asker,
            &ctx.accounts.token_program,
        )?;
    }
    if fee > 0 {
        let arb_balance = ctx
            .accounts
            .arbitrator_balance
            .as_mut()
            .ok_or(OracleError::MissingBalanceAccount)?;
        require!(arb_balance.owner == arbitrator, OracleError::MissingBalanceAccount);
        arb_balance.amount = arb_balance
            .amount
            .checked_add(fee)
            .ok_or(OracleError::MathOverflow)?;
    }

    let bounty = (funding - fee)
        .checked_add(inherited)
        .ok_or(OracleError::MathOverflow)?;

    let q = &mut ctx.accounts.question;
    q.question_id = question_id;
    q.asker = ctx.accounts.asker.key();
    q.content_hash = content_hash;
    q.arbitrator = arbitrator;
    q.opening_ts = opening_ts;
    q.timeout = timeout;
    q.finalization_ts = 0;
    q.is_pending_arbitration = false;
    q.bounty = bounty;
    q.best_answer = NULL_HASH;
    q.history_hash = NULL_HASH;
    q.bond = 0;
    q.min_bond = min_bond;
    q.has_revealed_answer = false;
    q.is_reopener = true;
    q.reopen_of = prior.question_id;
    q.reopened_by = NULL_HASH;
    q.claim = Default::default();
    q.bump = ctx.bumps.question;

    prior.reopened_by = question_id;

    emit!(QuestionAsked {
        question_id,
        asker: q.asker,
        template_id,
        question: question_text,
        content_hash,
        arbitrator,
        timeout,
        opening_ts,
        nonce,
        min_bond,
        bounty,
        timestamp: now,
    });
    emit!(QuestionReopened {
        question_id,
        reopened_question_id: prior.question_id,
        inherited_bounty: inherited,
    });

    Ok(())
}
