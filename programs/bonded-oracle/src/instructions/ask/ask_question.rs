use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::OracleError;
use crate::events::QuestionAsked;
use crate::state::{ArbitratorMeta, OracleConfig, Question, UserBalance};
use crate::utils::funding::deduct_funding;
use crate::utils::hashing::{self, MAX_TIMEOUT, NULL_HASH};

#[derive(Accounts)]
#[instruction(question_id: [u8; 32])]
pub struct AskQuestion<'info> {
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

    /// CHECK: verified in the handler against the fee-schedule PDA of the
    /// chosen arbitrator. Empty data means no fee was registered.
    pub arbitrator_meta: UncheckedAccount<'info>,

    /// Required when a question fee is due.
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

/// Skims the arbitrator question fee out of `funding`. Waived when the
/// asker is the arbitrator itself (it would be paying itself). The fee
/// schedule account must always be the arbitrator's own PDA so an asker
/// cannot dodge a registered fee by handing in a different account.
pub(crate) fn question_fee_due(
    arbitrator: &Pubkey,
    asker: &Pubkey,
    meta: &AccountInfo,
) -> Result<u64> {
    if *arbitrator == Pubkey::default() || arbitrator == asker {
        return Ok(0);
    }
    let (expected, _) =
        Pubkey::find_program_address(&[b"arbitrator", arbitrator.as_ref()], &crate::ID);
    require!(meta.key() == expected, OracleError::OnlyArbitrator);
    if meta.data_is_empty() {
        return Ok(0);
    }
    let meta = ArbitratorMeta::try_deserialize(&mut &meta.data.borrow()[..])?;
    Ok(meta.question_fee)
}

/// A non-zero opening time may sit at most `max_delay` past `now`.
pub(crate) fn check_opening_ts(opening_ts: i64, now: i64, max_delay: i64) -> Result<()> {
    let cap = now.checked_add(max_delay).ok_or(OracleError::MathOverflow)?;
    require!(
        opening_ts == 0 || opening_ts <= cap,
        OracleError::OpeningTooFarInFuture
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn process_ask_question(
    ctx: Context<AskQuestion>,
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

    let q = &mut ctx.accounts.question;
    q.question_id = question_id;
    q.asker = ctx.accounts.asker.key();
    q.content_hash = content_hash;
    q.arbitrator = arbitrator;
    q.opening_ts = opening_ts;
    q.timeout = timeout;
    q.finalization_ts = 0;
    q.is_pending_arbitration = false;
    q.bounty = funding - fee;
    q.best_answer = NULL_HASH;
    q.history_hash = NULL_HASH;
    q.bond = 0;
    q.min_bond = min_bond;
    q.has_revealed_answer = false;
    q.is_reopener = false;
    q.reopen_of = NULL_HASH;
    q.reopened_by = NULL_HASH;
    q.claim = Default::default();
    q.bump = ctx.bumps.question;

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
        bounty: q.bounty,
        timestamp: now,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta_pda(arbitrator: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(&[b"arbitrator", arbitrator.as_ref()], &crate::ID).0
    }

    fn meta_account_data(meta: &ArbitratorMeta) -> Vec<u8> {
        let mut data = ArbitratorMeta::DISCRIMINATOR.to_vec();
        meta.serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn registered_fee_is_charged_from_the_schedule_pda() {
        let arbitrator = Pubkey::new_unique();
        let asker = Pubkey::new_unique();
        let pda = meta_pda(&arbitrator);
        let mut lamports = 1u64;
        let mut data = meta_account_data(&ArbitratorMeta {
            authority: arbitrator,
            question_fee: 25,
            dispute_fee: 0,
            bump: 255,
        });
        let info = AccountInfo::new(
            &pda, false, false, &mut lamports, &mut data, &crate::ID, false, 0,
        );
        assert_eq!(question_fee_due(&arbitrator, &asker, &info).unwrap(), 25);
    }

    #[test]
    fn substituting_another_account_does_not_dodge_the_fee() {
        let arbitrator = Pubkey::new_unique();
        let asker = Pubkey::new_unique();
        let decoy = Pubkey::new_unique();
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let info = AccountInfo::new(
            &decoy, false, false, &mut lamports, &mut data, &crate::ID, false, 0,
        );
        assert!(question_fee_due(&arbitrator, &asker, &info).is_err());
    }

    #[test]
    fn unregistered_arbitrator_charges_nothing() {
        let arbitrator = Pubkey::new_unique();
        let asker = Pubkey::new_unique();
        let pda = meta_pda(&arbitrator);
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let info = AccountInfo::new(
            &pda, false, false, &mut lamports, &mut data, &crate::ID, false, 0,
        );
        assert_eq!(question_fee_due(&arbitrator, &asker, &info).unwrap(), 0);
    }

    #[test]
    fn arbitrator_asking_its_own_question_pays_no_fee() {
        let arbitrator = Pubkey::new_unique();
        let pda = meta_pda(&arbitrator);
        let mut lamports = 1u64;
        let mut data = meta_account_data(&ArbitratorMeta {
            authority: arbitrator,
            question_fee: 25,
            dispute_fee: 0,
            bump: 255,
        });
        let info = AccountInfo::new(
            &pda, false, false, &mut lamports, &mut data, &crate::ID, false, 0,
        );
        assert_eq!(question_fee_due(&arbitrator, &arbitrator, &info).unwrap(), 0);
    }

    #[test]
    fn opening_time_cap_never_wraps() {
        check_opening_ts(0, 100, 3600).unwrap();
        check_opening_ts(3700, 100, 3600).unwrap();
        assert!(check_opening_ts(3701, 100, 3600).is_err());
        assert!(check_opening_ts(5, i64::MAX - 1, i64::MAX).is_err());
    }
}
