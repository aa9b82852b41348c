use anchor_lang::prelude::*;

use crate::errors::OracleError;
use crate::events::WinningsClaimed;
use crate::state::{Commitment, OracleConfig, Question, UserBalance};
use crate::utils::settlement::{self, ClaimEntry, CommitmentState};

#[derive(Accounts)]
#[instruction(question_id: [u8; 32])]
pub struct ClaimWinnings<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, OracleConfig>,

    #[account(
        mut,
        seeds = [b"question", question_id.as_ref()],
        bump = question.bump,
    )]
    pub question: Box<Account<'info, Question>>,

    pub claimer: Signer<'info>,
    // Remaining accounts: the UserBalance PDA of every party being
    // credited (treasury included when fees apply) and the Commitment PDA
    // of every commitment entry in the supplied history segment.
}

pub(crate) fn find_account<'a, 'info>(
    remaining: &'a [AccountInfo<'info>],
    key: &Pubkey,
) -> Option<&'a AccountInfo<'info>> {
    remaining.iter().find(|info| info.key == key)
}

pub(crate) fn resolve_commitment(
    remaining: &[AccountInfo],
    commitment_id: &[u8; 32],
    now: i64,
) -> Result<CommitmentState> {
    let (addr, _) =
        Pubkey::find_program_address(&[b"commitment", commitment_id.as_ref()], &crate::ID);
    let info =
        find_account(remaining, &addr).ok_or(error!(OracleError::MissingCommitmentAccount))?;
    require!(info.owner == &crate::ID, OracleError::MissingCommitmentAccount);
    let data = info.try_borrow_data()?;
    let commitment = Commitment::try_deserialize(&mut &data[..])?;
    if commitment.is_revealed {
        Ok(CommitmentState::Revealed(commitment.revealed_answer))
    } else if now >= commitment.reveal_deadline {
        Ok(CommitmentState::Expired)
    } else {
        Ok(CommitmentState::Pending)
    }
}

pub(crate) fn credit_balance(
    remaining: &[AccountInfo],
    to: &Pubkey,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let (addr, _) = Pubkey::find_program_address(&[b"balance", to.as_ref()], &crate::ID);
    let info = find_account(remaining, &addr).ok_or(error!(OracleError::MissingBalanceAccount))?;
    require!(info.owner == &crate::ID, OracleError::MissingBalanceAccount);
    let mut balance = {
        let data = info.try_borrow_data()?;
        UserBalance::try_deserialize(&mut &data[..])?
    };
    balance.amount = balance
        .amount
        .checked_add(amount)
        .ok_or(OracleError::MathOverflow)?;
    let mut data = info.try_borrow_mut_data()?;
    let mut cursor: &mut [u8] = &mut data;
    balance.try_serialize(&mut cursor)?;
    Ok(())
}

pub(crate) fn build_entries(
    history_hashes: &[[u8; 32]],
    answerers: &[Pubkey],
    bonds: &[u64],
    answers: &[[u8; 32]],
) -> Result<Vec<ClaimEntry>> {
    require!(
        history_hashes.len() == answerers.len()
            && answerers.len() == bonds.len()
            && bonds.len() == answers.len(),
        OracleError::ArrayLengthMismatch
    );
    Ok(history_hashes
        .iter()
        .zip(answerers)
        .zip(bonds)
        .zip(answers)
        .map(|(((history_hash, answerer), bond), answer)| ClaimEntry {
            history_hash: *history_hash,
            answerer: *answerer,
            bond: *bond,
            answer: *answer,
        })
        .collect())
}

/// Verifies a history segment against the stored head and applies the
/// resulting credits. Mutates only on full success; a question whose chain
/// is already fully claimed is the one documented no-op.
pub(crate) fn apply_claim(
    question: &mut Question,
    config: &OracleConfig,
    entries: &[ClaimEntry],
    remaining: &[AccountInfo],
    now: i64,
) -> Result<()> {
    require!(question.is_finalized(now), OracleError::NotFinalized);
    if question.is_claimed_out() {
        return Ok(());
    }

    let outcome = settlement::verify_and_settle(
        question.history_hash,
        question.best_answer,
        question.bounty,
        question.claim,
        entries,
        config.claim_fee_divisor,
        |id| resolve_commitment(remaining, id, now),
    )?;

    for credit in &outcome.credits {
        credit_balance(remaining, &credit.to, credit.amount)?;
        emit!(WinningsClaimed {
            question_id: question.question_id,
            user: credit.to,
            amount: credit.amount,
        });
    }
    if outcome.fees > 0 {
        credit_balance(remaining, &config.treasury, outcome.fees)?;
    }

    if outcome.bounty_taken {
        question.bounty = 0;
    }
    question.history_hash = outcome.new_history_hash;
    question.claim = outcome.progress;

    Ok(())
}

pub fn process_claim_winnings<'info>(
    ctx: Context<'_, '_, 'info, 'info, ClaimWinnings<'info>>,
    _question_id: [u8; 32],
    history_hashes: Vec<[u8; 32]>,
    answerers: Vec<Pubkey>,
    bonds: Vec<u64>,
    answers: Vec<[u8; 32]>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let entries = build_entries(&history_hashes, &answerers, &bonds, &answers)?;
    apply_claim(
        &mut ctx.accounts.question,
        &ctx.accounts.config,
        &entries,
        ctx.remaining_accounts,
        now,
    )
}
