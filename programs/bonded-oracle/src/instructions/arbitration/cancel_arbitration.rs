use anchor_lang::prelude::*;

use crate::errors::OracleError;
use crate::events::ArbitrationCancelled;
use crate::state::Question;

#[derive(Accounts)]
pub struct CancelArbitration<'info> {
    #[account(
        mut,
        seeds = [b"question", question.question_id.as_ref()],
        bump = question.bump,
        constraint = arbitrator.key() == question.arbitrator @ OracleError::OnlyArbitrator,
    )]
    pub question: Box<Account<'info, Question>>,

    pub arbitrator: Signer<'info>,
}

/// Hands the question back to ordinary bonding with a fresh challenge
/// window. The doubling rule stays relative to the last recorded bond.
pub fn process_cancel_arbitration(ctx: Context<CancelArbitration>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let question = &mut ctx.accounts.question;
    require!(question.is_pending_arbitration, OracleError::NotPendingArbitration);

    question.is_pending_arbitration = false;
    question.finalization_ts = now
        .checked_add(question.timeout as i64)
        .ok_or(OracleError::MathOverflow)?;

    emit!(ArbitrationCancelled {
        question_id: question.question_id,
        new_finalization_ts: question.finalization_ts,
    });

    Ok(())
}
