use anchor_lang::prelude::*;

use crate::errors::OracleError;
use crate::events::ArbitrationRequested;
use crate::state::Question;

#[derive(Accounts)]
pub struct RequestArbitration<'info> {
    #[account(
        mut,
        seeds = [b"question", question.question_id.as_ref()],
        bump = question.bump,
        constraint = arbitrator.key() == question.arbitrator @ OracleError::OnlyArbitrator,
    )]
    pub question: Box<Account<'info, Question>>,

    pub arbitrator: Signer<'info>,
}

/// Freezes the question for arbitration. `requester` is whoever paid the
/// arbitrator's dispute fee through the capability; the ledger only records
/// it for the log.
pub fn process_request_arbitration(
    ctx: Context<RequestArbitration>,
    max_previous: u64,
    requester: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let question = &mut ctx.accounts.question;

    require!(question.finalization_ts > 0, OracleError::NoAnswerToArbitrate);
    require!(!question.is_pending_arbitration, OracleError::PendingArbitration);
    require!(!question.is_finalized(now), OracleError::FinalizationDeadlinePassed);
    require!(question.has_revealed_answer, OracleError::NoUnconcealedAnswer);
    if max_previous > 0 {
        require!(question.bond <= max_previous, OracleError::MaxPreviousExceeded);
    }

    question.is_pending_arbitration = true;

    emit!(ArbitrationRequested {
        question_id: question.question_id,
        requester,
        timestamp: now,
    });

    Ok(())
}
