use anchor_lang::prelude::*;

use crate::errors::OracleError;
use crate::events::{AnswerSubmitted, QuestionFinalized};
use crate::state::Question;

#[derive(Accounts)]
pub struct SubmitAnswerByArbitrator<'info> {
    #[account(
        mut,
        seeds = [b"question", question.question_id.as_ref()],
        bump = question.bump,
        constraint = arbitrator.key() == question.arbitrator @ OracleError::OnlyArbitrator,
    )]
    pub question: Box<Account<'info, Question>>,

    pub arbitrator: Signer<'info>,
}

pub(crate) fn finalize_by_arbitrator(
    question: &mut Question,
    answer: [u8; 32],
    answerer: Pubkey,
    now: i64,
) -> Result<()> {
    require!(question.is_pending_arbitration, OracleError::NotPendingArbitration);
    require!(answerer != Pubkey::default(), OracleError::AnswererMustBeSet);

    // A zero-bond link, exempt from the doubling rule.
    question.apply_answer(&answer, &answerer, 0, false, now)?;
    question.is_pending_arbitration = false;
    question.finalization_ts = now;

    emit!(AnswerSubmitted {
        question_id: question.question_id,
        answer_or_commitment_id: answer,
        answerer,
        bond: 0,
        history_hash: question.history_hash,
        is_commitment: false,
        timestamp: now,
    });
    emit!(QuestionFinalized {
        question_id: question.question_id,
        answer,
        timestamp: now,
    });

    Ok(())
}

pub fn process_submit_answer_by_arbitrator(
    ctx: Context<SubmitAnswerByArbitrator>,
    answer: [u8; 32],
    answerer: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    finalize_by_arbitrator(&mut ctx.accounts.question, answer, answerer, now)
}
