use anchor_lang::prelude::*;

use crate::errors::OracleError;
use crate::events::AnswerRevealed;
use crate::state::{Commitment, Question};
use crate::utils::hashing;

#[derive(Accounts)]
pub struct SubmitAnswerReveal<'info> {
    #[account(
        mut,
        seeds = [b"question", question.question_id.as_ref()],
        bump = question.bump,
    )]
    pub question: Box<Account<'info, Question>>,

    #[account(
        mut,
        seeds = [b"commitment", commitment.commitment_id.as_ref()],
        bump = commitment.bump,
    )]
    pub commitment: Account<'info, Commitment>,

    pub revealer: Signer<'info>,
}

/// Reveals a committed answer. The bond was locked at commit time, so no
/// escalation checks rerun here; a reveal is even allowed while arbitration
/// is pending, it only cannot arrive after the reveal deadline.
pub fn process_submit_answer_reveal(
    ctx: Context<SubmitAnswerReveal>,
    answer: [u8; 32],
    nonce: u64,
    bond: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let question = &mut ctx.accounts.question;
    let commitment = &mut ctx.accounts.commitment;

    require!(!commitment.is_revealed, OracleError::AlreadyRevealed);
    require!(now < commitment.reveal_deadline, OracleError::RevealDeadlinePassed);
    require!(
        commitment.question_id == question.question_id,
        OracleError::QuestionIdMismatch
    );

    let answer_hash = hashing::answer_hash(&answer, nonce);
    let derived = hashing::commitment_id(&question.question_id, &answer_hash, bond);
    require!(derived == commitment.commitment_id, OracleError::CommitmentNotFound);

    commitment.is_revealed = true;
    commitment.revealed_answer = answer;
    question.has_revealed_answer = true;

    // Only surfaces as the question's answer if this commitment still
    // holds the leading bond.
    if bond == question.bond {
        question.best_answer = answer;
    }

    emit!(AnswerRevealed {
        question_id: question.question_id,
        commitment_id: commitment.commitment_id,
        answer,
        nonce,
        bond,
    });

    Ok(())
}
