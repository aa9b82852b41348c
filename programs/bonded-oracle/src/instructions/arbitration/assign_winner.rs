use anchor_lang::prelude::*;

use crate::errors::OracleError;
use crate::instructions::arbitration::submit_answer_by_arbitrator::finalize_by_arbitrator;
use crate::state::{Commitment, Question};
use crate::utils::settlement::{self, ClaimEntry};

#[derive(Accounts)]
pub struct AssignWinner<'info> {
    #[account(
        mut,
        seeds = [b"question", question.question_id.as_ref()],
        bump = question.bump,
        constraint = arbitrator.key() == question.arbitrator @ OracleError::OnlyArbitrator,
    )]
    pub question: Box<Account<'info, Question>>,

    /// Required when the latest history entry is a commitment.
    pub commitment: Option<Account<'info, Commitment>>,

    pub arbitrator: Signer<'info>,
}

/// Lets the arbitrator settle by pointing at the latest already-submitted
/// entry: if that entry (revealed if it was a commitment) matches the
/// arbitrated answer its answerer wins, otherwise `payee_if_wrong` does.
/// The full payout walk still happens at claim time.
pub fn process_assign_winner(
    ctx: Context<AssignWinner>,
    answer: [u8; 32],
    payee_if_wrong: Pubkey,
    last_history_hash: [u8; 32],
    last_answer_or_commitment_id: [u8; 32],
    last_answerer: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let question = &mut ctx.accounts.question;
    require!(question.is_pending_arbitration, OracleError::NotPendingArbitration);

    let entry = ClaimEntry {
        history_hash: last_history_hash,
        answerer: last_answerer,
        bond: question.bond,
        answer: last_answer_or_commitment_id,
    };
    let is_commitment = settlement::verify_link(&question.history_hash, &entry)?;

    let resolved = if is_commitment {
        let commitment = ctx
            .accounts
            .commitment
            .as_ref()
            .ok_or(OracleError::MissingCommitmentAccount)?;
        require!(
            commitment.commitment_id == last_answer_or_commitment_id,
            OracleError::CommitmentNotFound
        );
        if commitment.is_revealed {
            Some(commitment.revealed_answer)
        } else {
            require!(
                now >= commitment.reveal_deadline,
                OracleError::RevealDeadlineNotPassed
            );
            None
        }
    } else {
        Some(last_answer_or_commitment_id)
    };

    let winner = if resolved == Some(answer) {
        last_answerer
    } else {
        payee_if_wrong
    };

    finalize_by_arbitrator(question, answer, winner, now)
}
