use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

declare_id!("Bz78eBAuYk6P4HzN2DHYSReuik7hXzuLisgz28RdkcJk");

#[program]
pub mod bonded_oracle {
    use super::*;

    pub fn init_config(
        ctx: Context<InitConfig>,
        claim_fee_divisor: u64,
        max_opening_delay: i64,
    ) -> Result<()> {
        instructions::admin::init_config::process_init_config(
            ctx,
            claim_fee_divisor,
            max_opening_delay,
        )
    }

    pub fn set_arbitrator_fees(
        ctx: Context<SetArbitratorFees>,
        question_fee: u64,
        dispute_fee: u64,
    ) -> Result<()> {
        instructions::admin::set_arbitrator_fees::process_set_arbitrator_fees(
            ctx,
            question_fee,
            dispute_fee,
        )
    }

    pub fn create_balance_account(
        ctx: Context<CreateBalanceAccount>,
        owner: Pubkey,
    ) -> Result<()> {
        instructions::admin::create_balance_account::process_create_balance_account(ctx, owner)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ask_question(
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
        instructions::ask::ask_question::process_ask_question(
            ctx,
            question_id,
            template_id,
            question_text,
            arbitrator,
            timeout,
            opening_ts,
            nonce,
            min_bond,
            funding,
        )
    }

    pub fn fund_answer_bounty(ctx: Context<FundAnswerBounty>, amount: u64) -> Result<()> {
        instructions::ask::fund_answer_bounty::process_fund_answer_bounty(ctx, amount)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reopen_question(
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
        instructions::ask::reopen_question::process_reopen_question(
            ctx,
            question_id,
            template_id,
            question_text,
            arbitrator,
            timeout,
            opening_ts,
            nonce,
            min_bond,
            funding,
        )
    }

    pub fn submit_answer(
        ctx: Context<SubmitAnswer>,
        answer: [u8; 32],
        max_previous: u64,
        bond: u64,
    ) -> Result<()> {
        instructions::answer::submit_answer::process_submit_answer(ctx, answer, max_previous, bond)
    }

    pub fn submit_answer_commitment(
        ctx: Context<SubmitAnswerCommitment>,
        commitment_id: [u8; 32],
        answer_hash: [u8; 32],
        max_previous: u64,
        bond: u64,
        answerer: Pubkey,
    ) -> Result<()> {
        instructions::answer::submit_answer_commitment::process_submit_answer_commitment(
            ctx,
            commitment_id,
            answer_hash,
            max_previous,
            bond,
            answerer,
        )
    }

    pub fn submit_answer_reveal(
        ctx: Context<SubmitAnswerReveal>,
        answer: [u8; 32],
        nonce: u64,
        bond: u64,
    ) -> Result<()> {
        instructions::answer::submit_answer_reveal::process_submit_answer_reveal(
            ctx, answer, nonce, bond,
        )
    }

    pub fn request_arbitration(
        ctx: Context<RequestArbitration>,
        max_previous: u64,
        requester: Pubkey,
    ) -> Result<()> {
        instructions::arbitration::request_arbitration::process_request_arbitration(
            ctx,
            max_previous,
            requester,
        )
    }

    pub fn submit_answer_by_arbitrator(
        ctx: Context<SubmitAnswerByArbitrator>,
        answer: [u8; 32],
        answerer: Pubkey,
    ) -> Result<()> {
        instructions::arbitration::submit_answer_by_arbitrator::process_submit_answer_by_arbitrator(
            ctx, answer, answerer,
        )
    }

    pub fn assign_winner_and_submit_answer_by_arbitrator(
        ctx: Context<AssignWinner>,
        answer: [u8; 32],
        payee_if_wrong: Pubkey,
        last_history_hash: [u8; 32],
        last_answer_or_commitment_id: [u8; 32],
        last_answerer: Pubkey,
    ) -> Result<()> {
        instructions::arbitration::assign_winner::process_assign_winner(
            ctx,
            answer,
            payee_if_wrong,
            last_history_hash,
            last_answer_or_commitment_id,
            last_answerer,
        )
    }

    pub fn cancel_arbitration(ctx: Context<CancelArbitration>) -> Result<()> {
        instructions::arbitration::cancel_arbitration::process_cancel_arbitration(ctx)
    }

    pub fn claim_winnings<'info>(
        ctx: Context<'_, '_, 'info, 'info, ClaimWinnings<'info>>,
        question_id: [u8; 32],
        history_hashes: Vec<[u8; 32]>,
        answerers: Vec<Pubkey>,
        bonds: Vec<u64>,
        answers: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::claim::claim_winnings::process_claim_winnings(
            ctx,
            question_id,
            history_hashes,
            answerers,
            bonds,
            answers,
        )
    }

    pub fn claim_multiple_and_withdraw<'info>(
        ctx: Context<'_, '_, 'info, 'info, ClaimMultipleAndWithdraw<'info>>,
        question_ids: Vec<[u8; 32]>,
        lengths: Vec<u32>,
        history_hashes: Vec<[u8; 32]>,
        answerers: Vec<Pubkey>,
        bonds: Vec<u64>,
        answers: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::claim::claim_multiple_and_withdraw::process_claim_multiple_and_withdraw(
            ctx,
            question_ids,
            lengths,
            history_hashes,
            answerers,
            bonds,
            answers,
        )
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::claim::withdraw::process_withdraw(ctx)
    }
}
