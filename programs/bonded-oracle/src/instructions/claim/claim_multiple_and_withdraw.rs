use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::OracleError;
use crate::events::BalanceWithdrawn;
use crate::instructions::claim::claim_winnings::{apply_claim, build_entries, find_account};
use crate::state::{OracleConfig, Question, UserBalance};

#[derive(Accounts)]
pub struct ClaimMultipleAndWithdraw<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, OracleConfig>,

    #[account(
        mut,
        seeds = [b"vault"],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = claimer_ata.mint == config.collateral_mint @ OracleError::InvalidMint,
        constraint = claimer_ata.owner == claimer.key() @ OracleError::InvalidMint,
    )]
    pub claimer_ata: Account<'info, TokenAccount>,

    pub claimer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    // Remaining accounts: each claimed Question PDA, plus the balance and
    // commitment accounts its segment needs, plus the claimer's own
    // balance account for the final withdrawal.
}

/// Batched claims over several questions with the caller's balance swept
/// out to their token account at the end. `lengths[i]` says how many
/// entries of the flattened arrays belong to `question_ids[i]`.
pub fn process_claim_multiple_and_withdraw<'info>(
    ctx: Context<'_, '_, 'info, 'info, ClaimMultipleAndWithdraw<'info>>,
    question_ids: Vec<[u8; 32]>,
    lengths: Vec<u32>,
    history_hashes: Vec<[u8; 32]>,
    answerers: Vec<Pubkey>,
    bonds: Vec<u64>,
    answers: Vec<[u8; 32]>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    require!(
        question_ids.len() == lengths.len(),
        OracleError::ArrayLengthMismatch
    );
    let total: usize = lengths.iter().map(|n| *n as usize).sum();
    require!(total == history_hashes.len(), OracleError::ArrayLengthMismatch);
    let entries = build_entries(&history_hashes, &answerers, &bonds, &answers)?;

    let remaining = ctx.remaining_accounts;
    let config = &ctx.accounts.config;

    let mut offset = 0usize;
    for (question_id, len) in question_ids.iter().zip(&lengths) {
        let len = *len as usize;
        let segment = &entries[offset..offset + len];
        offset += len;

        let (addr, _) =
            Pubkey::find_program_address(&[b"question", question_id.as_ref()], &crate::ID);
        let info = find_account(remaining, &addr)
            .ok_or(error!(OracleError::QuestionIdMismatch))?;
        require!(info.owner == &crate::ID, OracleError::QuestionIdMismatch);

        let mut question = {
            let data = info.try_borrow_data()?;
            Question::try_deserialize(&mut &data[..])?
        };
        apply_claim(&mut question, config, segment, remaining, now)?;
        let mut data = info.try_borrow_mut_data()?;
        let mut cursor: &mut [u8] = &mut data;
        question.try_serialize(&mut cursor)?;
    }

    // Sweep the caller's own balance out of the vault, if they keep one.
    let claimer = ctx.accounts.claimer.key();
    let (balance_addr, _) =
        Pubkey::find_program_address(&[b"balance", claimer.as_ref()], &crate::ID);
    if let Some(info) = find_account(remaining, &balance_addr) {
        require!(info.owner == &crate::ID, OracleError::MissingBalanceAccount);
        let mut balance = {
            let data = info.try_borrow_data()?;
            UserBalance::try_deserialize(&mut &data[..])?
        };
        let amount = balance.amount;
        if amount > 0 {
            balance.amount = 0;
            {
                let mut data = info.try_borrow_mut_data()?;
                let mut cursor: &mut [u8] = &mut data;
                balance.try_serialize(&mut cursor)?;
            }
            let bump = config.bump;
            let seeds: &[&[u8]] = &[b"config", &[bump]];
            let signer = &[seeds];
            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.vault.to_account_info(),
                        to: ctx.accounts.claimer_ata.to_account_info(),
                        authority: ctx.accounts.config.to_account_info(),
                    },
                    signer,
                ),
                amount,
            )?;
            emit!(BalanceWithdrawn {
                user: claimer,
                amount,
            });
        }
    }

    Ok(())
}
