use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::OracleError;
use crate::state::UserBalance;

/// Covers `required` by draining the user's internal balance first and
/// transferring only the remainder from their token account into the vault.
pub fn deduct_funding<'info>(
    required: u64,
    balance: &mut Account<'info, UserBalance>,
    user_ata: &Account<'info, TokenAccount>,
    vault: &Account<'info, TokenAccount>,
    user: &Signer<'info>,
    token_program: &Program<'info, Token>,
) -> Result<()> {
    let from_balance = balance.amount.min(required);
    balance.amount = balance
        .amount
        .checked_sub(from_balance)
        .ok_or(OracleError::MathOverflow)?;
    let remainder = required - from_balance;
    if remainder > 0 {
        token::transfer(
            CpiContext::new(
                token_program.to_account_info(),
                Transfer {
                    from: user_ata.to_account_info(),
                    to: vault.to_account_info(),
                    authority: user.to_account_info(),
                },
            ),
            remainder,
        )?;
    }
    Ok(())
}
