use anchor_lang::prelude::*;

#[error_code]
pub enum OracleError {
    #[msg("Derived question id does not match the supplied one")]
    QuestionIdMismatch,
    #[msg("Timeout must be positive and at most 365 days")]
    TimeoutOutOfRange,
    #[msg("Opening time is too far in the future")]
    OpeningTooFarInFuture,
    #[msg("Funding does not cover the arbitrator question fee")]
    FundingBelowQuestionFee,
    #[msg("Question is not open yet")]
    BeforeOpeningTime,
    #[msg("Finalization deadline has passed")]
    FinalizationDeadlinePassed,
    #[msg("Question is pending arbitration")]
    PendingArbitration,
    #[msg("Question is not pending arbitration")]
    NotPendingArbitration,
    #[msg("Bond must be positive")]
    BondMustBePositive,
    #[msg("Amount must be positive")]
    AmountMustBePositive,
    #[msg("Bond is below the question minimum")]
    BondTooLowForMinimum,
    #[msg("Bond must be at least double the previous bond")]
    BondMustDouble,
    #[msg("Recorded bond exceeds max_previous")]
    MaxPreviousExceeded,
    #[msg("Question is not finalized")]
    NotFinalized,
    #[msg("Question has no answer to arbitrate over")]
    NoAnswerToArbitrate,
    #[msg("Only unrevealed commitments on record, nothing to arbitrate")]
    NoUnconcealedAnswer,
    #[msg("Only the question arbitrator may do this")]
    OnlyArbitrator,
    #[msg("Answerer must be a real account")]
    AnswererMustBeSet,
    #[msg("Commitment account does not match the derived commitment id")]
    CommitmentNotFound,
    #[msg("Commitment was already revealed")]
    AlreadyRevealed,
    #[msg("Reveal deadline has passed")]
    RevealDeadlinePassed,
    #[msg("You must wait for the reveal deadline before claiming")]
    RevealDeadlineNotPassed,
    #[msg("Commitment account required but not supplied")]
    MissingCommitmentAccount,
    #[msg("Balance account for a payee was not supplied")]
    MissingBalanceAccount,
    #[msg("Supplied history does not hash-link to the stored head")]
    HistoryMismatch,
    #[msg("History arrays must have equal lengths")]
    ArrayLengthMismatch,
    #[msg("History must not be empty")]
    EmptyHistory,
    #[msg("Question was not settled as answered-too-soon")]
    NotSettledTooSoon,
    #[msg("Question already has a live replacement")]
    AlreadyReopened,
    #[msg("Reopen parameters do not match the original question")]
    ReopenParamMismatch,
    #[msg("Reopen the original question before reopening its replacement")]
    ReopenerStillActive,
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,
    #[msg("Token account does not match the collateral mint")]
    InvalidMint,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounty_funding_error_is_distinct_from_the_bond_one() {
        assert_eq!(
            OracleError::AmountMustBePositive.to_string(),
            "Amount must be positive"
        );
        assert_ne!(
            OracleError::AmountMustBePositive.to_string(),
            OracleError::BondMustBePositive.to_string()
        );
    }
}
