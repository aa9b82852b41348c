use anchor_lang::prelude::*;

use crate::errors::OracleError;
use crate::utils::hashing::{self, ANSWERED_TOO_SOON, NULL_HASH};

/// Progress of a multi-call claim walk. `payee` is the answerer currently
/// owed the queued funds; `last_bond` is the bond of the last entry already
/// verified; `queued_funds` accumulates forfeited bonds not yet paid out.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ClaimProgress {
    pub payee: Pubkey,       // 32
    pub last_bond: u64,      // 8
    pub queued_funds: u64,   // 8
}

impl ClaimProgress {
    pub const LEN: usize = 32 + 8 + 8;
}

#[account]
pub struct Question {
    pub question_id: [u8; 32],        // 32
    pub asker: Pubkey,                // 32
    pub content_hash: [u8; 32],       // 32
    pub arbitrator: Pubkey,           // 32 (Pubkey::default() = none)
    pub opening_ts: i64,              // 8  (0 = open immediately)
    pub timeout: u32,                 // 4
    pub finalization_ts: i64,         // 8  (0 = never answered)
    pub is_pending_arbitration: bool, // 1
    pub bounty: u64,                  // 8
    pub best_answer: [u8; 32],        // 32
    pub history_hash: [u8; 32],       // 32 (head of the hash chain)
    pub bond: u64,                    // 8
    pub min_bond: u64,                // 8
    pub has_revealed_answer: bool,    // 1  (some non-hidden answer exists)
    pub is_reopener: bool,            // 1  (live replacement of reopen_of)
    pub reopen_of: [u8; 32],          // 32
    pub reopened_by: [u8; 32],        // 32
    pub claim: ClaimProgress,         // 48
    pub bump: u8,                     // 1
}

impl Question {
    pub const LEN: usize =
        8 + 32 + 32 + 32 + 32 + 8 + 4 + 8 + 1 + 8 + 32 + 32 + 8 + 8 + 1 + 1 + 32 + 32
            + ClaimProgress::LEN + 1;

    /// A question can take answers while it is past its opening time, not
    /// frozen for arbitration, and its challenge window has not elapsed.
    pub fn ensure_open(&self, now: i64) -> Result<()> {
        require!(!self.is_pending_arbitration, OracleError::PendingArbitration);
        require!(
            self.finalization_ts == 0 || now < self.finalization_ts,
            OracleError::FinalizationDeadlinePassed
        );
        require!(
            self.opening_ts == 0 || self.opening_ts <= now,
            OracleError::BeforeOpeningTime
        );
        Ok(())
    }

    /// The escalation rule: first bond must clear `min_bond`, later bonds
    /// must at least double the standing one. `max_previous` is the
    /// optimistic-concurrency guard: 0 means no expectation, otherwise the
    /// call fails if someone already bonded past it.
    pub fn check_new_bond(&self, bond: u64, max_previous: u64) -> Result<()> {
        require!(bond > 0, OracleError::BondMustBePositive);
        require!(bond >= self.min_bond, OracleError::BondTooLowForMinimum);
        if self.bond > 0 {
            let floor = self.bond.checked_mul(2).ok_or(OracleError::MathOverflow)?;
            require!(bond >= floor, OracleError::BondMustDouble);
        }
        if max_previous > 0 {
            require!(self.bond <= max_previous, OracleError::MaxPreviousExceeded);
        }
        Ok(())
    }

    /// Appends a HistoryLink and restarts the challenge window. Commitments
    /// never become the visible best answer until revealed.
    pub fn apply_answer(
        &mut self,
        answer_or_commitment_id: &[u8; 32],
        answerer: &Pubkey,
        bond: u64,
        is_commitment: bool,
        now: i64,
    ) -> Result<()> {
        self.history_hash = hashing::history_hash(
            &self.history_hash,
            answer_or_commitment_id,
            bond,
            answerer,
            is_commitment,
        );
        self.bond = bond;
        self.finalization_ts = now
            .checked_add(self.timeout as i64)
            .ok_or(OracleError::MathOverflow)?;
        if !is_commitment {
            self.best_answer = *answer_or_commitment_id;
            self.has_revealed_answer = true;
        }
        Ok(())
    }

    pub fn is_finalized(&self, now: i64) -> bool {
        !self.is_pending_arbitration && self.finalization_ts > 0 && self.finalization_ts <= now
    }

    pub fn result_for(&self, now: i64) -> Result<[u8; 32]> {
        require!(self.is_finalized(now), OracleError::NotFinalized);
        Ok(self.best_answer)
    }

    pub fn is_settled_too_soon(&self, now: i64) -> bool {
        self.is_finalized(now) && self.best_answer == ANSWERED_TOO_SOON
    }

    pub fn is_claimed_out(&self) -> bool {
        self.history_hash == NULL_HASH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_question() -> Question {
        Question {
            question_id: [1u8; 32],
            asker: Pubkey::new_unique(),
            content_hash: [2u8; 32],
            arbitrator: Pubkey::new_unique(),
            opening_ts: 0,
            timeout: 30,
            finalization_ts: 0,
            is_pending_arbitration: false,
            bounty: 1000,
            best_answer: NULL_HASH,
            history_hash: NULL_HASH,
            bond: 0,
            min_bond: 0,
            has_revealed_answer: false,
            is_reopener: false,
            reopen_of: NULL_HASH,
            reopened_by: NULL_HASH,
            claim: ClaimProgress::default(),
            bump: 255,
        }
    }

    #[test]
    fn unanswered_question_never_finalizes() {
        let q = open_question();
        assert!(!q.is_finalized(i64::MAX - 31));
        assert!(q.result_for(1_000_000).is_err());
    }

    #[test]
    fn answer_resets_challenge_window_each_time() {
        let mut q = open_question();
        let u = Pubkey::new_unique();
        q.apply_answer(&[1u8; 32], &u, 2, false, 100).unwrap();
        assert_eq!(q.finalization_ts, 130);
        assert!(!q.is_finalized(129));
        q.apply_answer(&[2u8; 32], &u, 4, false, 120).unwrap();
        assert_eq!(q.finalization_ts, 150);
        assert!(q.is_finalized(150));
        assert_eq!(q.result_for(150).unwrap(), [2u8; 32]);
    }

    #[test]
    fn highest_bond_wins_regardless_of_content() {
        let mut q = open_question();
        let u1 = Pubkey::new_unique();
        let u2 = Pubkey::new_unique();
        q.apply_answer(&[1u8; 32], &u1, 2, false, 0).unwrap();
        q.apply_answer(&[9u8; 32], &u2, 4, false, 1).unwrap();
        assert_eq!(q.result_for(100).unwrap(), [9u8; 32]);
    }

    #[test]
    fn bonds_must_escalate() {
        let mut q = open_question();
        q.min_bond = 5;
        assert!(q.check_new_bond(0, 0).is_err());
        assert!(q.check_new_bond(4, 0).is_err());
        q.check_new_bond(5, 0).unwrap();
        q.apply_answer(&[1u8; 32], &Pubkey::new_unique(), 5, false, 0)
            .unwrap();
        assert!(q.check_new_bond(9, 0).is_err());
        q.check_new_bond(10, 0).unwrap();
    }

    #[test]
    fn monotonic_bonding_over_a_ladder() {
        let mut q = open_question();
        let u = Pubkey::new_unique();
        let mut prev = 0u64;
        for bond in [1u64, 2, 4, 8, 16, 32, 64] {
            q.check_new_bond(bond, 0).unwrap();
            q.apply_answer(&[0u8; 32], &u, bond, false, 0).unwrap();
            assert!(q.bond > prev);
            prev = q.bond;
        }
    }

    #[test]
    fn max_previous_guards_against_races() {
        let mut q = open_question();
        q.apply_answer(&[1u8; 32], &Pubkey::new_unique(), 8, false, 0)
            .unwrap();
        // Caller observed bond 4, somebody else got to 8 first.
        assert!(q.check_new_bond(16, 4).is_err());
        q.check_new_bond(16, 8).unwrap();
        q.check_new_bond(16, 0).unwrap();
    }

    #[test]
    fn commitment_does_not_surface_as_best_answer() {
        let mut q = open_question();
        let cid = [7u8; 32];
        q.apply_answer(&cid, &Pubkey::new_unique(), 2, true, 0).unwrap();
        assert_eq!(q.best_answer, NULL_HASH);
        assert!(!q.has_revealed_answer);
        assert_eq!(q.bond, 2);
        assert_eq!(q.finalization_ts, 30);
    }

    #[test]
    fn pending_arbitration_blocks_answers_and_finality() {
        let mut q = open_question();
        q.apply_answer(&[1u8; 32], &Pubkey::new_unique(), 2, false, 0)
            .unwrap();
        q.is_pending_arbitration = true;
        assert!(q.ensure_open(10).is_err());
        assert!(!q.is_finalized(10_000));
    }

    #[test]
    fn too_soon_settlement_detected() {
        let mut q = open_question();
        q.apply_answer(&ANSWERED_TOO_SOON, &Pubkey::new_unique(), 0, false, 0)
            .unwrap();
        q.finalization_ts = 1;
        assert!(q.is_settled_too_soon(50));
        q.best_answer = [3u8; 32];
        assert!(!q.is_settled_too_soon(50));
    }

    #[test]
    fn opening_time_is_enforced() {
        let mut q = open_question();
        q.opening_ts = 500;
        assert!(q.ensure_open(499).is_err());
        q.ensure_open(500).unwrap();
    }
}
