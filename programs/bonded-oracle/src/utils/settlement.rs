use anchor_lang::prelude::*;

use crate::errors::OracleError;
use crate::state::question::ClaimProgress;
use crate::utils::hashing::{self, ANSWERED_TOO_SOON, NULL_HASH};

/// One caller-supplied history entry, most-recent-first. `answer` holds the
/// plaintext answer, or the commitment id when the entry was a commitment
/// (which variant it is falls out of the link verification).
#[derive(Clone, Copy, Debug)]
pub struct ClaimEntry {
    /// Chain head after this entry is peeled off (the next entry's link).
    pub history_hash: [u8; 32],
    pub answerer: Pubkey,
    pub bond: u64,
    pub answer: [u8; 32],
}

/// How a commitment id resolves at claim time.
pub enum CommitmentState {
    Revealed([u8; 32]),
    /// Deadline passed unrevealed: settles as a wrong answer.
    Expired,
    /// Still revealable: the whole claim must wait.
    Pending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Credit {
    pub to: Pubkey,
    pub amount: u64,
}

pub struct SettlementOutcome {
    pub credits: Vec<Credit>,
    /// Claim fees withheld, owed to the treasury.
    pub fees: u64,
    pub progress: ClaimProgress,
    pub new_history_hash: [u8; 32],
    /// The bounty was paid out in `credits` and must be zeroed.
    pub bounty_taken: bool,
}

/// Checks that `entry` hash-links to `head`, trying the commitment variant
/// first. Returns whether the entry is a commitment.
pub fn verify_link(head: &[u8; 32], entry: &ClaimEntry) -> Result<bool> {
    let as_commitment = hashing::history_hash(
        &entry.history_hash,
        &entry.answer,
        entry.bond,
        &entry.answerer,
        true,
    );
    if *head == as_commitment {
        return Ok(true);
    }
    let as_plain = hashing::history_hash(
        &entry.history_hash,
        &entry.answer,
        entry.bond,
        &entry.answerer,
        false,
    );
    if *head == as_plain {
        return Ok(false);
    }
    err!(OracleError::HistoryMismatch)
}

/// Folds a bond into the queued pool, withholding the claim fee unless the
/// pool was empty (which keeps the top-of-chain self-return fee-free).
fn queue_bond(queued: u64, bond: u64, fee_divisor: u64, fees: &mut u64) -> Result<u64> {
    if bond == 0 {
        return Ok(queued);
    }
    let fee = if queued == 0 || fee_divisor == 0 {
        0
    } else {
        bond / fee_divisor
    };
    *fees = fees.checked_add(fee).ok_or(OracleError::MathOverflow)?;
    queued
        .checked_add(bond - fee)
        .ok_or(OracleError::MathOverflow.into())
}

/// Verifies a most-recent-first replay of the history against the stored
/// chain head and works out who gets paid what. Pure: commitment lookup is
/// injected, credits are returned for the caller to apply. Any link
/// mismatch or still-revealable commitment errors out with nothing to
/// apply, so a failed claim never moves funds.
pub fn verify_and_settle(
    stored_history_hash: [u8; 32],
    best_answer: [u8; 32],
    bounty: u64,
    start: ClaimProgress,
    entries: &[ClaimEntry],
    fee_divisor: u64,
    mut resolve: impl FnMut(&[u8; 32]) -> Result<CommitmentState>,
) -> Result<SettlementOutcome> {
    require!(!entries.is_empty(), OracleError::EmptyHistory);

    let mut credits: Vec<Credit> = Vec::new();
    let mut fees = 0u64;
    let mut payee = start.payee;
    let mut last_bond = start.last_bond;
    let mut queued = start.queued_funds;
    let mut head = stored_history_hash;
    let mut bounty_taken = false;
    let is_too_soon = best_answer == ANSWERED_TOO_SOON;

    for entry in entries {
        let is_commitment = verify_link(&head, entry)?;

        // The bond of the more recent entry above us is now known to be
        // outbid, so it joins the pool.
        queued = queue_bond(queued, last_bond, fee_divisor, &mut fees)?;

        let resolved = if is_commitment {
            match resolve(&entry.answer)? {
                CommitmentState::Revealed(answer) => Some(answer),
                CommitmentState::Expired => None,
                CommitmentState::Pending => {
                    return err!(OracleError::RevealDeadlineNotPassed)
                }
            }
        } else {
            Some(entry.answer)
        };

        if resolved == Some(best_answer) {
            if payee == Pubkey::default() {
                // First payable answerer seen: the overall winner.
                payee = entry.answerer;
                if !is_too_soon && bounty > 0 {
                    credits.push(Credit { to: payee, amount: bounty });
                    bounty_taken = true;
                }
            } else if payee != entry.answerer {
                // Someone further down also answered correctly; they take
                // over the queue, keeping back a takeover fee of at most
                // their own bond for the payee above who held the line.
                let takeover_fee = queued.min(entry.bond);
                let owed = queued - takeover_fee;
                if owed > 0 {
                    credits.push(Credit { to: payee, amount: owed });
                }
                payee = entry.answerer;
                queued = takeover_fee;
            }
        }

        last_bond = entry.bond;
        head = entry.history_hash;
    }

    let progress = if head == NULL_HASH {
        // Full chain consumed: the payee keeps whatever remains.
        queued = queue_bond(queued, last_bond, fee_divisor, &mut fees)?;
        if payee != Pubkey::default() && queued > 0 {
            credits.push(Credit { to: payee, amount: queued });
        }
        ClaimProgress::default()
    } else {
        // Partial claim: pay out what we can and persist the rest, unless
        // all we saw so far were unrevealed commitments.
        if payee != Pubkey::default() && queued > 0 {
            credits.push(Credit { to: payee, amount: queued });
            queued = 0;
        }
        ClaimProgress { payee, last_bond, queued_funds: queued }
    };

    Ok(SettlementOutcome {
        credits,
        fees,
        progress,
        new_history_hash: head,
        bounty_taken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FEE_DIVISOR: u64 = 40;

    fn subfee(bond: u64) -> u64 {
        bond - bond / FEE_DIVISOR
    }

    fn no_commitments(_id: &[u8; 32]) -> Result<CommitmentState> {
        panic!("no commitment entries expected in this chain")
    }

    /// Builds the chain oldest-first and returns (head, entries
    /// most-recent-first) the way a claimant would supply them.
    fn build_chain(
        items: &[(Pubkey, u64, [u8; 32], bool)],
    ) -> ([u8; 32], Vec<ClaimEntry>) {
        let mut head = NULL_HASH;
        let mut entries: Vec<ClaimEntry> = Vec::new();
        for (answerer, bond, answer, is_commitment) in items {
            entries.push(ClaimEntry {
                history_hash: head,
                answerer: *answerer,
                bond: *bond,
                answer: *answer,
            });
            head = hashing::history_hash(&head, answer, *bond, answerer, *is_commitment);
        }
        entries.reverse();
        (head, entries)
    }

    fn total_credited(outcome: &SettlementOutcome, who: &Pubkey) -> u64 {
        outcome
            .credits
            .iter()
            .filter(|c| c.to == *who)
            .map(|c| c.amount)
            .sum()
    }

    #[test]
    fn single_answer_takes_bond_and_bounty() {
        let u = Pubkey::new_unique();
        let ans = [5u8; 32];
        let (head, entries) = build_chain(&[(u, 3, ans, false)]);
        let out = verify_and_settle(
            head,
            ans,
            1000,
            ClaimProgress::default(),
            &entries,
            FEE_DIVISOR,
            no_commitments,
        )
        .unwrap();
        assert_eq!(total_credited(&out, &u), 1003);
        assert!(out.bounty_taken);
        assert_eq!(out.fees, 0);
        assert_eq!(out.new_history_hash, NULL_HASH);
        assert_eq!(out.progress, ClaimProgress::default());
    }

    #[test]
    fn loser_bond_flows_to_winner() {
        let u1 = Pubkey::new_unique();
        let u2 = Pubkey::new_unique();
        let a = [1u8; 32];
        let b = [2u8; 32];
        let (head, entries) = build_chain(&[(u1, 2, a, false), (u2, 4, b, false)]);
        let out = verify_and_settle(
            head,
            b,
            1000,
            ClaimProgress::default(),
            &entries,
            FEE_DIVISOR,
            no_commitments,
        )
        .unwrap();
        assert_eq!(total_credited(&out, &u2), 4 + 2 + 1000);
        assert_eq!(total_credited(&out, &u1), 0);
    }

    #[test]
    fn escalating_ladder_pays_with_fees() {
        let w = Pubkey::new_unique();
        let l = Pubkey::new_unique();
        let right = [1u8; 32];
        let wrong = [2u8; 32];
        let (head, entries) = build_chain(&[
            (w, 20, right, false),
            (l, 40, wrong, false),
            (w, 80, right, false),
            (l, 160, wrong, false),
            (w, 320, right, false),
            (w, 640, right, false),
        ]);
        let out = verify_and_settle(
            head,
            right,
            1000,
            ClaimProgress::default(),
            &entries,
            FEE_DIVISOR,
            no_commitments,
        )
        .unwrap();
        // Top bond and bounty are fee-free, everything folded in below is
        // fee-liable. w answered at every paying level, so no takeovers.
        let expected =
            1000 + 640 + subfee(320) + subfee(160) + subfee(80) + subfee(40) + subfee(20);
        assert_eq!(total_credited(&out, &w), expected);
        assert_eq!(total_credited(&out, &l), 0);
        assert_eq!(
            out.fees,
            320 / FEE_DIVISOR + 160 / FEE_DIVISOR + 80 / FEE_DIVISOR + 40 / FEE_DIVISOR
                + 20 / FEE_DIVISOR
        );
    }

    #[test]
    fn takeover_pays_earlier_correct_answerer() {
        let u1 = Pubkey::new_unique();
        let u2 = Pubkey::new_unique();
        let u3 = Pubkey::new_unique();
        let x = [1u8; 32];
        let y = [2u8; 32];
        let (head, entries) =
            build_chain(&[(u1, 100, x, false), (u2, 200, y, false), (u3, 400, x, false)]);
        let out = verify_and_settle(
            head,
            x,
            500,
            ClaimProgress::default(),
            &entries,
            FEE_DIVISOR,
            no_commitments,
        )
        .unwrap();
        // u3 keeps own bond plus u2's forfeit minus the takeover fee u1
        // claws back; u1 gets the fee plus their own bond.
        assert_eq!(total_credited(&out, &u3), 500 + 400 + subfee(200) - 100);
        assert_eq!(total_credited(&out, &u1), 100 + subfee(100));
        assert_eq!(total_credited(&out, &u2), 0);
        // Conservation: everything in equals everything out.
        let paid: u64 = out.credits.iter().map(|c| c.amount).sum();
        assert_eq!(paid + out.fees, 100 + 200 + 400 + 500);
    }

    #[test]
    fn unrevealed_commitment_forfeits_bond() {
        let u1 = Pubkey::new_unique();
        let u3 = Pubkey::new_unique();
        let x = [1u8; 32];
        let cid = [9u8; 32];
        let (head, entries) = build_chain(&[(u3, 1, cid, true), (u1, 2, x, false)]);
        let out = verify_and_settle(
            head,
            x,
            1000,
            ClaimProgress::default(),
            &entries,
            FEE_DIVISOR,
            |id| {
                assert_eq!(id, &cid);
                Ok(CommitmentState::Expired)
            },
        )
        .unwrap();
        assert_eq!(total_credited(&out, &u1), 1000 + 2 + 1);
        assert_eq!(total_credited(&out, &u3), 0);
    }

    #[test]
    fn revealed_commitment_can_win() {
        let committer = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let x = [1u8; 32];
        let y = [2u8; 32];
        let cid = [9u8; 32];
        let (head, entries) = build_chain(&[(other, 2, y, false), (committer, 4, cid, true)]);
        let mut reveals = HashMap::new();
        reveals.insert(cid, x);
        let out = verify_and_settle(
            head,
            x,
            100,
            ClaimProgress::default(),
            &entries,
            FEE_DIVISOR,
            |id| Ok(CommitmentState::Revealed(reveals[id])),
        )
        .unwrap();
        assert_eq!(total_credited(&out, &committer), 100 + 4 + 2);
        assert_eq!(total_credited(&out, &other), 0);
    }

    #[test]
    fn pending_commitment_blocks_the_whole_claim() {
        let u1 = Pubkey::new_unique();
        let u2 = Pubkey::new_unique();
        let x = [1u8; 32];
        let cid = [9u8; 32];
        let (head, entries) = build_chain(&[(u1, 2, x, false), (u2, 4, cid, true)]);
        let res = verify_and_settle(
            head,
            x,
            100,
            ClaimProgress::default(),
            &entries,
            FEE_DIVISOR,
            |_| Ok(CommitmentState::Pending),
        );
        assert!(res.is_err());
    }

    #[test]
    fn too_soon_result_withholds_bounty() {
        let u1 = Pubkey::new_unique();
        let u2 = Pubkey::new_unique();
        let x = [1u8; 32];
        let (head, entries) =
            build_chain(&[(u1, 2, x, false), (u2, 4, ANSWERED_TOO_SOON, false)]);
        let out = verify_and_settle(
            head,
            ANSWERED_TOO_SOON,
            1000,
            ClaimProgress::default(),
            &entries,
            FEE_DIVISOR,
            no_commitments,
        )
        .unwrap();
        assert!(!out.bounty_taken);
        assert_eq!(total_credited(&out, &u2), 4 + 2);
        assert_eq!(total_credited(&out, &u1), 0);
    }

    #[test]
    fn claim_resumes_across_calls() {
        let w = Pubkey::new_unique();
        let l = Pubkey::new_unique();
        let x = [1u8; 32];
        let y = [2u8; 32];
        let (head, entries) = build_chain(&[
            (l, 1, y, false),
            (w, 2, x, false),
            (l, 4, y, false),
            (w, 8, x, false),
        ]);

        let first = verify_and_settle(
            head,
            x,
            100,
            ClaimProgress::default(),
            &entries[..2],
            FEE_DIVISOR,
            no_commitments,
        )
        .unwrap();
        assert_eq!(total_credited(&first, &w), 100 + 8);
        assert_eq!(first.progress.payee, w);
        assert_eq!(first.progress.last_bond, 4);
        assert_eq!(first.progress.queued_funds, 0);
        assert_ne!(first.new_history_hash, NULL_HASH);

        let second = verify_and_settle(
            first.new_history_hash,
            x,
            0, // bounty already taken
            first.progress,
            &entries[2..],
            FEE_DIVISOR,
            no_commitments,
        )
        .unwrap();
        assert_eq!(total_credited(&second, &w), 4 + 2 + 1);
        assert_eq!(second.new_history_hash, NULL_HASH);
        assert_eq!(second.progress, ClaimProgress::default());
        assert_eq!(
            total_credited(&first, &w) + total_credited(&second, &w),
            100 + 8 + 4 + 2 + 1
        );
    }

    #[test]
    fn partial_claim_of_only_unrevealed_commits_keeps_queue() {
        let k4 = Pubkey::new_unique();
        let k5 = Pubkey::new_unique();
        let k6 = Pubkey::new_unique();
        let x = [1u8; 32];
        let cid4 = [4u8; 32];
        let cid5 = [5u8; 32];
        let (head, entries) = build_chain(&[
            (k6, 8, x, false),
            (k5, 16, cid5, true),
            (k4, 32, cid4, true),
        ]);
        let out = verify_and_settle(
            head,
            x,
            100,
            ClaimProgress::default(),
            &entries[..2],
            FEE_DIVISOR,
            |_| Ok(CommitmentState::Expired),
        )
        .unwrap();
        // Nobody payable yet, so nothing is paid and the pool carries over.
        assert!(out.credits.is_empty());
        assert_eq!(out.progress.payee, Pubkey::default());
        assert_eq!(out.progress.last_bond, 16);
        assert_eq!(out.progress.queued_funds, 32);

        let rest = verify_and_settle(
            out.new_history_hash,
            x,
            100,
            out.progress,
            &entries[2..],
            FEE_DIVISOR,
            |_| Ok(CommitmentState::Expired),
        )
        .unwrap();
        assert_eq!(total_credited(&rest, &k6), 100 + 32 + subfee(16) + 8);
        assert_eq!(total_credited(&rest, &k4), 0);
        assert_eq!(total_credited(&rest, &k5), 0);
    }

    #[test]
    fn corrupted_replay_fails_atomically() {
        let u = Pubkey::new_unique();
        let ans = [5u8; 32];
        let (head, mut entries) = build_chain(&[(u, 3, ans, false)]);
        entries[0].bond = 4;
        let res = verify_and_settle(
            head,
            ans,
            1000,
            ClaimProgress::default(),
            &entries,
            FEE_DIVISOR,
            no_commitments,
        );
        assert!(res.is_err());
    }

    #[test]
    fn settlement_conserves_value_across_orderings() {
        let users: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let answers = [[1u8; 32], [2u8; 32], [3u8; 32]];
        let bounty = 777u64;
        // A handful of answer permutations over an escalating ladder.
        for perm in 0..answers.len() {
            let mut items = Vec::new();
            let mut bond = 3u64;
            let mut total_bonds = 0u64;
            for i in 0..6 {
                let who = users[i % users.len()];
                let ans = answers[(i + perm) % answers.len()];
                items.push((who, bond, ans, false));
                total_bonds += bond;
                bond *= 2;
            }
            let best = items.last().map(|(_, _, a, _)| *a).unwrap();
            let (head, entries) = build_chain(&items);
            let out = verify_and_settle(
                head,
                best,
                bounty,
                ClaimProgress::default(),
                &entries,
                FEE_DIVISOR,
                no_commitments,
            )
            .unwrap();
            let paid: u64 = out.credits.iter().map(|c| c.amount).sum();
            assert_eq!(paid + out.fees, total_bonds + bounty);
        }
    }
}
