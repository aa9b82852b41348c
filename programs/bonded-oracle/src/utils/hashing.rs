use anchor_lang::prelude::*;
use solana_keccak_hasher as keccak;

pub const NULL_HASH: [u8; 32] = [0u8; 32];

/// Reserved answer meaning "no determinable answer exists yet".
/// A question finalized to this value pays no bounty and may be reopened.
pub const ANSWERED_TOO_SOON: [u8; 32] = {
    let mut v = [0xffu8; 32];
    v[31] = 0xfe;
    v
};

/// One year, the upper cap on a question challenge window.
pub const MAX_TIMEOUT: u32 = 365 * 24 * 60 * 60;

/// Commitments must be revealed within timeout / COMMITMENT_TIMEOUT_RATIO.
pub const COMMITMENT_TIMEOUT_RATIO: u32 = 8;

pub fn content_hash(template_id: u64, opening_ts: i64, question: &str) -> [u8; 32] {
    keccak::hashv(&[
        &template_id.to_be_bytes(),
        &opening_ts.to_be_bytes(),
        question.as_bytes(),
    ])
    .0
}

/// The externally visible question identity. Binds the content to its
/// arbitration and bonding parameters, the program, the asker and a nonce,
/// so the same text can be re-asked under a fresh identity.
pub fn question_id(
    content_hash: &[u8; 32],
    arbitrator: &Pubkey,
    timeout: u32,
    min_bond: u64,
    program: &Pubkey,
    asker: &Pubkey,
    nonce: u64,
) -> [u8; 32] {
    keccak::hashv(&[
        content_hash,
        arbitrator.as_ref(),
        &timeout.to_be_bytes(),
        &min_bond.to_be_bytes(),
        program.as_ref(),
        asker.as_ref(),
        &nonce.to_be_bytes(),
    ])
    .0
}

/// Rolls one HistoryLink into the chain head.
pub fn history_hash(
    previous: &[u8; 32],
    answer_or_commitment_id: &[u8; 32],
    bond: u64,
    answerer: &Pubkey,
    is_commitment: bool,
) -> [u8; 32] {
    keccak::hashv(&[
        previous,
        answer_or_commitment_id,
        &bond.to_be_bytes(),
        answerer.as_ref(),
        &[is_commitment as u8],
    ])
    .0
}

pub fn answer_hash(answer: &[u8; 32], nonce: u64) -> [u8; 32] {
    keccak::hashv(&[answer, &nonce.to_be_bytes()]).0
}

pub fn commitment_id(question_id: &[u8; 32], answer_hash: &[u8; 32], bond: u64) -> [u8; 32] {
    keccak::hashv(&[question_id, answer_hash, &bond.to_be_bytes()]).0
}
