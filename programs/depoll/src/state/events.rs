use anchor_lang::prelude::*;

use crate::state::VoteDirection;

#[event]
pub struct RegistryInitialized {
    pub authority: Pubkey,
    pub count_polls: bool,
    pub charge_fees: bool,
    pub timestamp: i64,
}

#[event]
pub struct RegistryUpdated {
    pub count_polls: bool,
    pub charge_fees: bool,
    pub timestamp: i64,
}

#[event]
pub struct FeesWithdrawn {
    pub authority: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct PollCreated {
    pub owner: Pubkey,
    /// Counter value after this creation (0 when counting is disabled)
    pub total_polls: u64,
    pub timestamp: i64,
}

#[event]
pub struct PollEdited {
    pub owner: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PollOverwritten {
    pub owner: Pubkey,
    /// Proposal generation now in use
    pub generation: u32,
    pub timestamp: i64,
}

#[event]
pub struct ProposalSubmitted {
    pub poll_owner: Pubkey,
    pub proposer: Pubkey,
    pub index: u64,
    pub cycle: u64,
    pub payment: u64,
    pub timestamp: i64,
}

#[event]
pub struct VoteCast {
    pub poll_owner: Pubkey,
    pub voter: Pubkey,
    pub index: u64,
    pub direction: VoteDirection,
    pub payment: u64,
    pub timestamp: i64,
}

#[event]
pub struct CycleEnded {
    pub owner: Pubkey,
    pub closed_cycle: u64,
    /// Proposal count at closing time
    pub boundary: u64,
    pub timestamp: i64,
}
