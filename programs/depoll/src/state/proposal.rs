use anchor_lang::prelude::*;

use crate::{constants::*, fees::FeeKind, state::poll::ProposalSlot, ErrorCode};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn fee_kind(self) -> FeeKind {
        match self {
            VoteDirection::Up => FeeKind::Upvote,
            VoteDirection::Down => FeeKind::Downvote,
        }
    }
}

/// A proposal submitted against a poll, stored at
/// `["proposal", poll, generation, index]`.
///
/// Votes are appended as-is: the same identity may vote any number of times
/// in either direction, each vote paid for separately.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Proposal {
    pub bump: u8,
    pub poll: Pubkey,
    pub generation: u32,
    pub index: u64,
    /// Cycle that was open when the proposal was submitted.
    pub cycle: u64,
    pub created_by: Pubkey,
    pub title: String,
    pub upvotes: Vec<Pubkey>,
    pub downvotes: Vec<Pubkey>,
}

impl Proposal {
    pub fn address(poll: &Pubkey, generation: u32, index: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                PROPOSAL_SEED,
                poll.as_ref(),
                generation.to_le_bytes().as_ref(),
                index.to_le_bytes().as_ref(),
            ],
            &crate::ID,
        )
    }

    pub fn validate_title(title: &str) -> Result<()> {
        require!(title.len() <= MAX_PROPOSAL_TITLE_LEN, ErrorCode::FieldTooLong);
        Ok(())
    }

    pub fn initialize(
        &mut self,
        poll: Pubkey,
        slot: ProposalSlot,
        created_by: Pubkey,
        title: String,
        bump: u8,
    ) {
        self.bump = bump;
        self.poll = poll;
        self.generation = slot.generation;
        self.index = slot.index;
        self.cycle = slot.cycle;
        self.created_by = created_by;
        self.title = title;
        self.upvotes = Vec::new();
        self.downvotes = Vec::new();
    }

    pub fn record_vote(&mut self, voter: Pubkey, direction: VoteDirection) {
        match direction {
            VoteDirection::Up => self.upvotes.push(voter),
            VoteDirection::Down => self.downvotes.push(voter),
        }
    }

    /// Reads a proposal from an address that may not hold one.
    pub fn load_optional(info: &AccountInfo) -> Result<Option<Proposal>> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return Ok(None);
        }
        let data = info.try_borrow_data()?;
        Proposal::try_deserialize(&mut &data[..]).map(Some)
    }
}

/// Read-only snapshot returned by `get_proposal`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProposalView {
    pub index: u64,
    pub title: String,
    pub created_by: Pubkey,
    pub cycle: u64,
    pub upvotes: Vec<Pubkey>,
    pub downvotes: Vec<Pubkey>,
}

impl From<&Proposal> for ProposalView {
    fn from(proposal: &Proposal) -> Self {
        Self {
            index: proposal.index,
            title: proposal.title.clone(),
            created_by: proposal.created_by,
            cycle: proposal.cycle,
            upvotes: proposal.upvotes.clone(),
            downvotes: proposal.downvotes.clone(),
        }
    }
}
