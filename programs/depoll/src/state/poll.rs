use anchor_lang::prelude::*;

use crate::{constants::*, state::cycles::*, ErrorCode};

/// Poll metadata as supplied by `create_poll`, `edit_poll` and
/// `overwrite_with_new_poll`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PollMetadata {
    pub avatar_url: String,
    pub title: String,
    pub about: String,
}

impl PollMetadata {
    pub fn new(avatar_url: String, title: String, about: String) -> Self {
        Self {
            avatar_url,
            title,
            about,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            self.avatar_url.len() <= MAX_AVATAR_URL_LEN,
            ErrorCode::FieldTooLong
        );
        require!(self.title.len() <= MAX_POLL_TITLE_LEN, ErrorCode::FieldTooLong);
        require!(self.about.len() <= MAX_ABOUT_LEN, ErrorCode::FieldTooLong);
        Ok(())
    }
}

/// Append-only proposal arena of a poll.
///
/// Proposals live in their own accounts addressed by `(poll, generation,
/// index)`. Overwriting a poll starts a new generation, which makes every
/// earlier proposal unreachable without deleting it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProposalLedger {
    pub generation: u32,
    pub count: u64,
}

impl ProposalLedger {
    /// Reserves the next index.
    pub fn append(&mut self) -> Result<u64> {
        let index = self.count;
        self.count = index.checked_add(1).ok_or_else(|| error!(ErrorCode::Overflow))?;
        Ok(index)
    }

    pub fn check_index(&self, index: u64) -> Result<()> {
        require!(index < self.count, ErrorCode::InvalidIndex);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.generation = self
            .generation
            .checked_add(1)
            .ok_or_else(|| error!(ErrorCode::Overflow))?;
        self.count = 0;
        Ok(())
    }
}

/// Index and cycle assigned to a newly submitted proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProposalSlot {
    pub generation: u32,
    pub index: u64,
    pub cycle: u64,
}

/// One poll per identity, stored at `["poll", owner]`.
///
/// The account is sized to its serialized contents and resized on every
/// write, so string fields only need their upper bounds checked.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Poll {
    /// PDA bump seed
    pub bump: u8,
    pub owner: Pubkey,
    /// False until the owner's first `create_poll`; never goes back to false.
    pub is_active: bool,
    pub avatar_url: String,
    pub title: String,
    pub about: String,
    pub ledger: ProposalLedger,
    pub cycles: CycleTracker,
}

impl Poll {
    pub fn create(&mut self, owner: Pubkey, bump: u8, metadata: PollMetadata) -> Result<()> {
        require!(!self.is_active, ErrorCode::PollAlreadyExists);
        metadata.validate()?;

        self.bump = bump;
        self.owner = owner;
        self.is_active = true;
        self.ledger = ProposalLedger {
            generation: self.ledger.generation,
            count: 0,
        };
        self.cycles = CycleTracker::default();
        self.apply(metadata);
        Ok(())
    }

    /// Replaces metadata only; proposals and cycles are untouched.
    pub fn edit(&mut self, caller: &Pubkey, metadata: PollMetadata) -> Result<()> {
        self.ensure_owner(caller)?;
        metadata.validate()?;

        self.apply(metadata);
        Ok(())
    }

    /// Replaces metadata and drops the whole proposal and cycle history.
    pub fn overwrite(&mut self, caller: &Pubkey, metadata: PollMetadata) -> Result<()> {
        self.ensure_owner(caller)?;
        metadata.validate()?;

        let mut ledger = self.ledger;
        ledger.reset()?;

        self.ledger = ledger;
        self.cycles.reset();
        self.apply(metadata);
        Ok(())
    }

    pub fn record_proposal(&mut self) -> Result<ProposalSlot> {
        self.ensure_active()?;

        let index = self.ledger.append()?;
        Ok(ProposalSlot {
            generation: self.ledger.generation,
            index,
            cycle: self.cycles.current_cycle,
        })
    }

    /// Closes the open cycle; returns the closed cycle's index.
    pub fn end_cycle(&mut self, caller: &Pubkey) -> Result<u64> {
        self.ensure_owner(caller)?;
        self.cycles.close(self.ledger.count)
    }

    pub fn proposal_count(&self) -> u64 {
        self.ledger.count
    }

    pub fn proposal_range(&self, cycle: u64) -> Result<ProposalRange> {
        self.ensure_active()?;
        self.cycles.range(cycle, self.ledger.count)
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(self.is_active, ErrorCode::PollNotFound);
        Ok(())
    }

    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        self.ensure_active()?;
        require_keys_eq!(self.owner, *caller, ErrorCode::Unauthorized);
        Ok(())
    }

    /// Reads a poll from an address that may not hold one yet.
    pub fn load_optional(info: &AccountInfo) -> Result<Option<Poll>> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return Ok(None);
        }
        let data = info.try_borrow_data()?;
        Poll::try_deserialize(&mut &data[..]).map(Some)
    }

    /// Reads a poll that must exist and be active.
    pub fn load_active(info: &AccountInfo) -> Result<Poll> {
        let poll = Self::load_optional(info)?.ok_or_else(|| error!(ErrorCode::PollNotFound))?;
        poll.ensure_active()?;
        Ok(poll)
    }

    fn apply(&mut self, metadata: PollMetadata) {
        self.avatar_url = metadata.avatar_url;
        self.title = metadata.title;
        self.about = metadata.about;
    }
}

/// Read-only snapshot returned by `get_poll`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PollView {
    pub owner: Pubkey,
    pub is_active: bool,
    pub avatar_url: String,
    pub title: String,
    pub about: String,
    pub proposal_count: u64,
    pub current_cycle: u64,
    pub cycle_boundaries: Vec<u64>,
}

impl PollView {
    /// Absent polls read as an inactive poll with empty metadata.
    pub fn lookup(owner: Pubkey, poll: Option<&Poll>) -> Self {
        match poll {
            Some(poll) if poll.is_active => Self::from(poll),
            _ => Self {
                owner,
                ..Self::default()
            },
        }
    }
}

impl From<&Poll> for PollView {
    fn from(poll: &Poll) -> Self {
        Self {
            owner: poll.owner,
            is_active: poll.is_active,
            avatar_url: poll.avatar_url.clone(),
            title: poll.title.clone(),
            about: poll.about.clone(),
            proposal_count: poll.ledger.count,
            current_cycle: poll.cycles.current_cycle,
            cycle_boundaries: poll.cycles.boundaries.clone(),
        }
    }
}
