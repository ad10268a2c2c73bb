use anchor_lang::prelude::*;

use crate::{
    state::{Poll, PollView, Proposal, ProposalRange, ProposalView},
    ErrorCode, ReadPoll, ReadProposal, ReadRegistry,
};

// Read-only instructions. Results are delivered through return data, so they
// can be simulated without sending a transaction.

pub fn get_poll(ctx: Context<ReadPoll>) -> Result<PollView> {
    let poll = Poll::load_optional(&ctx.accounts.poll_account)?;
    Ok(PollView::lookup(ctx.accounts.poll_owner.key(), poll.as_ref()))
}

/// Total proposals across all cycles; 0 for an absent poll.
pub fn get_proposal_count(ctx: Context<ReadPoll>) -> Result<u64> {
    let poll = Poll::load_optional(&ctx.accounts.poll_account)?;
    Ok(poll.map_or(0, |poll| poll.proposal_count()))
}

pub fn get_proposal_range(ctx: Context<ReadPoll>, cycle: u64) -> Result<ProposalRange> {
    Poll::load_active(&ctx.accounts.poll_account)?.proposal_range(cycle)
}

pub fn get_proposal(ctx: Context<ReadProposal>, index: u64) -> Result<ProposalView> {
    let poll = Poll::load_active(&ctx.accounts.poll_account)?;
    poll.ledger.check_index(index)?;

    let (expected, _) = Proposal::address(
        &ctx.accounts.poll_account.key(),
        poll.ledger.generation,
        index,
    );
    require_keys_eq!(
        ctx.accounts.proposal_account.key(),
        expected,
        anchor_lang::error::ErrorCode::ConstraintSeeds
    );

    let proposal = Proposal::load_optional(&ctx.accounts.proposal_account)?
        .ok_or_else(|| error!(ErrorCode::InvalidIndex))?;
    Ok(ProposalView::from(&proposal))
}

pub fn total_polls(ctx: Context<ReadRegistry>) -> Result<u64> {
    Ok(ctx.accounts.registry.total_polls)
}
