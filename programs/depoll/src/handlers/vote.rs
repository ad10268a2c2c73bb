use anchor_lang::prelude::*;

use crate::{
    fees::collect_payment,
    state::{Poll, Proposal, VoteCast, VoteDirection},
    store::store,
    CastVote, ErrorCode,
};

/// Upvotes proposal `index`; costs exactly `UPVOTE_COST` when fees are on.
pub fn upvote(ctx: Context<CastVote>, index: u64, payment: u64) -> Result<()> {
    cast_vote(ctx, index, payment, VoteDirection::Up)
}

/// Downvotes proposal `index`; costs exactly `DOWNVOTE_COST` when fees are on.
pub fn downvote(ctx: Context<CastVote>, index: u64, payment: u64) -> Result<()> {
    cast_vote(ctx, index, payment, VoteDirection::Down)
}

// Votes are not deduplicated: every paid call appends the caller once more.
fn cast_vote(
    ctx: Context<CastVote>,
    index: u64,
    payment: u64,
    direction: VoteDirection,
) -> Result<()> {
    msg!("Casting {:?} vote on proposal {}", direction, index);

    let payment = ctx
        .accounts
        .registry
        .payment_gate()
        .check(direction.fee_kind(), payment)?;

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

    let proposal_info = ctx.accounts.proposal_account.to_account_info();
    let mut proposal =
        Proposal::load_optional(&proposal_info)?.ok_or_else(|| error!(ErrorCode::InvalidIndex))?;

    let voter = ctx.accounts.voter.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    proposal.record_vote(voter.key(), direction);
    store(&proposal_info, &proposal, &voter, &system_program)?;

    collect_payment(
        &voter,
        &ctx.accounts.registry.to_account_info(),
        &system_program,
        payment,
    )?;

    emit!(VoteCast {
        poll_owner: poll.owner,
        voter: voter.key(),
        index,
        direction,
        payment,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
