use anchor_lang::prelude::*;

use crate::{
    constants::PROPOSAL_SEED,
    fees::{collect_payment, FeeKind},
    state::{Poll, Proposal, ProposalSubmitted},
    store::{store, store_new},
    Propose,
};

/// Appends a proposal to someone's poll.
///
/// The proposal is tagged with the poll's open cycle. With fees enabled the
/// caller must attach exactly `PROPOSE_COST` lamports, which go to the
/// registry vault.
///
/// # Arguments
/// * `title` - Proposal text
/// * `payment` - Attached lamports
pub fn propose(ctx: Context<Propose>, title: String, payment: u64) -> Result<()> {
    msg!(
        "Submitting a proposal to the poll of {}",
        ctx.accounts.poll_owner.key()
    );

    Proposal::validate_title(&title)?;
    let payment = ctx
        .accounts
        .registry
        .payment_gate()
        .check(FeeKind::Propose, payment)?;

    let poll_info = ctx.accounts.poll_account.to_account_info();
    let mut poll = Poll::load_active(&poll_info)?;
    let slot = poll.record_proposal()?;

    let (expected, bump) = Proposal::address(poll_info.key, slot.generation, slot.index);
    require_keys_eq!(
        ctx.accounts.proposal_account.key(),
        expected,
        anchor_lang::error::ErrorCode::ConstraintSeeds
    );

    let proposer = ctx.accounts.proposer.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();

    let mut proposal = Proposal::default();
    proposal.initialize(*poll_info.key, slot, proposer.key(), title, bump);
    store_new(
        &ctx.accounts.proposal_account.to_account_info(),
        &proposal,
        &proposer,
        &system_program,
        &[
            PROPOSAL_SEED,
            poll_info.key.as_ref(),
            slot.generation.to_le_bytes().as_ref(),
            slot.index.to_le_bytes().as_ref(),
            &[bump],
        ],
    )?;
    store(&poll_info, &poll, &proposer, &system_program)?;

    collect_payment(
        &proposer,
        &ctx.accounts.registry.to_account_info(),
        &system_program,
        payment,
    )?;

    emit!(ProposalSubmitted {
        poll_owner: poll.owner,
        proposer: proposer.key(),
        index: slot.index,
        cycle: slot.cycle,
        payment,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
