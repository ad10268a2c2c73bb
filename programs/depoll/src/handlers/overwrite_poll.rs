use anchor_lang::prelude::*;

use crate::{
    state::{Poll, PollMetadata, PollOverwritten},
    store::store,
    OverwritePoll,
};

/// Replaces the caller's poll with a fresh one: new metadata, no proposals,
/// cycle 0. `total_polls` is not affected.
pub fn overwrite_with_new_poll(
    ctx: Context<OverwritePoll>,
    avatar_url: String,
    title: String,
    about: String,
) -> Result<()> {
    msg!("Overwriting poll with a new one");

    let owner = ctx.accounts.owner.key();
    let poll_info = ctx.accounts.poll_account.to_account_info();
    let mut poll = Poll::load_active(&poll_info)?;
    poll.overwrite(&owner, PollMetadata::new(avatar_url, title, about))?;

    // Dropped cycle boundaries shrink the account; the freed rent goes back
    // to the owner.
    store(
        &poll_info,
        &poll,
        &ctx.accounts.owner.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
    )?;

    emit!(PollOverwritten {
        owner,
        generation: poll.ledger.generation,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
