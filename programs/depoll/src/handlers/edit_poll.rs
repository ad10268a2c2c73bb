use anchor_lang::prelude::*;

use crate::{
    state::{Poll, PollEdited, PollMetadata},
    store::store,
    EditPoll,
};

/// Replaces the caller's poll metadata in place. Proposals and cycles are kept.
pub fn edit_poll(
    ctx: Context<EditPoll>,
    avatar_url: String,
    title: String,
    about: String,
) -> Result<()> {
    msg!("Editing poll");

    let owner = ctx.accounts.owner.key();
    let poll_info = ctx.accounts.poll_account.to_account_info();
    let mut poll = Poll::load_active(&poll_info)?;
    poll.edit(&owner, PollMetadata::new(avatar_url, title, about))?;

    store(
        &poll_info,
        &poll,
        &ctx.accounts.owner.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
    )?;

    emit!(PollEdited {
        owner,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
