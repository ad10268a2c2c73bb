use anchor_lang::prelude::*;

use crate::{
    constants::POLL_SEED,
    state::{Poll, PollCreated, PollMetadata},
    store::store_new,
    CreatePoll,
};

/// Creates the caller's poll.
///
/// Each identity owns at most one poll; calling this again while the poll is
/// active fails with `PollAlreadyExists`. Use `overwrite_with_new_poll` to
/// start over.
///
/// # Arguments
/// * `avatar_url` - Image shown next to the poll
/// * `title` - Poll headline
/// * `about` - Free-form description
pub fn create_poll(
    ctx: Context<CreatePoll>,
    avatar_url: String,
    title: String,
    about: String,
) -> Result<()> {
    msg!("Creating a new poll");

    let owner = ctx.accounts.owner.key();
    let bump = ctx.bumps.poll_account;
    let metadata = PollMetadata::new(avatar_url, title, about);

    let poll_info = ctx.accounts.poll_account.to_account_info();
    let mut poll = Poll::load_optional(&poll_info)?.unwrap_or_default();
    poll.create(owner, bump, metadata)?;

    store_new(
        &poll_info,
        &poll,
        &ctx.accounts.owner.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        &[POLL_SEED, owner.as_ref(), &[bump]],
    )?;
    ctx.accounts.registry.record_new_poll()?;

    emit!(PollCreated {
        owner,
        total_polls: ctx.accounts.registry.total_polls,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
