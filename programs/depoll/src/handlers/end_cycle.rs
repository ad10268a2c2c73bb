use anchor_lang::prelude::*;

use crate::{
    state::{CycleEnded, Poll},
    store::store,
    EndCycle,
};

/// Closes the poll's open cycle at the current proposal count and opens the
/// next one. Only the poll owner may call this. Closing a cycle with no new
/// proposals is allowed and yields an empty range.
pub fn end_cycle(ctx: Context<EndCycle>) -> Result<()> {
    msg!("Ending the current cycle");

    let caller = ctx.accounts.caller.key();
    let poll_info = ctx.accounts.poll_account.to_account_info();
    let mut poll = Poll::load_active(&poll_info)?;
    let closed_cycle = poll.end_cycle(&caller)?;

    let closed = poll.proposal_range(closed_cycle)?;
    if closed.is_empty() {
        msg!("Cycle {} closed without proposals", closed_cycle);
    } else {
        msg!("Cycle {} closed with {} proposals", closed_cycle, closed.len());
    }

    store(
        &poll_info,
        &poll,
        &ctx.accounts.caller.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
    )?;

    emit!(CycleEnded {
        owner: poll.owner,
        closed_cycle,
        boundary: closed.end,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
