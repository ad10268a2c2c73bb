// Stops Rust Analyzer complaining about missing configs
// See https://solana.stackexchange.com/questions/17777
#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod fees;
pub mod handlers;
pub mod state;
pub mod store;

use constants::*;
pub use error::ErrorCode;
pub use state::*;

declare_id!("4cXnzuc3Z9kzpPd1rzKNYGN43BhvCi1C9zCXPXtWw6nt");

#[program]
pub mod depoll {
    use super::*;

    pub fn initialize_registry(
        ctx: Context<InitializeRegistry>,
        count_polls: bool,
        charge_fees: bool,
    ) -> Result<()> {
        handlers::registry::initialize_registry(ctx, count_polls, charge_fees)
    }

    pub fn update_registry(
        ctx: Context<UpdateRegistry>,
        count_polls: bool,
        charge_fees: bool,
    ) -> Result<()> {
        handlers::registry::update_registry(ctx, count_polls, charge_fees)
    }

    pub fn withdraw_fees(ctx: Context<WithdrawFees>, amount: u64) -> Result<()> {
        handlers::registry::withdraw_fees(ctx, amount)
    }

    pub fn create_poll(
        ctx: Context<CreatePoll>,
        avatar_url: String,
        title: String,
        about: String,
    ) -> Result<()> {
        handlers::create_poll::create_poll(ctx, avatar_url, title, about)
    }

    pub fn edit_poll(
        ctx: Context<EditPoll>,
        avatar_url: String,
        title: String,
        about: String,
    ) -> Result<()> {
        handlers::edit_poll::edit_poll(ctx, avatar_url, title, about)
    }

    pub fn overwrite_with_new_poll(
        ctx: Context<OverwritePoll>,
        avatar_url: String,
        title: String,
        about: String,
    ) -> Result<()> {
        handlers::overwrite_poll::overwrite_with_new_poll(ctx, avatar_url, title, about)
    }

    pub fn propose(ctx: Context<Propose>, title: String, payment: u64) -> Result<()> {
        handlers::propose::propose(ctx, title, payment)
    }

    pub fn upvote(ctx: Context<CastVote>, index: u64, payment: u64) -> Result<()> {
        handlers::vote::upvote(ctx, index, payment)
    }

    pub fn downvote(ctx: Context<CastVote>, index: u64, payment: u64) -> Result<()> {
        handlers::vote::downvote(ctx, index, payment)
    }

    pub fn end_cycle(ctx: Context<EndCycle>) -> Result<()> {
        handlers::end_cycle::end_cycle(ctx)
    }

    pub fn get_poll(ctx: Context<ReadPoll>) -> Result<PollView> {
        handlers::queries::get_poll(ctx)
    }

    pub fn get_proposal_count(ctx: Context<ReadPoll>) -> Result<u64> {
        handlers::queries::get_proposal_count(ctx)
    }

    pub fn get_proposal(ctx: Context<ReadProposal>, index: u64) -> Result<ProposalView> {
        handlers::queries::get_proposal(ctx, index)
    }

    pub fn get_proposal_range(ctx: Context<ReadPoll>, cycle: u64) -> Result<ProposalRange> {
        handlers::queries::get_proposal_range(ctx, cycle)
    }

    pub fn total_polls(ctx: Context<ReadRegistry>) -> Result<u64> {
        handlers::queries::total_polls(ctx)
    }
}

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = DISCRIMINATOR_SIZE + Registry::INIT_SPACE,
        seeds = [REGISTRY_SEED],
        bump,
    )]
    pub registry: Account<'info, Registry>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateRegistry<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,
}

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,
}

#[derive(Accounts)]
pub struct CreatePoll<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,

    /// CHECK: may not exist yet; created and written by the handler
    #[account(
        mut,
        seeds = [POLL_SEED, owner.key().as_ref()],
        bump,
    )]
    pub poll_account: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct EditPoll<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: loaded with `Poll::load_active`
    #[account(
        mut,
        seeds = [POLL_SEED, owner.key().as_ref()],
        bump,
    )]
    pub poll_account: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct OverwritePoll<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: loaded with `Poll::load_active`
    #[account(
        mut,
        seeds = [POLL_SEED, owner.key().as_ref()],
        bump,
    )]
    pub poll_account: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Propose<'info> {
    #[account(mut)]
    pub proposer: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,

    /// CHECK: any identity; only its key is used, to derive the poll address
    pub poll_owner: UncheckedAccount<'info>,

    /// CHECK: loaded with `Poll::load_active`
    #[account(
        mut,
        seeds = [POLL_SEED, poll_owner.key().as_ref()],
        bump,
    )]
    pub poll_account: UncheckedAccount<'info>,

    /// CHECK: must be the next proposal address of the poll's current
    /// generation; checked and created by the handler
    #[account(mut)]
    pub proposal_account: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CastVote<'info> {
    #[account(mut)]
    pub voter: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,

    /// CHECK: any identity; only its key is used, to derive the poll address
    pub poll_owner: UncheckedAccount<'info>,

    /// CHECK: loaded with `Poll::load_active`
    #[account(
        seeds = [POLL_SEED, poll_owner.key().as_ref()],
        bump,
    )]
    pub poll_account: UncheckedAccount<'info>,

    /// CHECK: address is checked against the poll's current generation in the handler
    #[account(mut)]
    pub proposal_account: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct EndCycle<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    /// CHECK: any identity; only its key is used, to derive the poll address
    pub poll_owner: UncheckedAccount<'info>,

    /// CHECK: loaded with `Poll::load_active`; the caller is compared with the
    /// stored owner in the handler
    #[account(
        mut,
        seeds = [POLL_SEED, poll_owner.key().as_ref()],
        bump,
    )]
    pub poll_account: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ReadPoll<'info> {
    /// CHECK: any identity; only its key is used, to derive the poll address
    pub poll_owner: UncheckedAccount<'info>,

    /// CHECK: may not hold a poll yet; read through `Poll::load_optional`
    #[account(
        seeds = [POLL_SEED, poll_owner.key().as_ref()],
        bump,
    )]
    pub poll_account: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadProposal<'info> {
    /// CHECK: any identity; only its key is used, to derive the poll address
    pub poll_owner: UncheckedAccount<'info>,

    /// CHECK: may not hold a poll yet; read through `Poll::load_optional`
    #[account(
        seeds = [POLL_SEED, poll_owner.key().as_ref()],
        bump,
    )]
    pub poll_account: UncheckedAccount<'info>,

    /// CHECK: address is checked against the poll's current generation in the handler
    pub proposal_account: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadRegistry<'info> {
    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,
}
