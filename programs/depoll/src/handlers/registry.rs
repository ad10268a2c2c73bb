use anchor_lang::prelude::*;

use crate::{
    state::{FeesWithdrawn, RegistryInitialized, RegistryUpdated},
    ErrorCode, InitializeRegistry, UpdateRegistry, WithdrawFees,
};

/// One-off setup of the program-wide registry.
///
/// # Arguments
/// * `count_polls` - Whether first-time poll creations increment `total_polls`
/// * `charge_fees` - Whether proposals and votes require the scheduled payment
pub fn initialize_registry(
    ctx: Context<InitializeRegistry>,
    count_polls: bool,
    charge_fees: bool,
) -> Result<()> {
    msg!(
        "Initializing registry: count_polls={}, charge_fees={}",
        count_polls,
        charge_fees
    );

    let authority = ctx.accounts.authority.key();
    ctx.accounts
        .registry
        .initialize(authority, ctx.bumps.registry, count_polls, charge_fees);

    emit!(RegistryInitialized {
        authority,
        count_polls,
        charge_fees,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn update_registry(
    ctx: Context<UpdateRegistry>,
    count_polls: bool,
    charge_fees: bool,
) -> Result<()> {
    msg!(
        "Updating registry: count_polls={}, charge_fees={}",
        count_polls,
        charge_fees
    );

    ctx.accounts
        .registry
        .configure(&ctx.accounts.authority.key(), count_polls, charge_fees)?;

    emit!(RegistryUpdated {
        count_polls,
        charge_fees,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

/// Pays collected fees out to the registry authority. The vault never drops
/// below its rent-exempt minimum.
pub fn withdraw_fees(ctx: Context<WithdrawFees>, amount: u64) -> Result<()> {
    msg!("Withdrawing {} lamports of fees", amount);

    let authority = ctx.accounts.authority.key();
    ctx.accounts.registry.ensure_authority(&authority)?;

    let vault = ctx.accounts.registry.to_account_info();
    let rent_floor = Rent::get()?.minimum_balance(vault.data_len());
    let available = vault.lamports().saturating_sub(rent_floor);
    require!(amount <= available, ErrorCode::InsufficientVaultBalance);

    ctx.accounts.registry.sub_lamports(amount)?;
    ctx.accounts.authority.add_lamports(amount)?;

    emit!(FeesWithdrawn {
        authority,
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
