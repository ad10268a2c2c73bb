use anchor_lang::prelude::*;

use crate::{fees::PaymentGate, ErrorCode};

/// Program-wide settings, the `total_polls` counter, and the vault that
/// receives every fee. Singleton at `["registry"]`.
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    pub bump: u8,
    /// May change settings and withdraw collected fees.
    pub authority: Pubkey,
    /// When false, `total_polls` is never incremented.
    pub count_polls: bool,
    /// When false, every operation must attach a zero payment.
    pub charge_fees: bool,
    pub total_polls: u64,
}

impl Registry {
    pub fn initialize(&mut self, authority: Pubkey, bump: u8, count_polls: bool, charge_fees: bool) {
        self.bump = bump;
        self.authority = authority;
        self.count_polls = count_polls;
        self.charge_fees = charge_fees;
        self.total_polls = 0;
    }

    pub fn configure(&mut self, caller: &Pubkey, count_polls: bool, charge_fees: bool) -> Result<()> {
        self.ensure_authority(caller)?;
        self.count_polls = count_polls;
        self.charge_fees = charge_fees;
        Ok(())
    }

    /// Counts a first-time poll creation.
    pub fn record_new_poll(&mut self) -> Result<()> {
        if self.count_polls {
            self.total_polls = self
                .total_polls
                .checked_add(1)
                .ok_or_else(|| error!(ErrorCode::Overflow))?;
        }
        Ok(())
    }

    pub fn payment_gate(&self) -> PaymentGate {
        PaymentGate::new(self.charge_fees)
    }

    pub fn ensure_authority(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.authority, *caller, ErrorCode::Unauthorized);
        Ok(())
    }
}
