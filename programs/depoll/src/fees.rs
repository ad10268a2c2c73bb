use anchor_lang::prelude::*;

use crate::{constants::*, store, ErrorCode};

/// Operations that carry an attached payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeKind {
    Propose,
    Upvote,
    Downvote,
}

/// Flat fee schedule, in lamports.
pub struct FeeSchedule;

impl FeeSchedule {
    pub fn cost(kind: FeeKind) -> u64 {
        match kind {
            FeeKind::Propose => PROPOSE_COST,
            FeeKind::Upvote => UPVOTE_COST,
            FeeKind::Downvote => DOWNVOTE_COST,
        }
    }
}

/// Exact-payment validation.
///
/// With fees enabled the attached amount must equal the scheduled cost; an
/// overpayment is rejected just like an underpayment. With fees disabled the
/// only accepted amount is zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentGate {
    pub charge_fees: bool,
}

impl PaymentGate {
    pub fn new(charge_fees: bool) -> Self {
        Self { charge_fees }
    }

    pub fn required(&self, kind: FeeKind) -> u64 {
        if self.charge_fees {
            FeeSchedule::cost(kind)
        } else {
            0
        }
    }

    pub fn check(&self, kind: FeeKind, payment: u64) -> Result<u64> {
        require!(payment == self.required(kind), ErrorCode::InvalidPayment);
        Ok(payment)
    }
}

/// Moves a validated payment from the caller into the registry vault.
pub fn collect_payment<'info>(
    payer: &AccountInfo<'info>,
    vault: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    store::transfer(payer, vault, system_program, amount)
}
