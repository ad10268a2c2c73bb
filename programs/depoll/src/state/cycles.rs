use anchor_lang::prelude::*;

use crate::ErrorCode;

/// Half-open `[start, end)` interval of proposal indices.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProposalRange {
    pub start: u64,
    pub end: u64,
}

impl ProposalRange {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Owner-delimited partition of a poll's proposal history.
///
/// `boundaries[i]` is the proposal count snapshot taken when cycle `i` was
/// closed, so `boundaries.len() == current_cycle` at all times.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleTracker {
    pub current_cycle: u64,
    pub boundaries: Vec<u64>,
}

impl CycleTracker {
    /// Closes the open cycle at `proposal_count` and returns the index of the
    /// cycle that was closed.
    pub fn close(&mut self, proposal_count: u64) -> Result<u64> {
        if let Some(&last) = self.boundaries.last() {
            require!(proposal_count >= last, ErrorCode::InvalidCycle);
        }
        let closed = self.current_cycle;
        let next = closed.checked_add(1).ok_or_else(|| error!(ErrorCode::Overflow))?;

        self.boundaries.push(proposal_count);
        self.current_cycle = next;
        Ok(closed)
    }

    /// Range of proposals created while `cycle` was open. The open cycle ends
    /// at the live proposal count.
    pub fn range(&self, cycle: u64, proposal_count: u64) -> Result<ProposalRange> {
        require!(cycle <= self.current_cycle, ErrorCode::InvalidCycle);

        let start = match cycle.checked_sub(1) {
            Some(previous) => self.boundary(previous)?,
            None => 0,
        };
        let end = if cycle == self.current_cycle {
            proposal_count
        } else {
            self.boundary(cycle)?
        };

        Ok(ProposalRange { start, end })
    }

    pub fn reset(&mut self) {
        self.current_cycle = 0;
        self.boundaries.clear();
    }

    fn boundary(&self, cycle: u64) -> Result<u64> {
        usize::try_from(cycle)
            .ok()
            .and_then(|i| self.boundaries.get(i))
            .copied()
            .ok_or_else(|| error!(ErrorCode::InvalidCycle))
    }
}
