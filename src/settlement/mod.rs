//! Settlement engine — sub-bet formation, exact stake splitting, pricing,
//! and win/refund/loss classification.

pub mod refund;

use std::cmp::Ordering;

use bigdecimal::BigDecimal;

use crate::types::{BetType, Odd, OddStatus, SettleError, SettleType, Settlement};
use refund::RefundCalculator;

// ---------------------------------------------------------------------------
// Selection seam
// ---------------------------------------------------------------------------

/// A resolved leg as the calculator sees it: a terminal status and a
/// decimal odds value. Any leg representation can settle through the
/// engine by implementing this.
pub trait Selection {
    fn status(&self) -> OddStatus;
    fn value(&self) -> &BigDecimal;
}

impl Selection for Odd {
    fn status(&self) -> OddStatus {
        self.status
    }

    fn value(&self) -> &BigDecimal {
        &self.ratio
    }
}

impl<S: Selection + ?Sized> Selection for &S {
    fn status(&self) -> OddStatus {
        (**self).status()
    }

    fn value(&self) -> &BigDecimal {
        (**self).value()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Settles resolved bets: computes the exact payout via the refund
/// calculator and classifies it against the stake.
///
/// The engine is a pure computation with no internal mutable state, so a
/// single instance is safe to share across concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    refund: RefundCalculator,
}

impl SettlementEngine {
    pub fn new(refund: RefundCalculator) -> Self {
        Self { refund }
    }

    /// Settle a resolved bet.
    ///
    /// The payout is quantized to six fractional digits; classification
    /// compares it to the stake: above ⇒ win, equal ⇒ refund, below ⇒
    /// loss. An arithmetic failure aborts the call; no partial payout is
    /// ever produced.
    pub fn settle<S: Selection>(
        &self,
        bet_type: BetType,
        sizes: &[usize],
        stake: &BigDecimal,
        legs: &[S],
    ) -> Result<Settlement, SettleError> {
        let amount = self.refund.calc(bet_type, sizes, stake, legs)?;

        let settle_type = match amount.cmp(stake) {
            Ordering::Greater => SettleType::Win,
            Ordering::Equal => SettleType::Refund,
            Ordering::Less => SettleType::Loss,
        };

        Ok(Settlement {
            amount,
            settle_type,
        })
    }

    /// Settle a bet as if every leg had resolved to `status`.
    ///
    /// Used for re-quoting flows that override the real resolution, e.g.
    /// pricing a cash-out offer before the legs have settled.
    pub fn settle_with_status(
        &self,
        bet_type: BetType,
        sizes: &[usize],
        stake: &BigDecimal,
        odds: &[Odd],
        status: OddStatus,
    ) -> Result<Settlement, SettleError> {
        let forced: Vec<Odd> = odds.iter().map(|odd| odd.with_status(status)).collect();
        self.settle(bet_type, sizes, stake, &forced)
    }

    /// Cash-out quote: the payout of the bet with every leg settled as a
    /// half win.
    pub fn cash_out_quote(
        &self,
        bet_type: BetType,
        sizes: &[usize],
        stake: &BigDecimal,
        odds: &[Odd],
    ) -> Result<BigDecimal, SettleError> {
        self.settle_with_status(bet_type, sizes, stake, odds, OddStatus::HalfWin)
            .map(|settlement| settlement.amount)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
