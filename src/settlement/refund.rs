//! Refund calculation.
//!
//! Prices a resolved bet under the fixed decimal context. Single and
//! express bets are one combination priced at the full stake; a system
//! bet is the sum of its sub-bets, each priced at its share of an exact
//! stake split.

use bigdecimal::{BigDecimal, One, Zero};
use tracing::debug;

use super::Selection;
use crate::combinations::sub_bets;
use crate::decimal::{DecimalContext, DecimalError};
use crate::types::{BetType, OddStatus};

/// Fractional digits in an externally visible payout.
pub const PAYOUT_SCALE: i64 = 6;

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RefundCalculator {
    ctx: DecimalContext,
}

impl RefundCalculator {
    pub fn new(ctx: DecimalContext) -> Self {
        Self { ctx }
    }

    /// The decimal context every operation runs under.
    pub fn ctx(&self) -> &DecimalContext {
        &self.ctx
    }

    /// Raw refund quantized to [`PAYOUT_SCALE`] fractional digits.
    pub fn calc<S: Selection>(
        &self,
        bet_type: BetType,
        sizes: &[usize],
        stake: &BigDecimal,
        legs: &[S],
    ) -> Result<BigDecimal, DecimalError> {
        let refund = self.calc_refund(bet_type, sizes, stake, legs)?;
        Ok(self.ctx.quantize(&refund, PAYOUT_SCALE))
    }

    /// Unquantized refund amount.
    pub fn calc_refund<S: Selection>(
        &self,
        bet_type: BetType,
        sizes: &[usize],
        stake: &BigDecimal,
        legs: &[S],
    ) -> Result<BigDecimal, DecimalError> {
        if bet_type != BetType::System {
            return self.price_combination(stake, legs);
        }

        self.calc_system(sizes, stake, legs)
    }

    fn calc_system<S: Selection>(
        &self,
        sizes: &[usize],
        stake: &BigDecimal,
        legs: &[S],
    ) -> Result<BigDecimal, DecimalError> {
        if legs.is_empty() {
            return Ok(BigDecimal::zero());
        }

        let combinations = sub_bets(legs, sizes);
        if combinations.is_empty() {
            debug!(?sizes, legs = legs.len(), "system bet formed no sub-bets");
            return Ok(BigDecimal::zero());
        }

        let stakes = self.split_stake(stake, combinations.len())?;

        let mut refund = BigDecimal::zero();
        for (combination, sub_stake) in combinations.iter().zip(&stakes) {
            let sub_refund = self.price_combination(sub_stake, combination)?;
            refund = self.ctx.add(&refund, &sub_refund);
        }

        Ok(refund)
    }

    /// Split `stake` across `count` sub-bets without losing a unit.
    ///
    /// Dividing 1 across 3 sub-bets at fixed precision gives 0.333333…
    /// each and leaks the indivisible tail. Every sub-bet gets the
    /// truncated share; the remainder goes to the last sub-bet, so the
    /// sub-stakes always sum to the exact stake.
    fn split_stake(
        &self,
        stake: &BigDecimal,
        count: usize,
    ) -> Result<Vec<BigDecimal>, DecimalError> {
        let count_dec = BigDecimal::from(count as u64);

        let per = self.ctx.div(stake, &count_dec)?;
        let allotted = self.ctx.mul(&per, &count_dec);
        let remainder = self.ctx.sub(stake, &allotted);

        debug!(
            sub_bets = count,
            per = %per,
            remainder = %remainder,
            "system stake split"
        );

        let mut stakes = vec![per.clone(); count];
        if let Some(last) = stakes.last_mut() {
            *last = self.ctx.add(&per, &remainder);
        }

        Ok(stakes)
    }

    /// Price one combination of legs against its sub-stake.
    ///
    /// The multiplier starts at 1 and folds the legs in order. A lost leg
    /// voids the combination immediately, stake included. A not-resulted,
    /// cancelled or manually refunded leg zeroes the winnings but leg
    /// processing continues, so a later loss still short-circuits.
    fn price_combination<S: Selection>(
        &self,
        sub_stake: &BigDecimal,
        legs: &[S],
    ) -> Result<BigDecimal, DecimalError> {
        let mut multiplier = BigDecimal::one();
        let two = BigDecimal::from(2);

        for leg in legs {
            match leg.status() {
                OddStatus::Loss => return Ok(BigDecimal::zero()),
                OddStatus::Win => {
                    multiplier = self.ctx.mul(&multiplier, leg.value());
                }
                OddStatus::HalfWin => {
                    let half = self.ctx.div(leg.value(), &two)?;
                    multiplier = self.ctx.mul(&multiplier, &half);
                }
                OddStatus::HalfLoss => {
                    multiplier = self.ctx.div(&multiplier, &two)?;
                }
                OddStatus::Refunded => {}
                OddStatus::NotResulted | OddStatus::Cancelled | OddStatus::RefundedManually => {
                    multiplier = BigDecimal::zero();
                }
            }
        }

        Ok(self.ctx.mul(&multiplier, sub_stake))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
