//! Fixed-context decimal arithmetic.
//!
//! Every step of a settlement calculation runs under a single decimal
//! context: a precision in significant digits and a rounding mode. The
//! default context (100 digits, round toward zero) reproduces the
//! bookmaker's payout amounts exactly on every platform, with no binary
//! floating-point error anywhere in the pipeline.

use std::num::NonZeroU64;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use num_bigint::BigInt;

/// Significant digits carried by the default context.
const DEFAULT_PRECISION: NonZeroU64 = match NonZeroU64::new(100) {
    Some(p) => p,
    None => unreachable!(),
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Arithmetic failure inside the decimal context.
///
/// Under arbitrary precision the invalid-operation class collapses to a
/// zero divisor; addition, multiplication and quantization always have a
/// representable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    #[error("division by zero")]
    DivisionByZero,
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// A decimal computation context: precision plus rounding mode.
///
/// The context is a plain value bound to each calculator instance; there
/// is no process-global numeric state, so two calculators with different
/// contexts can run side by side.
#[derive(Debug, Clone, Copy)]
pub struct DecimalContext {
    precision: NonZeroU64,
    rounding: RoundingMode,
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            rounding: RoundingMode::Down,
        }
    }
}

impl DecimalContext {
    pub fn new(precision: NonZeroU64, rounding: RoundingMode) -> Self {
        Self {
            precision,
            rounding,
        }
    }

    /// Significant digits kept by every operation in this context.
    pub fn precision(&self) -> u64 {
        self.precision.get()
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Exact sum, rounded to the context precision.
    pub fn add(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.round(lhs + rhs)
    }

    /// Exact difference, rounded to the context precision.
    pub fn sub(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.round(lhs - rhs)
    }

    /// Exact product, rounded to the context precision.
    pub fn mul(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.round(lhs * rhs)
    }

    /// Quotient carrying exactly the context precision.
    ///
    /// The numerator is rescaled so the integer quotient holds at least
    /// `precision` significant digits; integer division truncates toward
    /// zero, matching the context's `Down` rounding digit for digit.
    pub fn div(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, DecimalError> {
        if rhs.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        if lhs.is_zero() {
            return Ok(BigDecimal::zero());
        }

        let (num, num_scale) = lhs.as_bigint_and_exponent();
        let (den, den_scale) = rhs.as_bigint_and_exponent();

        let num_digits = BigDecimal::new(num.clone(), 0).digits() as i64;
        let den_digits = BigDecimal::new(den.clone(), 0).digits() as i64;
        let shift = (self.precision.get() as i64 - (num_digits - den_digits) + 1).max(0);

        let quotient = num * BigInt::from(10).pow(shift as u32) / den;

        Ok(self.round(BigDecimal::new(quotient, num_scale - den_scale + shift)))
    }

    /// Fix the number of fractional digits, rounding with the context mode.
    pub fn quantize(&self, value: &BigDecimal, fractional_digits: i64) -> BigDecimal {
        value.with_scale_round(fractional_digits, self.rounding)
    }

    fn round(&self, value: BigDecimal) -> BigDecimal {
        value.with_precision_round(self.precision, self.rounding)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
