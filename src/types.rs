//! Shared types for the settlement engine.
//!
//! The data model mirrors the callback protocol's wire format: the enum
//! types travel as small integer codes, decimal amounts as exact decimal
//! strings. Legs are immutable inputs; the engine never mutates or
//! retains them.

use std::fmt;

use bigdecimal::BigDecimal;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::decimal::DecimalError;

// ---------------------------------------------------------------------------
// Odd status
// ---------------------------------------------------------------------------

/// Terminal resolution status of a single leg.
///
/// Determines the per-leg pricing rule during settlement. Serialized as
/// the protocol's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OddStatus {
    NotResulted,
    Win,
    Loss,
    HalfWin,
    HalfLoss,
    Refunded,
    Cancelled,
    RefundedManually,
}

impl OddStatus {
    /// All known statuses (useful for iteration).
    pub const ALL: &'static [OddStatus] = &[
        OddStatus::NotResulted,
        OddStatus::Win,
        OddStatus::Loss,
        OddStatus::HalfWin,
        OddStatus::HalfLoss,
        OddStatus::Refunded,
        OddStatus::Cancelled,
        OddStatus::RefundedManually,
    ];

    /// The protocol's integer code for this status.
    pub fn code(&self) -> u8 {
        match self {
            OddStatus::NotResulted => 0,
            OddStatus::Win => 1,
            OddStatus::Loss => 2,
            OddStatus::HalfWin => 3,
            OddStatus::HalfLoss => 4,
            OddStatus::Refunded => 5,
            OddStatus::Cancelled => 6,
            OddStatus::RefundedManually => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(OddStatus::NotResulted),
            1 => Some(OddStatus::Win),
            2 => Some(OddStatus::Loss),
            3 => Some(OddStatus::HalfWin),
            4 => Some(OddStatus::HalfLoss),
            5 => Some(OddStatus::Refunded),
            6 => Some(OddStatus::Cancelled),
            7 => Some(OddStatus::RefundedManually),
            _ => None,
        }
    }

    /// The canonical wire string, e.g. `"HALF_WIN"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OddStatus::NotResulted => "NOT_RESULTED",
            OddStatus::Win => "WIN",
            OddStatus::Loss => "LOSS",
            OddStatus::HalfWin => "HALF_WIN",
            OddStatus::HalfLoss => "HALF_LOSS",
            OddStatus::Refunded => "REFUNDED",
            OddStatus::Cancelled => "CANCELLED",
            OddStatus::RefundedManually => "REFUNDED_MANUALLY",
        }
    }
}

impl fmt::Display for OddStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OddStatus {
    type Err = SettleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OddStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SettleError::UnknownStatus(s.to_string()))
    }
}

impl Serialize for OddStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for OddStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        OddStatus::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown odd status code: {code}")))
    }
}

// ---------------------------------------------------------------------------
// Bet type
// ---------------------------------------------------------------------------

/// Shape of a bet: one leg, all legs as one accumulator, or a family of
/// fixed-size combinations. Serialized as the protocol's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BetType {
    Single,
    Express,
    System,
}

impl BetType {
    pub fn code(&self) -> u8 {
        match self {
            BetType::Single => 1,
            BetType::Express => 2,
            BetType::System => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BetType::Single),
            2 => Some(BetType::Express),
            3 => Some(BetType::System),
            _ => None,
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetType::Single => write!(f, "single"),
            BetType::Express => write!(f, "express"),
            BetType::System => write!(f, "system"),
        }
    }
}

impl Serialize for BetType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for BetType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        BetType::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown bet type code: {code}")))
    }
}

// ---------------------------------------------------------------------------
// Settle type
// ---------------------------------------------------------------------------

/// Outcome classification of a settled bet, derived solely from comparing
/// the computed payout to the original stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettleType {
    Win,
    Refund,
    Loss,
}

impl SettleType {
    pub fn code(&self) -> u8 {
        match self {
            SettleType::Win => 1,
            SettleType::Refund => 2,
            SettleType::Loss => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(SettleType::Win),
            2 => Some(SettleType::Refund),
            3 => Some(SettleType::Loss),
            _ => None,
        }
    }
}

impl fmt::Display for SettleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettleType::Win => write!(f, "WIN"),
            SettleType::Refund => write!(f, "REFUND"),
            SettleType::Loss => write!(f, "LOSS"),
        }
    }
}

impl Serialize for SettleType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for SettleType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        SettleType::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown settle type code: {code}")))
    }
}

// ---------------------------------------------------------------------------
// Odd (leg)
// ---------------------------------------------------------------------------

/// One leg of a bet: an odds ratio and its terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Odd {
    #[serde(rename = "odd_id")]
    pub id: String,
    #[serde(rename = "odd_ratio")]
    pub ratio: BigDecimal,
    #[serde(rename = "odd_status")]
    pub status: OddStatus,
}

impl Odd {
    pub fn new(id: impl Into<String>, ratio: BigDecimal, status: OddStatus) -> Self {
        Self {
            id: id.into(),
            ratio,
            status,
        }
    }

    /// Copy of this leg with a forced status (re-quoting, cash-out).
    pub fn with_status(&self, status: OddStatus) -> Self {
        Self {
            id: self.id.clone(),
            ratio: self.ratio.clone(),
            status,
        }
    }
}

impl fmt::Display for Odd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.id, self.ratio, self.status)
    }
}

// ---------------------------------------------------------------------------
// Settlement result
// ---------------------------------------------------------------------------

/// Result of settling a bet: the payout quantized to six fractional
/// digits and its win/refund/loss classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub amount: BigDecimal,
    pub settle_type: SettleType,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.settle_type, self.amount)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Domain-specific error types for the settlement engine.
#[derive(Debug, thiserror::Error)]
pub enum SettleError {
    #[error("settlement arithmetic failed: {0}")]
    Arithmetic(#[from] DecimalError),

    #[error("unknown odd status: {0}")]
    UnknownStatus(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
