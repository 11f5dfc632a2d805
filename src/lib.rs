//! SETTLER — Bet Settlement and Refund Calculation Engine
//!
//! Computes the exact payout and win/refund/loss classification of
//! resolved single, express and system bets under arbitrary-precision
//! decimal arithmetic with truncating rounding. The engine is pure
//! computation and performs no I/O and no balance bookkeeping.

pub mod combinations;
pub mod decimal;
pub mod settlement;
pub mod types;

pub use settlement::{Selection, SettlementEngine};
pub use types::{BetType, Odd, OddStatus, SettleError, SettleType, Settlement};
