//! End-to-end settlement scenarios.
//!
//! Every expected payout below is hand-calculated (and cross-checked
//! against the production callback service) so that any regression in the
//! combination enumeration, the stake split, or the decimal context is
//! caught by an exact amount mismatch, not a tolerance.

use std::str::FromStr;

use bigdecimal::BigDecimal;

use settler::{BetType, Odd, OddStatus, SettleType, SettlementEngine};

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn odds(ratio: &str, statuses: &[OddStatus]) -> Vec<Odd> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, &status)| Odd::new(format!("o{i}"), dec(ratio), status))
        .collect()
}

// ---------------------------------------------------------------------------
// Single bets
// ---------------------------------------------------------------------------

#[test]
fn test_single_win() {
    // 5 * 2.5 = 12.5
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(BetType::Single, &[1], &dec("5"), &odds("2.5", &[OddStatus::Win]))
        .unwrap();

    assert_eq!(settlement.amount, dec("12.5"));
    assert_eq!(settlement.settle_type, SettleType::Win);
}

#[test]
fn test_single_loss() {
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(BetType::Single, &[1], &dec("5"), &odds("2.5", &[OddStatus::Loss]))
        .unwrap();

    assert_eq!(settlement.amount, dec("0"));
    assert_eq!(settlement.settle_type, SettleType::Loss);
}

#[test]
fn test_single_refunded() {
    // refunded leg leaves the multiplier at 1: stake comes back
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(BetType::Single, &[1], &dec("5"), &odds("2.5", &[OddStatus::Refunded]))
        .unwrap();

    assert_eq!(settlement.amount, dec("5"));
    assert_eq!(settlement.settle_type, SettleType::Refund);
}

#[test]
fn test_single_half_win() {
    // 5 * (2.5 / 2) = 6.25
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(BetType::Single, &[1], &dec("5"), &odds("2.5", &[OddStatus::HalfWin]))
        .unwrap();

    assert_eq!(settlement.amount, dec("6.25"));
    assert_eq!(settlement.settle_type, SettleType::Win);
}

#[test]
fn test_single_half_loss() {
    // 5 / 2 = 2.5, below stake
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(BetType::Single, &[1], &dec("5"), &odds("2.5", &[OddStatus::HalfLoss]))
        .unwrap();

    assert_eq!(settlement.amount, dec("2.5"));
    assert_eq!(settlement.settle_type, SettleType::Loss);
}

// Documented edge case: the per-leg pricing table voids a manually
// refunded leg to zero, so at the engine layer the bet settles as a loss.
// The surrounding callback service historically returned the full stake
// for a manually refunded single bet at its own layer, before invoking
// the calculator. The two behaviors are intentionally kept per-layer
// rather than unified here.
#[test]
fn test_single_refunded_manually_voids_at_engine_layer() {
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::Single,
            &[1],
            &dec("5"),
            &odds("2.5", &[OddStatus::RefundedManually]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("0"));
    assert_eq!(settlement.settle_type, SettleType::Loss);
}

// ---------------------------------------------------------------------------
// Express bets
// ---------------------------------------------------------------------------

#[test]
fn test_express_three_wins() {
    // 5 * 2.5^3 = 78.125
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::Express,
            &[3],
            &dec("5"),
            &odds("2.5", &[OddStatus::Win, OddStatus::Win, OddStatus::Win]),
        )
        .unwrap();

    assert_eq!(settlement.amount.to_string(), "78.125000");
    assert_eq!(settlement.settle_type, SettleType::Win);
}

#[test]
fn test_express_four_wins_quantized() {
    // 1.93 * 1.93^4 = 26.7785184193 → 26.778518 after truncation
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::Express,
            &[4],
            &dec("1.93"),
            &odds("1.93", &[OddStatus::Win; 4]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("26.778518"));
    assert_eq!(settlement.settle_type, SettleType::Win);
}

#[test]
fn test_express_with_one_loss() {
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::Express,
            &[3],
            &dec("5"),
            &odds("2.5", &[OddStatus::Loss, OddStatus::Win, OddStatus::Win]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("0"));
    assert_eq!(settlement.settle_type, SettleType::Loss);
}

#[test]
fn test_express_mixed_half_statuses() {
    // 10 * 2.0 (win) * (3.0 / 2) (half win) / 2 (half loss) = 15
    let engine = SettlementEngine::default();
    let legs = vec![
        Odd::new("o0", dec("2.0"), OddStatus::Win),
        Odd::new("o1", dec("3.0"), OddStatus::HalfWin),
        Odd::new("o2", dec("4.0"), OddStatus::HalfLoss),
        Odd::new("o3", dec("9.9"), OddStatus::Refunded),
    ];
    let settlement = engine
        .settle(BetType::Express, &[4], &dec("10"), &legs)
        .unwrap();

    assert_eq!(settlement.amount, dec("15"));
    assert_eq!(settlement.settle_type, SettleType::Win);
}

// ---------------------------------------------------------------------------
// System bets
// ---------------------------------------------------------------------------

#[test]
fn test_system_two_of_three() {
    // C(3,2) = 3 sub-bets; per = truncate(5/3); each pays sub-stake * 2.5^2;
    // the indivisible tail lands on the last sub-bet and the truncated sum
    // quantizes to 31.249999, a hair under the naive 31.25
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::System,
            &[2],
            &dec("5"),
            &odds("2.5", &[OddStatus::Win, OddStatus::Win, OddStatus::Win]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("31.249999"));
    assert_eq!(settlement.settle_type, SettleType::Win);
}

#[test]
fn test_system_two_of_six() {
    // C(6,2) = 15 sub-bets, same truncated total as the 2-of-3 case
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::System,
            &[2],
            &dec("5"),
            &odds("2.5", &[OddStatus::Win; 6]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("31.249999"));
    assert_eq!(settlement.settle_type, SettleType::Win);
}

#[test]
fn test_system_two_of_three_with_one_loss() {
    // only the {0,1} sub-bet survives: truncate(5/3) * 6.25 → 10.416666
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::System,
            &[2],
            &dec("5"),
            &odds("2.5", &[OddStatus::Win, OddStatus::Win, OddStatus::Loss]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("10.416666"));
    assert_eq!(settlement.settle_type, SettleType::Win);
}

#[test]
fn test_system_five_of_six_even_odds_refunds() {
    // C(6,5) = 6 sub-bets at ratio 1: every sub-bet returns its sub-stake,
    // and thanks to the exact split the total is the stake to the digit
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::System,
            &[5],
            &dec("7"),
            &odds("1", &[OddStatus::Win; 6]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("7"));
    assert_eq!(settlement.settle_type, SettleType::Refund);
}

#[test]
fn test_system_two_of_three_even_odds_refunds() {
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::System,
            &[2],
            &dec("1"),
            &odds("1", &[OddStatus::Win; 3]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("1"));
    assert_eq!(settlement.settle_type, SettleType::Refund);
}

#[test]
fn test_system_multiple_sizes() {
    // sizes [2, 3] over three even legs: 3 doubles + 1 triple, all at
    // ratio 1, so the pooled stake comes straight back
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::System,
            &[2, 3],
            &dec("10"),
            &odds("1", &[OddStatus::Win; 3]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("10"));
    assert_eq!(settlement.settle_type, SettleType::Refund);
}

#[test]
fn test_system_all_losses() {
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::System,
            &[2],
            &dec("5"),
            &odds("2.5", &[OddStatus::Loss; 4]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("0"));
    assert_eq!(settlement.settle_type, SettleType::Loss);
}

#[test]
fn test_system_without_legs() {
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(BetType::System, &[2], &dec("5"), &Vec::<Odd>::new())
        .unwrap();

    assert_eq!(settlement.amount, dec("0"));
    assert_eq!(settlement.settle_type, SettleType::Loss);
}

#[test]
fn test_system_size_exceeding_leg_count() {
    // degenerate request forms no sub-bets: defined zero payout, not a panic
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(
            BetType::System,
            &[5],
            &dec("5"),
            &odds("2.5", &[OddStatus::Win; 3]),
        )
        .unwrap();

    assert_eq!(settlement.amount, dec("0"));
    assert_eq!(settlement.settle_type, SettleType::Loss);
}

// ---------------------------------------------------------------------------
// Re-quoting
// ---------------------------------------------------------------------------

#[test]
fn test_cash_out_quote_for_express() {
    // both legs forced to half win: 10 * (2.0/2) * (3.0/2) = 15
    let engine = SettlementEngine::default();
    let legs = vec![
        Odd::new("o0", dec("2.0"), OddStatus::NotResulted),
        Odd::new("o1", dec("3.0"), OddStatus::NotResulted),
    ];
    let quote = engine
        .cash_out_quote(BetType::Express, &[2], &dec("10"), &legs)
        .unwrap();

    assert_eq!(quote, dec("15"));
}

#[test]
fn test_zero_stake_settles_as_refund() {
    // payout 0 equals stake 0
    let engine = SettlementEngine::default();
    let settlement = engine
        .settle(BetType::Single, &[1], &dec("0"), &odds("2.5", &[OddStatus::Win]))
        .unwrap();

    assert_eq!(settlement.amount, dec("0"));
    assert_eq!(settlement.settle_type, SettleType::Refund);
}
