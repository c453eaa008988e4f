//! American odds algebra.
//!
//! This module provides:
//! - American odds -> implied win probability
//! - American odds -> decimal payout multiplier
//! - Parlay multipliers across several legs
//! - Overround (vig) and vig-free probabilities for a two-sided market
//!
//! A quotation of `0` or `NaN` means "no market". The plain conversions keep
//! returning the `0.0` placeholder for it; [`implied_probability`] exposes the
//! same condition as `None` instead.

use crate::error::{CoreError, Result};

/// Stake unit American odds are quoted against.
const ODDS_UNIT: f64 = 100.0;

fn is_no_market(odds: f64) -> bool {
    odds == 0.0 || odds.is_nan()
}

fn check_finite(odds: f64) -> Result<f64> {
    if odds.is_infinite() {
        return Err(CoreError::InvalidOdds {
            value: odds.to_string(),
        });
    }
    Ok(odds)
}

/// Convert an American odds quotation to an implied win probability.
///
/// - Favorite (`odds < 0`): `-odds / (-odds + 100)`
/// - Underdog (`odds > 0`): `100 / (odds + 100)`
/// - No market (`0` or `NaN`): `0.0`, which is a placeholder and not a real
///   probability
pub fn odds_to_probability(odds: f64) -> Result<f64> {
    let odds = check_finite(odds)?;
    if is_no_market(odds) {
        return Ok(0.0);
    }
    if odds < 0.0 {
        Ok(-odds / (-odds + ODDS_UNIT))
    } else {
        Ok(ODDS_UNIT / (odds + ODDS_UNIT))
    }
}

/// Convert an American odds quotation to decimal odds (total return per unit staked).
///
/// Returns `0.0` for "no market", same caveat as [`odds_to_probability`].
pub fn odds_to_decimal(odds: f64) -> Result<f64> {
    let odds = check_finite(odds)?;
    if is_no_market(odds) {
        return Ok(0.0);
    }
    if odds < 0.0 {
        Ok(ODDS_UNIT / odds.abs() + 1.0)
    } else {
        Ok(odds / ODDS_UNIT + 1.0)
    }
}

/// Payout multiplier for a parlay of American-odds legs.
///
/// Multiplies the decimal odds of every leg and truncates toward zero, so
/// the payout is never overstated. An empty slip is the empty product, `1`.
/// A "no market" leg zeroes the whole slip.
///
/// ```
/// use cfb_lines_core::odds::parlay_multiplier;
///
/// // 3.0 * 2.5 = 7.5 -> 7
/// assert_eq!(parlay_multiplier(&[200.0, 150.0]).unwrap(), 7);
/// ```
pub fn parlay_multiplier(odds_list: &[f64]) -> Result<u64> {
    let mut product = 1.0;
    for &odds in odds_list {
        product *= odds_to_decimal(odds)?;
    }
    Ok(product.trunc() as u64)
}

/// Implied probability with "no market" as `None` rather than `0.0`.
pub fn implied_probability(odds: Option<f64>) -> Result<Option<f64>> {
    let Some(odds) = odds else {
        return Ok(None);
    };
    if is_no_market(check_finite(odds)?) {
        return Ok(None);
    }
    odds_to_probability(odds).map(Some)
}

/// Bookmaker margin of a two-sided market: `home + away - 1`.
///
/// Negative for arbitrage lines; that is a valid result and is not clamped.
#[inline]
pub fn overround(home_prob: f64, away_prob: f64) -> f64 {
    home_prob + away_prob - 1.0
}

/// Rescale both sides so they sum to exactly one.
///
/// `None` when the combined probability is not positive (no market on either side).
pub fn remove_vig(home_prob: f64, away_prob: f64) -> Option<(f64, f64)> {
    let total = home_prob + away_prob;
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    Some((home_prob / total, away_prob / total))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_favorite_probability() {
        for odds in [-101, -110, -150, -200, -1000, -25000] {
            let o = odds as f64;
            let p = odds_to_probability(o).unwrap();
            assert!((p - (-o / (-o + 100.0))).abs() < EPS);
            assert!(p > 0.0 && p < 1.0, "odds {} -> {}", odds, p);
        }
        assert!((odds_to_probability(-150.0).unwrap() - 0.6).abs() < EPS);
    }

    #[test]
    fn test_underdog_probability() {
        for odds in [100, 110, 130, 250, 1500, 50000] {
            let o = odds as f64;
            let p = odds_to_probability(o).unwrap();
            assert!((p - 100.0 / (o + 100.0)).abs() < EPS);
            assert!(p > 0.0 && p < 1.0, "odds {} -> {}", odds, p);
        }
        assert!((odds_to_probability(100.0).unwrap() - 0.5).abs() < EPS);
    }

    #[test]
    fn test_no_market_placeholder() {
        assert_eq!(odds_to_probability(0.0).unwrap(), 0.0);
        assert_eq!(odds_to_probability(f64::NAN).unwrap(), 0.0);
        assert_eq!(odds_to_decimal(0.0).unwrap(), 0.0);
        assert_eq!(odds_to_decimal(f64::NAN).unwrap(), 0.0);
    }

    #[test]
    fn test_infinite_odds_rejected() {
        assert!(matches!(
            odds_to_probability(f64::INFINITY),
            Err(CoreError::InvalidOdds { .. })
        ));
        assert!(matches!(
            odds_to_decimal(f64::NEG_INFINITY),
            Err(CoreError::InvalidOdds { .. })
        ));
        assert!(implied_probability(Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_decimal_odds() {
        assert!((odds_to_decimal(-200.0).unwrap() - 1.5).abs() < EPS);
        assert!((odds_to_decimal(-100.0).unwrap() - 2.0).abs() < EPS);
        assert!((odds_to_decimal(150.0).unwrap() - 2.5).abs() < EPS);
        assert!((odds_to_decimal(200.0).unwrap() - 3.0).abs() < EPS);
    }

    #[test]
    fn test_decimal_odds_monotonic() {
        // Longer favorite pays less, longer underdog pays more
        let mut prev = f64::MAX;
        for odds in (100..=2000).step_by(50) {
            let d = odds_to_decimal(-(odds as f64)).unwrap();
            assert!(d < prev);
            prev = d;
        }

        let mut prev = 0.0;
        for odds in (100..=2000).step_by(50) {
            let d = odds_to_decimal(odds as f64).unwrap();
            assert!(d > prev);
            prev = d;
        }
    }

    #[test]
    fn test_parlay_truncates() {
        assert_eq!(parlay_multiplier(&[200.0, 150.0]).unwrap(), 7);
        // 1.909.. * 1.909.. = 3.64 -> 3
        assert_eq!(parlay_multiplier(&[-110.0, -110.0]).unwrap(), 3);
        assert_eq!(parlay_multiplier(&[-200.0]).unwrap(), 1);
    }

    #[test]
    fn test_parlay_matches_decimal_product() {
        let legs = [-150.0, 130.0, -110.0];
        let expected = legs
            .iter()
            .map(|&o| odds_to_decimal(o).unwrap())
            .product::<f64>()
            .trunc() as u64;
        assert_eq!(parlay_multiplier(&legs).unwrap(), expected);
    }

    #[test]
    fn test_parlay_edge_cases() {
        assert_eq!(parlay_multiplier(&[]).unwrap(), 1);
        assert_eq!(parlay_multiplier(&[200.0, 0.0]).unwrap(), 0);
        assert!(parlay_multiplier(&[200.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_implied_probability_option() {
        assert_eq!(implied_probability(None).unwrap(), None);
        assert_eq!(implied_probability(Some(0.0)).unwrap(), None);
        assert_eq!(implied_probability(Some(f64::NAN)).unwrap(), None);
        let p = implied_probability(Some(-150.0)).unwrap().unwrap();
        assert!((p - 0.6).abs() < EPS);
    }

    #[test]
    fn test_vig_removal_sums_to_one() {
        let home = odds_to_probability(-150.0).unwrap();
        let away = odds_to_probability(130.0).unwrap();
        assert!(overround(home, away) > 0.0);

        let (h, a) = remove_vig(home, away).unwrap();
        assert!((h + a - 1.0).abs() < 1e-9);
        assert!(h > a);
    }

    #[test]
    fn test_negative_overround_kept() {
        // +110 / +110 is an arb: both sides sum below one
        let p = odds_to_probability(110.0).unwrap();
        assert!(overround(p, p) < 0.0);
        let (h, a) = remove_vig(p, p).unwrap();
        assert!((h - 0.5).abs() < EPS);
        assert!((a - 0.5).abs() < EPS);
    }

    #[test]
    fn test_remove_vig_undefined() {
        assert_eq!(remove_vig(0.0, 0.0), None);
    }
}
