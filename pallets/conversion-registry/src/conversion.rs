//! Fixed-point conversion between the utility asset and an instrument.
//!
//! A ratio `R` means `R` instrument units per `RATIO_SCALE` utility units. All
//! helpers truncate and return `None` instead of overflowing.

use tokenization_primitives::{Balance, UNIT};

/// Instrument units per [`RATIO_SCALE`] units of utility asset.
pub type Ratio = u128;

pub const RATIO_SCALE: Balance = 1_000;

/// Share of the issued supply that must be back in custody before finalization.
pub const REDEMPTION_THRESHOLD_PERCENT: Balance = 99;

/// Instrument amount released for burning `utility` units of the utility asset.
pub fn instrument_amount(utility: Balance, ratio: Ratio) -> Option<Balance> {
    utility.checked_mul(ratio)?.checked_div(RATIO_SCALE)
}

/// Utility amount that redeems `instrument` units. `None` for a zero ratio.
pub fn utility_amount(instrument: Balance, ratio: Ratio) -> Option<Balance> {
    instrument.checked_mul(RATIO_SCALE)?.checked_div(ratio)
}

/// Utility asset minted to the pool wallet when an instrument of
/// `total_supply` whole units is created. Whole units only.
pub fn pool_allocation(total_supply: Balance, ratio: Ratio) -> Option<Balance> {
    total_supply.checked_mul(RATIO_SCALE)?.checked_div(ratio)?.checked_mul(UNIT)
}

/// `custody * 100 >= issued * 99`, evaluated without widening.
pub fn meets_redemption_threshold(custody: Balance, issued: Balance) -> bool {
    let free = 100 - REDEMPTION_THRESHOLD_PERCENT;
    // floor(issued * free / 100), split so the product cannot overflow
    let slack = issued / 100 * free + issued % 100 * free / 100;
    custody >= issued - slack
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn burn_amount_for_full_locked_allocation() {
        assert_eq!(utility_amount(50_000 * UNIT, 7533), Some(6_637_461_834_594_451_081_906));
    }

    #[test]
    fn instrument_amount_scales_by_ratio() {
        assert_eq!(instrument_amount(1_000 * UNIT, 7533), Some(7_533 * UNIT));
        assert_eq!(instrument_amount(1, 999), Some(0));
        assert_eq!(instrument_amount(Balance::MAX, 2), None);
    }

    #[test]
    fn zero_ratio_has_no_utility_amount() {
        assert_eq!(utility_amount(UNIT, 0), None);
        assert_eq!(pool_allocation(100_000, 0), None);
    }

    #[test]
    fn pool_allocation_truncates_to_whole_units() {
        // 100_000 * 1000 / 7533 = 13274.9...
        assert_eq!(pool_allocation(100_000, 7533), Some(13_274 * UNIT));
        assert_eq!(pool_allocation(1, 1001), Some(0));
    }

    #[test]
    fn threshold_boundary() {
        let issued = 100_000 * UNIT;
        assert!(meets_redemption_threshold(99_000 * UNIT, issued));
        assert!(!meets_redemption_threshold(99_000 * UNIT - 1, issued));
        assert!(meets_redemption_threshold(issued, issued));
        assert!(meets_redemption_threshold(0, 0));
        // 99% of 150 is 148.5, so 148 falls short
        assert!(!meets_redemption_threshold(148, 150));
        assert!(meets_redemption_threshold(149, 150));
    }

    proptest! {
        #[test]
        fn threshold_matches_wide_formula(
            issued in 0u128..=u64::MAX as u128,
            custody in 0u128..=u64::MAX as u128,
        ) {
            prop_assert_eq!(
                meets_redemption_threshold(custody, issued),
                custody * 100 >= issued * REDEMPTION_THRESHOLD_PERCENT
            );
        }

        #[test]
        fn redeeming_the_burn_amount_never_overshoots(
            locked in 0u128..=1_000_000_000 * UNIT,
            ratio in 1u128..=1_000_000,
        ) {
            let burn = utility_amount(locked, ratio).unwrap();
            let released = instrument_amount(burn, ratio).unwrap();
            prop_assert!(released <= locked);
            // Truncation loses less than one ratio step
            prop_assert!(locked - released < ratio.max(RATIO_SCALE));
        }

        #[test]
        fn pool_allocation_is_whole(
            total in 1u128..=1_000_000_000_000,
            ratio in 1u128..=1_000_000,
        ) {
            let minted = pool_allocation(total, ratio).unwrap();
            prop_assert_eq!(minted % UNIT, 0);
        }
    }
}
