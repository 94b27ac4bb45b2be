use crate::types::Amount;
use serde::{Deserialize, Serialize};

/// Basis points in 100%
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Loan parameters applied when a stake is borrowed from the lending pool.
///
/// Both rates are in basis points of the stake, matching the contract's
/// `base-collateral-ratio` and `interest-rate` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingTerms {
    collateral_ratio_bps: u64,
    interest_rate_bps: u64,
}

impl LendingTerms {
    /// 150% collateral, 5% interest
    pub const STANDARD: LendingTerms = LendingTerms::new(15_000, 500);

    pub const fn new(collateral_ratio_bps: u64, interest_rate_bps: u64) -> Self {
        Self {
            collateral_ratio_bps,
            interest_rate_bps,
        }
    }

    pub fn collateral_ratio_bps(&self) -> u64 {
        self.collateral_ratio_bps
    }

    pub fn interest_rate_bps(&self) -> u64 {
        self.interest_rate_bps
    }

    /// Collateral locked against a borrowed stake, rounded down
    pub fn collateral_for(&self, stake: Amount) -> Amount {
        apply_bps(stake, self.collateral_ratio_bps)
    }

    /// Interest owed on a borrowed stake, rounded down
    pub fn interest_for(&self, stake: Amount) -> Amount {
        apply_bps(stake, self.interest_rate_bps)
    }

    /// Largest stake whose collateral still fits in `balance`
    pub fn max_borrowable(&self, balance: Amount) -> Amount {
        if self.collateral_ratio_bps == 0 {
            return Amount::from_micro(u64::MAX);
        }

        // floor(s * r / D) <= b  <=>  s * r < (b + 1) * D
        let limit = (balance.to_micro() as u128 + 1) * BPS_DENOMINATOR as u128 - 1;
        let stake = limit / self.collateral_ratio_bps as u128;
        Amount::from_micro(u64::try_from(stake).unwrap_or(u64::MAX))
    }

    pub fn collateral_percent(&self) -> f64 {
        self.collateral_ratio_bps as f64 / 100.0
    }

    pub fn interest_percent(&self) -> f64 {
        self.interest_rate_bps as f64 / 100.0
    }
}

impl Default for LendingTerms {
    fn default() -> Self {
        Self::STANDARD
    }
}

// saturates at u64::MAX micro-STX
fn apply_bps(amount: Amount, bps: u64) -> Amount {
    let scaled = amount.to_micro() as u128 * bps as u128 / BPS_DENOMINATOR as u128;
    Amount::from_micro(u64::try_from(scaled).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_terms() {
        let terms = LendingTerms::STANDARD;
        let stake = Amount::from_micro(100_000_000);

        assert_eq!(terms.collateral_for(stake).to_micro(), 150_000_000);
        assert_eq!(terms.interest_for(stake).to_micro(), 5_000_000);
        assert_eq!(terms.collateral_percent(), 150.0);
        assert_eq!(terms.interest_percent(), 5.0);
    }

    #[test]
    fn test_rounds_down() {
        let terms = LendingTerms::STANDARD;
        assert_eq!(terms.collateral_for(Amount::from_micro(3)).to_micro(), 4);
        assert_eq!(terms.interest_for(Amount::from_micro(19)).to_micro(), 0);
        assert_eq!(terms.interest_for(Amount::from_micro(39)).to_micro(), 1);
    }

    #[test]
    fn test_collateral_saturates() {
        let terms = LendingTerms::STANDARD;
        let huge = Amount::from_micro(u64::MAX);
        assert_eq!(terms.collateral_for(huge).to_micro(), u64::MAX);
    }

    #[test]
    fn test_max_borrowable_is_tight() {
        let terms = LendingTerms::STANDARD;
        for micro in [0u64, 1, 2, 3, 7, 1_000, 160_000_000, 140_000_001] {
            let balance = Amount::from_micro(micro);
            let max = terms.max_borrowable(balance);
            let next = Amount::from_micro(max.to_micro() + 1);

            assert!(terms.collateral_for(max) <= balance, "balance {micro}");
            assert!(terms.collateral_for(next) > balance, "balance {micro}");
        }
    }
}
