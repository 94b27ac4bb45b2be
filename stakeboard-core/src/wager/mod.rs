//! Stake cost model.
//!
//! A stake is either self-funded or borrowed from the lending pool. A
//! borrowed stake locks collateral and owes interest on a win; the quote
//! tells the player what is locked, what they walk away with, and whether
//! their balance covers it.

pub mod terms;

pub use terms::{LendingTerms, BPS_DENOMINATOR};

use crate::error::Result;
use crate::types::Amount;
use serde::{Deserialize, Serialize};

/// Snapshot of the create-game form that a quote is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerInput {
    pub stake: Amount,
    pub use_lending: bool,
    pub balance: Amount,
}

impl WagerInput {
    pub fn new(stake: Amount, use_lending: bool, balance: Amount) -> Self {
        Self {
            stake,
            use_lending,
            balance,
        }
    }
}

/// Cost of a stake under the current lending choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerQuote {
    pub stake: Amount,
    pub collateral: Amount,
    pub interest: Amount,
    pub use_lending: bool,
    pub can_afford: bool,
}

impl WagerQuote {
    /// The amount the balance must cover: collateral when borrowing,
    /// the stake itself otherwise.
    pub fn required_lock(&self) -> Amount {
        if self.use_lending {
            self.collateral
        } else {
            self.stake
        }
    }

    /// Gain on a win. A borrowed stake repays its interest out of the pot.
    pub fn net_on_win(&self) -> Amount {
        if self.use_lending {
            self.stake.saturating_sub(self.interest)
        } else {
            self.stake
        }
    }

    /// Loss on a defeat. With a loan this is the whole collateral, which
    /// overstates the real loss when the contract repays the loan out of it.
    pub fn loss_amount(&self) -> Amount {
        if self.use_lending {
            self.collateral
        } else {
            self.stake
        }
    }
}

/// One row of the cost breakdown shown before a game is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub value: String,
}

impl BreakdownLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WagerCalculator {
    terms: LendingTerms,
}

impl WagerCalculator {
    pub fn new(terms: LendingTerms) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &LendingTerms {
        &self.terms
    }

    /// Prices a stake. Always computed in full from the snapshot.
    pub fn quote(&self, input: &WagerInput) -> WagerQuote {
        let stake = input.stake;

        if stake.is_zero() {
            return WagerQuote {
                stake,
                collateral: Amount::ZERO,
                interest: Amount::ZERO,
                use_lending: input.use_lending,
                can_afford: true,
            };
        }

        if input.use_lending {
            let collateral = self.terms.collateral_for(stake);
            WagerQuote {
                stake,
                collateral,
                interest: self.terms.interest_for(stake),
                use_lending: true,
                can_afford: input.balance >= collateral,
            }
        } else {
            WagerQuote {
                stake,
                collateral: Amount::ZERO,
                interest: Amount::ZERO,
                use_lending: false,
                can_afford: input.balance >= stake,
            }
        }
    }

    /// Largest stake the balance can back ("Max" on the form)
    pub fn max_stake(&self, balance: Amount, use_lending: bool) -> Amount {
        if use_lending {
            self.terms.max_borrowable(balance)
        } else {
            balance
        }
    }

    pub fn breakdown(&self, quote: &WagerQuote) -> Vec<BreakdownLine> {
        let mut lines = Vec::new();

        if quote.use_lending {
            lines.push(BreakdownLine::new("Stake (Borrowed)", quote.stake.to_string()));
            lines.push(BreakdownLine::new(
                format!("Collateral ({}%)", self.terms.collateral_percent()),
                quote.collateral.to_string(),
            ));
            lines.push(BreakdownLine::new(
                format!("Interest ({}%)", self.terms.interest_percent()),
                quote.interest.to_string(),
            ));
        } else {
            lines.push(BreakdownLine::new("Your Stake", quote.stake.to_string()));
        }

        lines.push(BreakdownLine::new(
            "If You Win",
            format!("+{}", quote.net_on_win()),
        ));
        lines.push(BreakdownLine::new(
            "If You Lose",
            format!("-{}", quote.loss_amount()),
        ));

        lines
    }
}

/// Quotes a whole-STX stake against a micro-STX balance with the standard
/// lending terms.
pub fn quote(stake_stx: f64, use_lending: bool, balance_micro: u64) -> Result<WagerQuote> {
    let input = WagerInput::new(
        Amount::from_stx(stake_stx)?,
        use_lending,
        Amount::from_micro(balance_micro),
    );
    Ok(WagerCalculator::default().quote(&input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StakeboardError;

    const STAKES: [f64; 9] = [
        0.0, 0.000001, 0.5, 1.0, 1.005, 2.5, 33.3, 100.0, 12_345.678901,
    ];

    #[test]
    fn test_self_funded_has_no_loan_costs() {
        for stake in STAKES {
            for balance in [0, 1, 1_000_000_000_000] {
                let quote = quote(stake, false, balance).unwrap();
                assert_eq!(quote.collateral, Amount::ZERO);
                assert_eq!(quote.interest, Amount::ZERO);
            }
        }
    }

    #[test]
    fn test_lending_costs_follow_stake() {
        for stake in STAKES {
            let quote = quote(stake, true, 0).unwrap();
            let micro = (stake * 1_000_000.0).floor() as u64;

            // floor(micro * 1.5) and floor(micro * 0.05) in exact integers
            assert_eq!(quote.stake.to_micro(), micro);
            assert_eq!(quote.collateral.to_micro(), micro * 3 / 2);
            assert_eq!(quote.interest.to_micro(), micro / 20);
        }
    }

    #[test]
    fn test_float_stake_rounds_down() {
        let quote = quote(1.005, true, 0).unwrap();
        assert_eq!(quote.stake.to_micro(), 1_004_999);
        assert_eq!(quote.collateral.to_micro(), 1_507_498);
    }

    #[test]
    fn test_quote_is_repeatable() {
        let input = WagerInput::new(Amount::from_micro(7_777_777), true, Amount::from_micro(9));
        let calculator = WagerCalculator::default();
        assert_eq!(calculator.quote(&input), calculator.quote(&input));
    }

    #[test]
    fn test_zero_stake_is_always_affordable() {
        for use_lending in [false, true] {
            for balance in [0, 1, 500_000_000] {
                let quote = quote(0.0, use_lending, balance).unwrap();
                assert!(quote.can_afford);
                assert_eq!(quote.collateral, Amount::ZERO);
                assert_eq!(quote.interest, Amount::ZERO);
            }
        }
    }

    #[test]
    fn test_self_funded_stake_above_balance() {
        let quote = quote(100.0, false, 50_000_000).unwrap();
        assert_eq!(quote.stake.to_micro(), 100_000_000);
        assert!(!quote.can_afford);
        assert_eq!(quote.required_lock().to_micro(), 100_000_000);
    }

    #[test]
    fn test_borrowed_stake_with_enough_collateral() {
        let quote = quote(100.0, true, 160_000_000).unwrap();
        assert_eq!(quote.collateral.to_micro(), 150_000_000);
        assert_eq!(quote.interest.to_micro(), 5_000_000);
        assert!(quote.can_afford);
    }

    #[test]
    fn test_borrowed_stake_short_on_collateral() {
        let quote = quote(100.0, true, 140_000_000).unwrap();
        assert_eq!(quote.collateral.to_micro(), 150_000_000);
        assert!(!quote.can_afford);
        assert_eq!(quote.required_lock().to_micro(), 150_000_000);
    }

    #[test]
    fn test_balance_exactly_covering_lock() {
        assert!(quote(100.0, true, 150_000_000).unwrap().can_afford);
        assert!(quote(100.0, false, 100_000_000).unwrap().can_afford);
    }

    #[test]
    fn test_win_and_loss_figures() {
        let borrowed = quote(100.0, true, 0).unwrap();
        assert_eq!(borrowed.net_on_win().to_micro(), 95_000_000);
        assert_eq!(borrowed.loss_amount().to_micro(), 150_000_000);

        let own = quote(100.0, false, 0).unwrap();
        assert_eq!(own.net_on_win().to_micro(), 100_000_000);
        assert_eq!(own.loss_amount().to_micro(), 100_000_000);
    }

    #[test]
    fn test_invalid_stake_rejected() {
        assert!(matches!(
            quote(-1.0, false, 0),
            Err(StakeboardError::InvalidStake(_))
        ));
        assert!(matches!(
            quote(f64::NAN, true, 0),
            Err(StakeboardError::InvalidStake(_))
        ));
    }

    #[test]
    fn test_max_stake() {
        let calculator = WagerCalculator::default();
        let balance = Amount::from_micro(150_000_000);

        assert_eq!(calculator.max_stake(balance, false), balance);

        let max = calculator.max_stake(balance, true);
        assert_eq!(max.to_micro(), 100_000_000);
        let quote = calculator.quote(&WagerInput::new(max, true, balance));
        assert!(quote.can_afford);
    }

    #[test]
    fn test_breakdown_rows() {
        let calculator = WagerCalculator::default();

        let borrowed = quote(100.0, true, 0).unwrap();
        let rows: Vec<(String, String)> = calculator
            .breakdown(&borrowed)
            .into_iter()
            .map(|line| (line.label, line.value))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Stake (Borrowed)".to_string(), "100 STX".to_string()),
                ("Collateral (150%)".to_string(), "150 STX".to_string()),
                ("Interest (5%)".to_string(), "5 STX".to_string()),
                ("If You Win".to_string(), "+95 STX".to_string()),
                ("If You Lose".to_string(), "-150 STX".to_string()),
            ]
        );

        let own = quote(2.5, false, 0).unwrap();
        let labels: Vec<String> = calculator
            .breakdown(&own)
            .into_iter()
            .map(|line| line.label)
            .collect();
        assert_eq!(labels, vec!["Your Stake", "If You Win", "If You Lose"]);
    }
}
