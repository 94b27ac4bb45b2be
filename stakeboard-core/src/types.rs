use crate::error::{Result, StakeboardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Micro-STX in one STX
pub const MICRO_PER_STX: u64 = 1_000_000;

const MICRO_DIGITS: usize = 6;

/// An STX amount held as an integer count of micro-STX
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_micro(micro: u64) -> Self {
        Self(micro)
    }

    pub const fn to_micro(self) -> u64 {
        self.0
    }

    /// Converts a whole-STX figure, rounding down to the nearest micro-STX.
    ///
    /// Float input is scaled as-is, so `1.005` gives 1_004_999. Parse text
    /// with [`FromStr`] when the typed decimal must be kept exactly.
    pub fn from_stx(stx: f64) -> Result<Self> {
        if !stx.is_finite() {
            return Err(StakeboardError::invalid_stake(format!(
                "{} is not a number",
                stx
            )));
        }
        if stx < 0.0 {
            return Err(StakeboardError::invalid_stake(format!(
                "{} is negative",
                stx
            )));
        }

        let micro = (stx * MICRO_PER_STX as f64).floor();
        if micro >= u64::MAX as f64 {
            return Err(StakeboardError::invalid_stake(format!(
                "{} is too large",
                stx
            )));
        }

        Ok(Self(micro as u64))
    }

    pub fn to_stx(self) -> f64 {
        self.0 as f64 / MICRO_PER_STX as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }
}

impl FromStr for Amount {
    type Err = StakeboardError;

    /// Parses decimal STX text (`"100"`, `"2.5"`, `".75"`). Digits past the
    /// sixth decimal place are dropped.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(StakeboardError::invalid_stake("stake is empty"));
        }
        if s.starts_with('-') {
            return Err(StakeboardError::invalid_stake(format!(
                "{} is negative",
                s
            )));
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(StakeboardError::invalid_stake(format!(
                "'{}' is not a number",
                s
            )));
        }

        let too_large = || StakeboardError::invalid_stake(format!("{} is too large", s));

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };

        let mut frac_digits: String = frac.chars().take(MICRO_DIGITS).collect();
        while frac_digits.len() < MICRO_DIGITS {
            frac_digits.push('0');
        }
        let frac: u64 = frac_digits.parse().map_err(|_| too_large())?;

        whole
            .checked_mul(MICRO_PER_STX)
            .and_then(|micro| micro.checked_add(frac))
            .map(Amount)
            .ok_or_else(too_large)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / MICRO_PER_STX;
        let frac = self.0 % MICRO_PER_STX;

        if frac == 0 {
            write!(f, "{} STX", whole)
        } else {
            let frac = format!("{:06}", frac);
            write!(f, "{}.{} STX", whole, frac.trim_end_matches('0'))
        }
    }
}

/// STX balance of an account as reported by the Stacks API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub total: Amount,
    pub locked: Amount,
}

impl Balance {
    pub fn new(total: Amount, locked: Amount) -> Self {
        Self { total, locked }
    }

    pub fn zero() -> Self {
        Self::new(Amount::ZERO, Amount::ZERO)
    }

    /// Funds that can back a stake or collateral; stacking locks are excluded.
    pub fn spendable(&self) -> Amount {
        self.total.saturating_sub(self.locked)
    }
}
