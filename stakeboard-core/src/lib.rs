//! stakeboard core - stake, collateral and interest figures for on-chain
//! tic-tac-toe games
//!
//! Amounts are integer micro-STX throughout; whole-STX values only appear at
//! the edges (user input and display).

pub mod config;
pub mod error;
pub mod stacks;
pub mod types;
pub mod wager;

pub use config::{ClientConfig, Network};
pub use error::{Result, StakeboardError};
pub use stacks::{BalanceSource, StacksApi};
pub use types::{Amount, Balance, MICRO_PER_STX};
pub use wager::{
    quote, BreakdownLine, LendingTerms, WagerCalculator, WagerInput, WagerQuote,
};
