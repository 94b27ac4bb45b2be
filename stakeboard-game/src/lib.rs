//! Create-game flow for staked tic-tac-toe
//!
//! The creator picks an opening cell, a stake and whether to borrow it from
//! the lending pool. The controller keeps the cost quote current and hands a
//! [`MoveSubmission`] to a [`ChainClient`] once the form is valid.

pub mod board;
pub mod controller;
pub mod error;
pub mod submission;

pub use board::{Board, CellIndex, Mark, BOARD_SIZE};
pub use controller::{FormState, GameCreationController, RejectReason, Shortfall};
pub use error::{GameError, Result};
pub use submission::{
    ChainClient, ContractCall, ContractCallClient, MoveSubmission, SubmissionReceipt,
};

use stakeboard_core::{Amount, WagerCalculator};

/// Opens a create-game form for a player holding `balance`
pub fn new_game_form(balance: Amount) -> GameCreationController {
    GameCreationController::new(WagerCalculator::default(), balance)
}
