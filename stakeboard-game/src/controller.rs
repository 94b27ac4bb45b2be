use crate::board::{Board, CellIndex, Mark};
use crate::submission::{ChainClient, MoveSubmission, SubmissionReceipt};
use crate::{GameError, Result};

use serde::{Deserialize, Serialize};
use stakeboard_core::{Amount, WagerCalculator, WagerInput, WagerQuote};
use std::fmt;

/// Which figure the balance failed to cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shortfall {
    Collateral,
    Stake,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shortfall::Collateral => write!(f, "for collateral"),
            Shortfall::Stake => write!(f, "to stake"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    ZeroStake,
    NoMoveSelected,
    InsufficientBalance {
        shortfall: Shortfall,
        need: Amount,
        available: Amount,
    },
}

/// Create-game form state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormState {
    Idle,
    Staked,
    Configured,
    Submitting,
    Submitted(SubmissionReceipt),
    Rejected(RejectReason),
}

/// Drives the create-game form: keeps the quote in step with the inputs and
/// only lets a game through to the chain when it has a move and is affordable.
#[derive(Debug)]
pub struct GameCreationController {
    calculator: WagerCalculator,
    board: Board,
    stake: Amount,
    use_lending: bool,
    balance: Amount,
    quote: WagerQuote,
    state: FormState,
}

impl GameCreationController {
    /// The creator always opens with X
    pub const OPENING_MARK: Mark = Mark::X;

    pub fn new(calculator: WagerCalculator, balance: Amount) -> Self {
        let input = WagerInput::new(Amount::ZERO, false, balance);
        let quote = calculator.quote(&input);

        Self {
            calculator,
            board: Board::empty(),
            stake: Amount::ZERO,
            use_lending: false,
            balance,
            quote,
            state: FormState::Idle,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stake(&self) -> Amount {
        self.stake
    }

    pub fn use_lending(&self) -> bool {
        self.use_lending
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn quote(&self) -> &WagerQuote {
        &self.quote
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn calculator(&self) -> &WagerCalculator {
        &self.calculator
    }

    pub fn snapshot(&self) -> WagerInput {
        WagerInput::new(self.stake, self.use_lending, self.balance)
    }

    pub fn set_stake(&mut self, stake: Amount) {
        self.stake = stake;
        self.recompute();
    }

    /// Sets the stake from typed STX text
    pub fn set_stake_text(&mut self, text: &str) -> Result<()> {
        let stake: Amount = text.parse()?;
        self.set_stake(stake);
        Ok(())
    }

    pub fn set_lending(&mut self, use_lending: bool) {
        self.use_lending = use_lending;
        self.recompute();
    }

    pub fn toggle_lending(&mut self) {
        self.set_lending(!self.use_lending);
    }

    pub fn set_balance(&mut self, balance: Amount) {
        self.balance = balance;
        self.recompute();
    }

    /// Stakes as much as the balance allows under the current lending choice
    pub fn fill_max_stake(&mut self) {
        let max = self.calculator.max_stake(self.balance, self.use_lending);
        self.set_stake(max);
    }

    pub fn select_cell(&mut self, index: usize) -> Result<CellIndex> {
        let cell = CellIndex::new(index)?;
        self.board.place_opening(cell, Self::OPENING_MARK);
        self.recompute();
        Ok(cell)
    }

    /// Whether the create button is enabled
    pub fn can_submit(&self) -> bool {
        !self.stake.is_zero() && self.quote.can_afford
    }

    pub fn submit_label(&self) -> &'static str {
        if self.use_lending {
            "Create Game with Loan"
        } else {
            "Create Game"
        }
    }

    /// Starts a fresh form for the next game, keeping the known balance
    pub fn reset(&mut self) {
        *self = Self::new(self.calculator, self.balance);
    }

    fn recompute(&mut self) {
        let quote = self.calculator.quote(&self.snapshot());
        if quote != self.quote {
            tracing::debug!(
                "Quote updated: stake {}, collateral {}, interest {}, affordable: {}",
                quote.stake,
                quote.collateral,
                quote.interest,
                quote.can_afford
            );
            self.quote = quote;
        }
        self.state = self.editable_state();
    }

    fn editable_state(&self) -> FormState {
        if self.stake.is_zero() {
            FormState::Idle
        } else if self.use_lending {
            FormState::Configured
        } else {
            FormState::Staked
        }
    }

    /// Outer error: the form is broken. Inner error: the player can fix it.
    fn check(&self) -> Result<std::result::Result<MoveSubmission, RejectReason>> {
        if self.stake.is_zero() {
            return Ok(Err(RejectReason::ZeroStake));
        }

        let (cell, mark) = match self.board.opening_move() {
            Ok(opening) => opening,
            Err(GameError::NoMoveSelected) => return Ok(Err(RejectReason::NoMoveSelected)),
            Err(e) => return Err(e),
        };

        if !self.quote.can_afford {
            let shortfall = if self.use_lending {
                Shortfall::Collateral
            } else {
                Shortfall::Stake
            };
            return Ok(Err(RejectReason::InsufficientBalance {
                shortfall,
                need: self.quote.required_lock(),
                available: self.balance,
            }));
        }

        Ok(Ok(MoveSubmission {
            cell,
            mark,
            stake: self.stake,
            use_lending: self.use_lending,
        }))
    }

    /// Sends the opening move and stake to the chain.
    ///
    /// Nothing is sent when the stake is zero, no cell is picked or the
    /// balance falls short; the form is left `Rejected` and can be corrected.
    /// A chain failure is returned as-is with the form back in its editable
    /// state.
    pub async fn create_game(&mut self, client: &dyn ChainClient) -> Result<SubmissionReceipt> {
        if matches!(self.state, FormState::Submitted(_)) {
            return Err(GameError::invalid_state(
                "Game already submitted; reset the form to create another",
            ));
        }

        let submission = match self.check()? {
            Ok(submission) => submission,
            Err(reason) => {
                tracing::warn!("Create game rejected: {:?}", reason);
                self.state = FormState::Rejected(reason.clone());
                return Err(reason.into());
            }
        };

        self.state = FormState::Submitting;
        tracing::info!(
            "Submitting game: cell {}, stake {}, lending: {}",
            submission.cell,
            submission.stake,
            submission.use_lending
        );

        match client.create_game(submission).await {
            Ok(receipt) => {
                tracing::info!("Game submitted: {}", receipt.reference);
                self.state = FormState::Submitted(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("Game submission failed: {}", e);
                self.state = self.editable_state();
                Err(e)
            }
        }
    }
}
