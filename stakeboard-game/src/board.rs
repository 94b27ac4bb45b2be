use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 9;

/// Cell contents, numbered the way the contract stores them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn as_u8(&self) -> u8 {
        match self {
            Mark::Empty => 0,
            Mark::X => 1,
            Mark::O => 2,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// Board position 0..=8, row-major from the top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CellIndex(u8);

impl CellIndex {
    pub fn new(index: usize) -> Result<Self> {
        if index < BOARD_SIZE {
            Ok(Self(index as u8))
        } else {
            Err(GameError::InvalidCell(index))
        }
    }

    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = GameError;

    fn try_from(index: usize) -> Result<Self> {
        Self::new(index)
    }
}

impl From<CellIndex> for usize {
    fn from(cell: CellIndex) -> usize {
        cell.get()
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Mark; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; BOARD_SIZE] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| *cell == Mark::Empty)
    }

    /// Places the creator's opening move. Any earlier pick is cleared, so the
    /// board never holds more than one mark.
    pub fn place_opening(&mut self, cell: CellIndex, mark: Mark) {
        self.cells = [Mark::Empty; BOARD_SIZE];
        self.cells[cell.get()] = mark;
    }

    /// The single move on the board
    pub fn opening_move(&self) -> Result<(CellIndex, Mark)> {
        let mut moves = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, mark)| **mark != Mark::Empty);

        let (index, mark) = moves.next().ok_or(GameError::NoMoveSelected)?;
        if moves.next().is_some() {
            return Err(GameError::invalid_state(
                "Opening board must hold exactly one move",
            ));
        }

        Ok((CellIndex::new(index)?, *mark))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "---+---+---")?;
            }
            write!(
                f,
                " {} | {} | {} ",
                cells[0].symbol(),
                cells[1].symbol(),
                cells[2].symbol()
            )?;
        }
        Ok(())
    }
}
