//! Backend wire contract and its implementations
//!
//! The remote backend and the local simulation speak the same read model and
//! commands; a consumer must not be able to tell them apart. All payloads are
//! JSON with snake_case fields, board cells as bare numbers or `"bonus"`.

pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod remote;

pub use error::BackendError;
#[cfg(not(target_arch = "wasm32"))]
pub use remote::RemoteBackend;

use serde::{Deserialize, Serialize};

use crate::consts::BOARD_SIZE;
use crate::sim::{self, Board, Cell, GameState};

/// Full game state as served by `GET /makebet` and `POST /reset-game`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateResponse {
    pub balance: i64,
    pub dice_result: Option<(u8, u8)>,
    pub last_prize_won: Option<u32>,
    pub available_to_spin: bool,
    pub bonus_mode_board: Option<Vec<Cell>>,
    pub bonus_mode: bool,
    pub freespin_amount: u32,
    pub regular_mode_board: Vec<Cell>,
}

/// Response of `POST /roll`; the caller refetches the full state afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResponse {
    pub dice_result: (u8, u8),
}

impl GameStateResponse {
    /// Snapshot the local simulation into the wire shape
    pub fn from_state(state: &GameState) -> Self {
        Self {
            balance: state.balance,
            dice_result: state.dice_result,
            last_prize_won: state.last_prize_won,
            available_to_spin: state.available_to_spin,
            bonus_mode_board: state
                .bonus_board
                .as_ref()
                .map(|b| b.cells().to_vec()),
            bonus_mode: state.bonus_mode,
            freespin_amount: state.freespin_amount,
            regular_mode_board: state.regular_board.cells().to_vec(),
        }
    }

    /// The board the pawn is currently moving on
    pub fn active_board(&self) -> &[Cell] {
        match &self.bonus_mode_board {
            Some(board) if self.bonus_mode => board,
            _ => &self.regular_mode_board,
        }
    }

    /// Check the board payloads before accepting a remote state.
    ///
    /// The regular board must pass the full ring predicate. A bonus board
    /// must be present exactly while bonus mode is on, and is the multiplied
    /// ring: 16 all-numeric cells.
    pub fn boards_valid(&self) -> bool {
        if !Board::validate(&self.regular_mode_board) {
            return false;
        }
        match &self.bonus_mode_board {
            Some(cells) => {
                self.bonus_mode
                    && cells.len() == BOARD_SIZE
                    && cells.iter().all(|c| !c.is_bonus())
            }
            None => !self.bonus_mode,
        }
    }
}

/// The command/read contract shared by the local simulation and the remote
/// backend.
///
/// `roll` reports the dice only; callers refetch the full state, exactly like
/// the HTTP flow.
pub trait GameBackend {
    fn fetch_state(&mut self) -> Result<GameStateResponse, BackendError>;
    fn roll(&mut self) -> Result<RollResponse, BackendError>;
    fn reset(&mut self) -> Result<GameStateResponse, BackendError>;
    /// Standalone validated board, as served by `GET /board`
    fn fetch_board(&mut self) -> Result<Board, BackendError>;
}

/// In-process simulation behind the same contract as the remote backend
#[derive(Debug)]
pub struct LocalBackend {
    state: GameState,
}

impl LocalBackend {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}

impl GameBackend for LocalBackend {
    fn fetch_state(&mut self) -> Result<GameStateResponse, BackendError> {
        Ok(GameStateResponse::from_state(&self.state))
    }

    fn roll(&mut self) -> Result<RollResponse, BackendError> {
        sim::roll(&mut self.state);
        if self.state.events.contains(&sim::GameEvent::RollRefused) {
            return Err(BackendError::Refused);
        }
        match self.state.dice_result {
            Some(dice) => Ok(RollResponse { dice_result: dice }),
            None => Err(BackendError::Refused),
        }
    }

    fn reset(&mut self) -> Result<GameStateResponse, BackendError> {
        sim::reset(&mut self.state);
        Ok(GameStateResponse::from_state(&self.state))
    }

    fn fetch_board(&mut self) -> Result<Board, BackendError> {
        Ok(self.state.regular_board.clone())
    }
}
