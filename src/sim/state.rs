//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::consts::*;

/// A single square on the ring.
///
/// Serializes to the backend wire shape: a bare number for prizes, the
/// string `"bonus"` for the bonus square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Numeric prize cell (multiple of 5 in 5..=75 on the regular board)
    Prize(u32),
    /// The single bonus square that starts the bonus sub-round
    Bonus,
}

impl Cell {
    /// Credit payout for landing here (the bonus square itself pays nothing)
    pub fn payout(self) -> u32 {
        match self {
            Cell::Prize(v) => v,
            Cell::Bonus => 0,
        }
    }

    pub fn is_bonus(self) -> bool {
        matches!(self, Cell::Bonus)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Prize(v) => serializer.serialize_u32(*v),
            Cell::Bonus => serializer.serialize_str("bonus"),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CellVisitor;

        impl<'de> Visitor<'de> for CellVisitor {
            type Value = Cell;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a prize number or the string \"bonus\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Cell, E> {
                u32::try_from(v)
                    .map(Cell::Prize)
                    .map_err(|_| E::custom("prize value out of range"))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Cell, E> {
                u32::try_from(v)
                    .map(Cell::Prize)
                    .map_err(|_| E::custom("prize value out of range"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Cell, E> {
                if v == "bonus" {
                    Ok(Cell::Bonus)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

/// The 16-cell ring the pawn moves around.
///
/// Newtype over a fixed array so the wire representation stays a plain
/// JSON array of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board(pub(crate) [Cell; BOARD_SIZE]);

impl Board {
    pub fn cell(&self, index: usize) -> Cell {
        self.0[index]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    /// Position of the bonus square, if the board has exactly one
    pub fn bonus_index(&self) -> Option<usize> {
        self.0.iter().position(|c| c.is_bonus())
    }
}

/// RNG state wrapper for serialization
///
/// Each draw derives a fresh `Pcg32` from the seed and a stream counter,
/// so runs replay exactly from a saved snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Generator for the next draw, advancing the stream counter
    pub fn next_rng(&mut self) -> Pcg32 {
        self.stream = self.stream.wrapping_add(1);
        let stream_seed = self
            .seed
            .wrapping_add(self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Pcg32::seed_from_u64(stream_seed)
    }
}

/// What the last command did - consumed by the presentation layer to
/// trigger animations and audio without inspecting state diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DiceRolled { d1: u8, d2: u8 },
    PrizeWon { amount: u32 },
    BonusEntered,
    BonusExited,
    RollRefused,
    GameReset,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Credits available
    pub balance: i64,
    /// Last rolled pair, each die in 1..=6
    pub dice_result: Option<(u8, u8)>,
    /// Payout of the most recent roll (0 if none)
    pub last_prize_won: Option<u32>,
    /// Whether a further roll is currently permitted
    pub available_to_spin: bool,
    /// The ring in play outside bonus mode
    pub regular_board: Board,
    /// Multiplied ring, present only while bonus mode is active
    pub bonus_board: Option<Board>,
    /// Whether the bonus sub-round is active
    pub bonus_mode: bool,
    /// Remaining bonus-mode rolls
    pub freespin_amount: u32,
    /// Pawn position on the active board
    pub current_index: usize,
    /// Events produced by the last command (not part of the snapshot)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng_state = RngState::new(seed);
        let regular_board = Board::generate(&mut rng_state.next_rng());
        Self {
            seed,
            rng_state,
            balance: INITIAL_BALANCE,
            dice_result: None,
            last_prize_won: None,
            available_to_spin: true,
            regular_board,
            bonus_board: None,
            bonus_mode: false,
            freespin_amount: 0,
            current_index: 0,
            events: Vec::new(),
        }
    }

    /// The board the pawn is currently moving on
    pub fn active_board(&self) -> &Board {
        match &self.bonus_board {
            Some(board) if self.bonus_mode => board,
            _ => &self.regular_board,
        }
    }

    /// Drain the events produced by the last command
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
