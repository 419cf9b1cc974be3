//! Deterministic game simulation
//!
//! All game rules live here. This module must be pure and deterministic:
//! - Seeded RNG only (dice and shuffles replay from a seed)
//! - No I/O, rendering or platform dependencies
//! - Every command runs to completion; callers only ever observe a full
//!   before/after snapshot

pub mod board;
pub mod roll;
pub mod state;

pub use roll::{apply_roll, reset, roll};
pub use state::{Board, Cell, GameEvent, GameState, RngState};
