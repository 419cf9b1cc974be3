//! Fortune Ring - a dice-and-ring board game engine
//!
//! Core modules:
//! - `sim`: Deterministic game simulation (boards, rolls, bonus mode)
//! - `backend`: Backend wire contract and its local/remote implementations
//! - `session`: Mode selection and the uniform read model for the UI
//! - `settings`: Player preferences and mode configuration
//!
//! Rendering, animation and audio live in the presentation layer, which only
//! observes state snapshots and issues `roll`/`reset` commands.

pub mod backend;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use session::{GameSession, Mode};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Starting credit balance
    pub const INITIAL_BALANCE: i64 = 100;
    /// Flat credit charge per regular-mode roll
    pub const ROLL_COST: i64 = 50;

    /// Number of cells on the ring
    pub const BOARD_SIZE: usize = 16;
    /// Numeric cells per board (one cell is the bonus square)
    pub const BOARD_NUMBERS_COUNT: usize = 15;
    /// Numeric cell values are multiples of this step
    pub const BOARD_NUMBER_STEP: u32 = 5;

    /// Prize of the bonus square on the multiplied board
    pub const BONUS_CELL_PRIZE: u32 = 500;
    /// Multiplier applied to numeric cells on the bonus board
    pub const BONUS_MULTIPLIER: u32 = 10;
    /// Rolls granted on entering bonus mode
    pub const BONUS_FREE_SPINS: u32 = 3;

    /// Dice face range (two dice per roll)
    pub const DICE_MIN: u8 = 1;
    pub const DICE_MAX: u8 = 6;
}

/// True if `balance` can cover another regular-mode roll.
///
/// Shared by the pre-roll refusal check and the post-roll availability
/// recomputation so the two can never disagree.
#[inline]
pub fn can_afford_roll(balance: i64) -> bool {
    balance >= consts::ROLL_COST
}
