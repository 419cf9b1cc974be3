//! Game session: mode selection and the uniform read model
//!
//! The presentation layer talks to a `GameSession` only. Whether the rules
//! run in-process or on a remote backend is decided once, at construction,
//! and the two are indistinguishable through this surface. Remote failures
//! (network or payload validation) are absorbed by falling back to the local
//! simulation on a freshly generated board; interaction never hard-fails.

use serde::{Deserialize, Serialize};

use crate::backend::GameStateResponse;
use crate::sim::{self, Cell, GameEvent, GameState};

#[cfg(not(target_arch = "wasm32"))]
use crate::backend::{BackendError, GameBackend, RemoteBackend, RollResponse};
#[cfg(not(target_arch = "wasm32"))]
use crate::consts::BOARD_SIZE;

/// Where the game rules run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// In-process simulation
    Local,
    /// Remote backend over HTTP
    Remote { base_url: String },
}

enum Driver {
    Local(GameState),
    #[cfg(not(target_arch = "wasm32"))]
    Remote {
        backend: Box<dyn GameBackend>,
        view: GameStateResponse,
        current_index: usize,
        events: Vec<GameEvent>,
    },
}

/// A running game, local or remote, behind one read model
pub struct GameSession {
    driver: Driver,
    seed: u64,
}

impl GameSession {
    pub fn new(mode: Mode, seed: u64) -> Self {
        let driver = match mode {
            Mode::Local => Driver::Local(GameState::new(seed)),
            Mode::Remote { base_url } => Self::connect_remote(&base_url, seed),
        };
        Self { driver, seed }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn connect_remote(base_url: &str, seed: u64) -> Driver {
        let connect = || -> Result<Driver, BackendError> {
            let mut backend = RemoteBackend::new(base_url)?;
            let view = backend.fetch_state()?;
            Ok(Driver::Remote {
                backend: Box::new(backend),
                view,
                current_index: 0,
                events: Vec::new(),
            })
        };
        match connect() {
            Ok(driver) => {
                log::info!("connected to backend at {base_url}");
                driver
            }
            Err(err) => {
                log::warn!("backend unavailable ({err}), using local simulation");
                Driver::Local(GameState::new(seed))
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn connect_remote(_base_url: &str, seed: u64) -> Driver {
        // The browser build leaves HTTP to the presentation layer
        log::warn!("remote mode is not available in the browser build, using local simulation");
        Driver::Local(GameState::new(seed))
    }

    /// Wrap an already-constructed backend (tests, custom transports)
    #[cfg(all(test, not(target_arch = "wasm32")))]
    pub(crate) fn with_backend(mut backend: Box<dyn GameBackend>, seed: u64) -> Self {
        let driver = match backend.fetch_state() {
            Ok(view) => Driver::Remote {
                backend,
                view,
                current_index: 0,
                events: Vec::new(),
            },
            Err(err) => {
                log::warn!("backend unavailable ({err}), using local simulation");
                Driver::Local(GameState::new(seed))
            }
        };
        Self { driver, seed }
    }

    // === Read model ===

    pub fn is_local(&self) -> bool {
        matches!(self.driver, Driver::Local(_))
    }

    pub fn balance(&self) -> i64 {
        match &self.driver {
            Driver::Local(state) => state.balance,
            #[cfg(not(target_arch = "wasm32"))]
            Driver::Remote { view, .. } => view.balance,
        }
    }

    pub fn dice(&self) -> Option<(u8, u8)> {
        match &self.driver {
            Driver::Local(state) => state.dice_result,
            #[cfg(not(target_arch = "wasm32"))]
            Driver::Remote { view, .. } => view.dice_result,
        }
    }

    pub fn last_prize(&self) -> Option<u32> {
        match &self.driver {
            Driver::Local(state) => state.last_prize_won,
            #[cfg(not(target_arch = "wasm32"))]
            Driver::Remote { view, .. } => view.last_prize_won,
        }
    }

    pub fn available_to_spin(&self) -> bool {
        match &self.driver {
            Driver::Local(state) => state.available_to_spin,
            #[cfg(not(target_arch = "wasm32"))]
            Driver::Remote { view, .. } => view.available_to_spin,
        }
    }

    pub fn bonus_mode(&self) -> bool {
        match &self.driver {
            Driver::Local(state) => state.bonus_mode,
            #[cfg(not(target_arch = "wasm32"))]
            Driver::Remote { view, .. } => view.bonus_mode,
        }
    }

    pub fn freespins(&self) -> u32 {
        match &self.driver {
            Driver::Local(state) => state.freespin_amount,
            #[cfg(not(target_arch = "wasm32"))]
            Driver::Remote { view, .. } => view.freespin_amount,
        }
    }

    /// Pawn position on the active board
    pub fn current_index(&self) -> usize {
        match &self.driver {
            Driver::Local(state) => state.current_index,
            #[cfg(not(target_arch = "wasm32"))]
            Driver::Remote { current_index, .. } => *current_index,
        }
    }

    /// Cells of the board currently in play
    pub fn board(&self) -> &[Cell] {
        match &self.driver {
            Driver::Local(state) => state.active_board().cells(),
            #[cfg(not(target_arch = "wasm32"))]
            Driver::Remote { view, .. } => view.active_board(),
        }
    }

    /// Full state in the wire shape (snapshots for the UI)
    pub fn snapshot(&self) -> GameStateResponse {
        match &self.driver {
            Driver::Local(state) => GameStateResponse::from_state(state),
            #[cfg(not(target_arch = "wasm32"))]
            Driver::Remote { view, .. } => view.clone(),
        }
    }

    /// Drain the events produced by the last command
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        match &mut self.driver {
            Driver::Local(state) => state.take_events(),
            #[cfg(not(target_arch = "wasm32"))]
            Driver::Remote { events, .. } => std::mem::take(events),
        }
    }

    /// Terminal condition, decided here rather than inside the engine: the
    /// player is broke and has no free spins left to recover with. Consumers
    /// react (notice + reset); the engine itself never terminates.
    pub fn out_of_credits(&self) -> bool {
        self.balance() <= 0 && !self.bonus_mode()
    }

    // === Commands ===

    pub fn roll(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let failure = match &mut self.driver {
                Driver::Local(_) => None,
                Driver::Remote {
                    backend,
                    view,
                    current_index,
                    events,
                } => {
                    events.clear();
                    if !view.available_to_spin {
                        events.push(GameEvent::RollRefused);
                        log::warn!("roll refused: no spin available");
                        return;
                    }
                    let outcome = backend
                        .roll()
                        .and_then(|r| Ok((r, backend.fetch_state()?)));
                    match outcome {
                        Ok((roll, new_view)) => {
                            apply_remote_roll(view, current_index, events, roll, new_view);
                            return;
                        }
                        Err(err) => Some(err),
                    }
                }
            };
            if let Some(err) = failure {
                self.fall_back(&err);
            }
        }

        if let Driver::Local(state) = &mut self.driver {
            sim::roll(state);
        }
    }

    pub fn reset(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let failure = match &mut self.driver {
                Driver::Local(_) => None,
                Driver::Remote {
                    backend,
                    view,
                    current_index,
                    events,
                } => match backend.reset() {
                    Ok(new_view) => {
                        events.clear();
                        events.push(GameEvent::GameReset);
                        *current_index = 0;
                        *view = new_view;
                        return;
                    }
                    Err(err) => Some(err),
                },
            };
            if let Some(err) = failure {
                self.fall_back(&err);
            }
        }

        if let Driver::Local(state) = &mut self.driver {
            sim::reset(state);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn fall_back(&mut self, err: &BackendError) {
        log::warn!("backend failed ({err}), falling back to local simulation");
        self.driver = Driver::Local(GameState::new(self.seed));
    }
}

/// Fold a completed remote roll into the session view.
///
/// The wire model carries no pawn position, so the backend's dice are
/// replayed through the same ring advance the local simulation uses; on a
/// bonus-entry transition the pawn stays on its pre-roll square.
#[cfg(not(target_arch = "wasm32"))]
fn apply_remote_roll(
    view: &mut GameStateResponse,
    current_index: &mut usize,
    events: &mut Vec<GameEvent>,
    roll: RollResponse,
    new_view: GameStateResponse,
) {
    let (d1, d2) = roll.dice_result;
    events.push(GameEvent::DiceRolled { d1, d2 });

    let entered_bonus = new_view.bonus_mode && !view.bonus_mode;
    let exited_bonus = !new_view.bonus_mode && view.bonus_mode;
    if entered_bonus {
        events.push(GameEvent::BonusEntered);
    } else {
        *current_index = (*current_index + (d1 + d2) as usize) % BOARD_SIZE;
    }
    if exited_bonus {
        events.push(GameEvent::BonusExited);
    }
    if let Some(prize) = new_view.last_prize_won {
        if prize > 0 {
            events.push(GameEvent::PrizeWon { amount: prize });
        }
    }
    *view = new_view;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, LocalBackend, RollResponse};
    use crate::consts::*;

    #[test]
    fn test_local_session_plays_by_the_rules() {
        let mut session = GameSession::new(Mode::Local, 42);
        assert_eq!(session.balance(), INITIAL_BALANCE);
        assert!(session.is_local());
        assert_eq!(session.board().len(), BOARD_SIZE);

        let board_before: Vec<Cell> = session.board().to_vec();
        let index_before = session.current_index();
        session.roll();

        let events = session.take_events();
        assert!(!events.is_empty());
        let (d1, d2) = session.dice().unwrap();
        let landed = board_before[(index_before + (d1 + d2) as usize) % BOARD_SIZE];
        if session.bonus_mode() {
            assert_eq!(session.balance(), INITIAL_BALANCE);
            assert_eq!(session.freespins(), BONUS_FREE_SPINS);
        } else {
            assert_eq!(
                session.balance(),
                INITIAL_BALANCE - ROLL_COST + landed.payout() as i64
            );
        }
    }

    #[test]
    fn test_local_session_reset() {
        let mut session = GameSession::new(Mode::Local, 7);
        session.roll();
        session.reset();
        assert_eq!(session.balance(), INITIAL_BALANCE);
        assert_eq!(session.current_index(), 0);
        assert!(session.dice().is_none());
        assert_eq!(session.take_events(), vec![GameEvent::GameReset]);
    }

    #[test]
    fn test_out_of_credits_policy() {
        let mut session = GameSession::new(Mode::Local, 9);
        assert!(!session.out_of_credits());

        if let Driver::Local(state) = &mut session.driver {
            state.balance = 0;
        }
        assert!(session.out_of_credits());

        // Free spins can still recover a broke balance
        if let Driver::Local(state) = &mut session.driver {
            state.bonus_mode = true;
            state.bonus_board = Some(state.regular_board.to_bonus());
            state.freespin_amount = 2;
        }
        assert!(!session.out_of_credits());
    }

    /// Backend stub that serves one state fetch, then dies
    struct FlakyBackend {
        inner: LocalBackend,
        calls: u32,
    }

    impl GameBackend for FlakyBackend {
        fn fetch_state(&mut self) -> Result<GameStateResponse, BackendError> {
            self.calls += 1;
            if self.calls > 1 {
                return Err(BackendError::Payload("connection lost".into()));
            }
            self.inner.fetch_state()
        }

        fn roll(&mut self) -> Result<RollResponse, BackendError> {
            Err(BackendError::Payload("connection lost".into()))
        }

        fn reset(&mut self) -> Result<GameStateResponse, BackendError> {
            Err(BackendError::Payload("connection lost".into()))
        }

        fn fetch_board(&mut self) -> Result<crate::sim::Board, BackendError> {
            Err(BackendError::Payload("connection lost".into()))
        }
    }

    #[test]
    fn test_remote_session_reads_backend_state() {
        let backend = LocalBackend::new(11);
        let mut session = GameSession::with_backend(Box::new(backend), 11);
        assert!(!session.is_local());
        assert_eq!(session.balance(), INITIAL_BALANCE);

        session.roll();
        assert!(session.dice().is_some());
        let events = session.take_events();
        let Some(GameEvent::DiceRolled { d1, d2 }) = events.first().copied() else {
            panic!("expected dice event, got {events:?}");
        };
        if session.bonus_mode() {
            // Pawn pinned on bonus entry
            assert_eq!(session.current_index(), 0);
        } else {
            assert_eq!(session.current_index(), (d1 + d2) as usize % BOARD_SIZE);
        }
    }

    #[test]
    fn test_remote_failure_falls_back_to_local() {
        let backend = FlakyBackend {
            inner: LocalBackend::new(3),
            calls: 0,
        };
        let mut session = GameSession::with_backend(Box::new(backend), 3);
        assert!(!session.is_local());

        // The next command hits the dead backend and degrades seamlessly
        session.roll();
        assert!(session.is_local());
        assert!(session.dice().is_some());
        assert_eq!(session.board().len(), BOARD_SIZE);
    }

    #[test]
    fn test_dead_backend_at_construction_falls_back() {
        let backend = FlakyBackend {
            inner: LocalBackend::new(4),
            calls: 99,
        };
        let session = GameSession::with_backend(Box::new(backend), 4);
        assert!(session.is_local());
        assert_eq!(session.balance(), INITIAL_BALANCE);
    }
}
