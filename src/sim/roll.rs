//! Roll and reset state transitions
//!
//! `roll` draws dice from the state's own RNG stream; `apply_roll` is the
//! actual transition and takes the dice explicitly, so known rolls (tests,
//! dice reported by the remote backend) replay through the exact same rules.

use rand::Rng;

use super::state::{Board, GameEvent, GameState};
use crate::can_afford_roll;
use crate::consts::*;

/// Draw two dice and advance the game by one roll
pub fn roll(state: &mut GameState) {
    if !state.bonus_mode && !can_afford_roll(state.balance) {
        refuse(state);
        return;
    }
    let mut rng = state.rng_state.next_rng();
    let d1 = rng.random_range(DICE_MIN..=DICE_MAX);
    let d2 = rng.random_range(DICE_MIN..=DICE_MAX);
    apply_roll(state, d1, d2);
}

/// Apply a roll with known dice
pub fn apply_roll(state: &mut GameState, d1: u8, d2: u8) {
    state.events.clear();

    // Callers are expected to check `available_to_spin`, but the engine
    // re-validates: outside bonus mode a roll costs 50 up front.
    if !state.bonus_mode && !can_afford_roll(state.balance) {
        refuse(state);
        return;
    }

    let sum = (d1 + d2) as usize;
    let board_len = state.active_board().cells().len();
    let target = (state.current_index + sum) % board_len;
    let landed = state.active_board().cell(target);

    state.dice_result = Some((d1, d2));
    state.events.push(GameEvent::DiceRolled { d1, d2 });

    if landed.is_bonus() && !state.bonus_mode {
        // Entering the bonus round. The pawn keeps its pre-roll square and
        // the triggering roll is free: the regular-mode debit below never
        // runs for this branch.
        state.bonus_board = Some(state.regular_board.to_bonus());
        state.last_prize_won = Some(0);
        state.bonus_mode = true;
        state.freespin_amount = BONUS_FREE_SPINS;
        state.available_to_spin = true;
        state.events.push(GameEvent::BonusEntered);
        log::info!("bonus mode entered, {BONUS_FREE_SPINS} free spins");
        return;
    }

    if state.bonus_mode {
        // Free spin: prizes are credited, nothing is debited.
        let won = landed.payout();
        state.balance += won as i64;
        state.last_prize_won = Some(won);
        if won > 0 {
            state.events.push(GameEvent::PrizeWon { amount: won });
        }
        state.freespin_amount = state.freespin_amount.saturating_sub(1);
        if state.freespin_amount == 0 {
            // Back to the regular round on a fresh shuffle so multiplied
            // values never bleed into the next board.
            state.bonus_mode = false;
            state.bonus_board = None;
            let mut rng = state.rng_state.next_rng();
            state.regular_board = Board::generate(&mut rng);
            state.events.push(GameEvent::BonusExited);
            log::info!("bonus round finished, regular board regenerated");
        }
        state.current_index = target;
        return;
    }

    // Regular roll: flat cost, prize credited, availability recomputed with
    // the same threshold the refusal check uses.
    let won = landed.payout();
    state.balance = state.balance - ROLL_COST + won as i64;
    state.last_prize_won = Some(won);
    state.available_to_spin = can_afford_roll(state.balance);
    if won > 0 {
        state.events.push(GameEvent::PrizeWon { amount: won });
    }
    state.current_index = target;
}

/// Reset the session to its initial values on a freshly shuffled board
pub fn reset(state: &mut GameState) {
    state.events.clear();
    state.balance = INITIAL_BALANCE;
    state.dice_result = None;
    state.last_prize_won = None;
    state.available_to_spin = true;
    state.bonus_mode = false;
    state.bonus_board = None;
    state.freespin_amount = 0;
    let mut rng = state.rng_state.next_rng();
    state.regular_board = Board::generate(&mut rng);
    state.current_index = 0;
    state.events.push(GameEvent::GameReset);
    log::info!("game reset");
}

fn refuse(state: &mut GameState) {
    state.events.clear();
    state.available_to_spin = false;
    state.events.push(GameEvent::RollRefused);
    log::warn!(
        "roll refused: balance {} below cost {ROLL_COST}",
        state.balance
    );
}
