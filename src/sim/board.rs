//! Board generation and validation
//!
//! A board is 16 cells: the values {5, 10, ..., 75} shuffled uniformly plus
//! one bonus square at a uniform-random position. The same validation
//! predicate gates locally generated boards and payloads received from the
//! backend.

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Board, Cell};
use crate::consts::*;

impl Board {
    /// Generate a fresh ring
    pub fn generate(rng: &mut impl Rng) -> Self {
        loop {
            let mut numbers: Vec<u32> = (1..=BOARD_NUMBERS_COUNT as u32)
                .map(|i| i * BOARD_NUMBER_STEP)
                .collect();
            numbers.shuffle(rng);
            let insert_index = rng.random_range(0..BOARD_SIZE);

            let mut cells = [Cell::Bonus; BOARD_SIZE];
            let mut number_index = 0;
            for (i, cell) in cells.iter_mut().enumerate() {
                if i != insert_index {
                    *cell = Cell::Prize(numbers[number_index]);
                    number_index += 1;
                }
            }

            let board = Board(cells);
            if Board::validate(board.cells()) {
                return board;
            }
            // Unreachable given the construction above; regenerate rather
            // than hand out a board that breaks the ring invariants.
            log::error!("generated board failed validation, regenerating");
        }
    }

    /// Multiplied ring for the bonus round: numeric cells x10, the bonus
    /// square replaced with the fixed 500 prize. Index-preserving.
    pub fn to_bonus(&self) -> Self {
        Board(self.0.map(|cell| match cell {
            Cell::Prize(v) => Cell::Prize(v * BONUS_MULTIPLIER),
            Cell::Bonus => Cell::Prize(BONUS_CELL_PRIZE),
        }))
    }

    /// Validation predicate shared with the wire layer: 16 cells, exactly
    /// one bonus square, numeric cells pairwise-distinct multiples of 5 in
    /// 5..=75.
    pub fn validate(cells: &[Cell]) -> bool {
        if cells.len() != BOARD_SIZE {
            return false;
        }
        let mut bonus_count = 0;
        let mut seen = [false; BOARD_NUMBERS_COUNT];
        for &cell in cells {
            match cell {
                Cell::Bonus => bonus_count += 1,
                Cell::Prize(v) => {
                    if v == 0 || v % BOARD_NUMBER_STEP != 0 {
                        return false;
                    }
                    let slot = (v / BOARD_NUMBER_STEP) as usize - 1;
                    if slot >= BOARD_NUMBERS_COUNT || seen[slot] {
                        return false;
                    }
                    seen[slot] = true;
                }
            }
        }
        bonus_count == 1
    }

    /// Accept a board payload if it passes validation
    pub fn try_from_cells(cells: &[Cell]) -> Option<Self> {
        if !Board::validate(cells) {
            return None;
        }
        <[Cell; BOARD_SIZE]>::try_from(cells).ok().map(Board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generated_board_is_valid() {
        for seed in [0u64, 1, 42, 12345, u64::MAX] {
            let board = Board::generate(&mut Pcg32::seed_from_u64(seed));
            assert!(Board::validate(board.cells()), "seed {seed}");
            assert!(board.bonus_index().is_some());
        }
    }

    #[test]
    fn test_bonus_board_derivation() {
        let board = Board::generate(&mut Pcg32::seed_from_u64(7));
        let bonus = board.to_bonus();
        for (i, cell) in board.cells().iter().enumerate() {
            match *cell {
                Cell::Prize(v) => assert_eq!(bonus.cell(i), Cell::Prize(v * 10)),
                Cell::Bonus => assert_eq!(bonus.cell(i), Cell::Prize(500)),
            }
        }
    }

    #[test]
    fn test_validate_rejects_wrong_length() {
        let board = Board::generate(&mut Pcg32::seed_from_u64(3));
        assert!(!Board::validate(&board.cells()[..15]));
        let mut long = board.cells().to_vec();
        long.push(Cell::Prize(5));
        assert!(!Board::validate(&long));
    }

    #[test]
    fn test_validate_rejects_bad_bonus_count() {
        let board = Board::generate(&mut Pcg32::seed_from_u64(3));
        let bonus_at = board.bonus_index().unwrap();

        // Second bonus square
        let mut two = board.cells().to_vec();
        two[(bonus_at + 1) % 16] = Cell::Bonus;
        assert!(!Board::validate(&two));

        // No bonus square (creates a duplicate too, but bonus count alone
        // must already fail)
        let none: Vec<Cell> = (1..=16).map(|i| Cell::Prize(i * 5)).collect();
        assert!(!Board::validate(&none));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let board = Board::generate(&mut Pcg32::seed_from_u64(9));
        let bonus_at = board.bonus_index().unwrap();
        let numeric_at = (bonus_at + 1) % 16;

        for bad in [Cell::Prize(0), Cell::Prize(7), Cell::Prize(80)] {
            let mut cells = board.cells().to_vec();
            cells[numeric_at] = bad;
            assert!(!Board::validate(&cells), "{bad:?} accepted");
        }

        // Duplicate numeric value
        let mut cells = board.cells().to_vec();
        let dup = cells
            .iter()
            .find_map(|c| match c {
                Cell::Prize(v) if cells[numeric_at] != Cell::Prize(*v) => Some(*v),
                _ => None,
            })
            .unwrap();
        cells[numeric_at] = Cell::Prize(dup);
        assert!(!Board::validate(&cells));
    }

    #[test]
    fn test_try_from_cells_roundtrip() {
        let board = Board::generate(&mut Pcg32::seed_from_u64(21));
        let accepted = Board::try_from_cells(board.cells()).unwrap();
        assert_eq!(accepted, board);
        assert!(Board::try_from_cells(&board.cells()[..10]).is_none());
    }

    proptest! {
        #[test]
        fn prop_any_seed_yields_valid_board(seed: u64) {
            let board = Board::generate(&mut Pcg32::seed_from_u64(seed));
            prop_assert!(Board::validate(board.cells()));
            let numbers: Vec<u32> = board
                .cells()
                .iter()
                .filter_map(|c| match c {
                    Cell::Prize(v) => Some(*v),
                    Cell::Bonus => None,
                })
                .collect();
            prop_assert_eq!(numbers.len(), 15);
        }
    }
}
