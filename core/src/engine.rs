use alloc::borrow::Cow;
use serde::{Deserialize, Serialize};

use crate::*;

/// Values at or above this are terminal.
pub const LOCK_THRESHOLD: CellValue = 15;

/// Defensive cap on ripple recursion. Chains travel strictly right or down,
/// so genuine depth never exceeds four hops on a 3×3 board.
const MAX_RIPPLE_DEPTH: usize = CELL_TOTAL as usize;

/// True iff the value has reached the locked terminal state.
///
/// Lock status is always recomputed from the value, never stored.
pub const fn is_locked(value: CellValue) -> bool {
    value >= LOCK_THRESHOLD
}

/// The two ripple rules, in evaluation order.
#[derive(Copy, Clone, Debug, PartialEq)]
enum RippleRule {
    DivisibleBy3,
    DivisibleBy5,
}

impl RippleRule {
    const ALL: [Self; 2] = [Self::DivisibleBy3, Self::DivisibleBy5];

    const fn divisor(self) -> CellValue {
        match self {
            Self::DivisibleBy3 => 3,
            Self::DivisibleBy5 => 5,
        }
    }

    /// Zero never triggers a rule, even though it divides evenly.
    const fn triggers(self, value: CellValue) -> bool {
        value != 0 && value % self.divisor() == 0
    }

    const fn delta(self) -> CellValue {
        match self {
            Self::DivisibleBy3 => -1,
            Self::DivisibleBy5 => 2,
        }
    }

    const fn target(self, (row, col): Coord2) -> Coord2 {
        match self {
            Self::DivisibleBy3 => (row, col + 1),
            Self::DivisibleBy5 => (row + 1, col),
        }
    }
}

/// Applies both ripple rules to the freshly written `value` at `coords`,
/// chaining depth-first into every applied write before the next rule runs.
///
/// Off-board targets fall away; locked targets are never written, but a
/// suppressed write does not stop the sibling rule.
fn ripple_from(grid: &mut Grid, coords: Coord2, value: CellValue, depth: usize) {
    if depth >= MAX_RIPPLE_DEPTH {
        return;
    }

    for rule in RippleRule::ALL {
        if !rule.triggers(value) {
            continue;
        }

        let target = rule.target(coords);
        let Some(current) = grid.get(target) else {
            continue;
        };
        if is_locked(current) {
            continue;
        }

        let written = current + rule.delta();
        grid[target] = written;
        log::trace!(
            "{:?} at {:?} wrote {} to {:?}",
            rule,
            coords,
            written,
            target
        );
        if is_locked(written) {
            log::debug!("cell {:?} locked at {} by ripple", target, written);
        }

        ripple_from(grid, target, written, depth + 1);
    }
}

/// Computes the successor of `grid` for a click at `(row, col)`.
///
/// The clicked cell is always incremented by exactly 1, then ripple rules
/// run against its new value, chaining into neighbors as further divisible
/// values appear.
///
/// `Cow::Borrowed` is the no-op signal: the position was off the board or
/// the target cell was already locked, and the input comes back untouched.
/// Both checks read the pre-update grid.
pub fn update_grid(grid: &Grid, row: Coord, col: Coord) -> Cow<'_, Grid> {
    if !is_valid_position(row, col) {
        return Cow::Borrowed(grid);
    }

    let coords = (row, col);
    if is_locked(grid[coords]) {
        return Cow::Borrowed(grid);
    }

    let mut next = grid.clone();
    let clicked = next[coords] + 1;
    next[coords] = clicked;
    if is_locked(clicked) {
        log::debug!("cell {:?} locked at {}", coords, clicked);
    }

    ripple_from(&mut next, coords, clicked, 0);

    Cow::Owned(next)
}

/// A play session: holds the current board and replaces it with engine
/// output, never mutating it in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    grid: Grid,
}

impl GameState {
    /// Fresh session over the all-zero board.
    pub fn new() -> Self {
        Self {
            grid: Grid::zeroed(),
        }
    }

    /// Resumes a session from a board snapshot.
    pub fn with_grid(grid: Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Applies one click, replacing the held grid when anything changed.
    pub fn click(&mut self, row: Coord, col: Coord) -> ClickOutcome {
        let next = match update_grid(&self.grid, row, col) {
            Cow::Borrowed(_) => return ClickOutcome::NoChange,
            Cow::Owned(next) => next,
        };
        self.grid = next;
        ClickOutcome::Applied
    }

    /// Back to the all-zero starting state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// False for off-board coordinates.
    pub fn is_cell_locked(&self, row: Coord, col: Coord) -> bool {
        self.grid.get((row, col)).is_some_and(is_locked)
    }

    pub fn stats(&self) -> GridStats {
        self.grid.stats()
    }

    pub fn status(&self) -> BoardStatus {
        if self.stats().all_locked() {
            BoardStatus::Terminated
        } else {
            BoardStatus::Operational
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
