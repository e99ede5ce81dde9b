//! Territory resolution and captures.
//!
//! The empty cells are split into maximal 8-connected regions. A region
//! becomes territory of a player when every occupied cell around it
//! (diagonals included) belongs to that player, and the region is small
//! enough to count as enclosed.

use tracing::debug;

use crate::{
    neighbors, Agent, BitBoard, BoardState, Cell, GameError, Grid, PieceId, PieceState,
    Territory, BOARD_SIZE, CATHEDRAL, NUM_CELLS,
};

/// Regions with more cells than this are too large to be territory (yet).
pub const MAX_TERRITORY_SIZE: u32 = 4 * BOARD_SIZE as u32;

/// The ownership of every empty cell, as computed by [`resolve()`].
///
/// Occupied cells are always [`Territory::Unclaimed`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerritoryMap {
    owned: [BitBoard; 2],
    invalid: BitBoard,
}

impl TerritoryMap {
    pub fn get(&self, x: i8, y: i8) -> Territory {
        if self.owned[0].contains(x, y) {
            Territory::Owned(Agent::PlayerA)
        } else if self.owned[1].contains(x, y) {
            Territory::Owned(Agent::PlayerB)
        } else if self.invalid.contains(x, y) {
            Territory::Invalid
        } else {
            Territory::Unclaimed
        }
    }

    pub fn owned_by(&self, agent: Agent) -> BitBoard {
        self.owned[agent.index()]
    }

    pub fn invalid(&self) -> BitBoard {
        self.invalid
    }

    /// Number of cells owned by either player.
    pub fn num_owned(&self) -> u32 {
        (self.owned[0] | self.owned[1]).num_entries()
    }

    fn assign(&mut self, cells: BitBoard, territory: Territory) {
        match territory {
            Territory::Owned(agent) => self.owned[agent.index()] |= cells,
            Territory::Invalid => self.invalid |= cells,
            Territory::Unclaimed => {}
        }
    }

    /// A snapshot indexed by `[x][y]`.
    pub fn to_rows(&self) -> [[Territory; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let mut rows = [[Territory::Unclaimed; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for (territory, cells) in [
            (Territory::Owned(Agent::PlayerA), self.owned[0]),
            (Territory::Owned(Agent::PlayerB), self.owned[1]),
            (Territory::Invalid, self.invalid),
        ] {
            for (x, y) in cells {
                rows[x as usize][y as usize] = territory;
            }
        }
        rows
    }
}

/// What a flood fill has seen of one region so far.
#[derive(Default)]
struct Region {
    cells: BitBoard,
    borders_player: [bool; 2],
    borders_cathedral: bool,
    /// Set as soon as the border rules out ownership, whatever else turns up.
    contested: bool,
}

impl Region {
    fn observe_border(&mut self, cell: Cell) {
        if self.contested {
            return;
        }
        match cell {
            Cell::Empty => return,
            Cell::PlayerA => self.borders_player[0] = true,
            Cell::PlayerB => self.borders_player[1] = true,
            Cell::Cathedral => self.borders_cathedral = true,
        }
        let borders_any_player = self.borders_player[0] || self.borders_player[1];
        self.contested = (self.borders_player[0] && self.borders_player[1])
            || (borders_any_player && self.borders_cathedral);
    }

    fn classify(&self) -> Territory {
        if self.contested || self.cells.num_entries() > MAX_TERRITORY_SIZE {
            Territory::Invalid
        } else if self.borders_player[0] {
            Territory::Owned(Agent::PlayerA)
        } else if self.borders_player[1] {
            Territory::Owned(Agent::PlayerB)
        } else {
            // Only the cathedral around it
            Territory::Unclaimed
        }
    }
}

/// Partitions the empty cells of `grid` into regions and decides who owns them.
///
/// Every empty cell is taken out of the pending set exactly once, so this is
/// linear in the size of the board.
pub fn resolve(grid: &Grid) -> TerritoryMap {
    let mut territory = TerritoryMap::default();
    let mut pending = grid.empty_cells();
    let mut queue = Vec::with_capacity(NUM_CELLS);

    while let Some((x, y)) = pending.first() {
        pending = pending.remove(x, y);
        queue.push((x, y));
        let mut region = Region::default();

        while let Some((x, y)) = queue.pop() {
            region.cells = region.cells.insert(x, y);
            for (nx, ny) in neighbors(x, y) {
                if pending.contains(nx, ny) {
                    pending = pending.remove(nx, ny);
                    queue.push((nx, ny));
                } else {
                    // Either occupied, or an empty cell of this same region
                    region.observe_border(grid.cell(nx, ny));
                }
            }
        }

        territory.assign(region.cells, region.classify());
    }
    territory
}

/// Signed number of newly owned cells (by either player).
pub fn territory_delta(before: &TerritoryMap, after: &TerritoryMap) -> i32 {
    after.num_owned() as i32 - before.num_owned() as i32
}

/// The result of [`resolve_captures()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureReport {
    pub captured: Vec<PieceId>,
    pub captured_size: u32,
    /// Owned cells gained relative to the territory before the move.
    pub territory_delta: i32,
}

/// Captures the pieces enclosed by the territory of `mover`, then recomputes
/// the territory of the board.
///
/// Candidates are the placed pieces of the opponent and, only when player A
/// moves, the cathedral. Each candidate is lifted off a copy of the grid; if
/// all its cells then lie in territory of `mover`, the capture is committed to
/// the real board. Later candidates see the earlier captures.
pub fn resolve_captures(state: &mut BoardState, mover: Agent) -> Result<CaptureReport, GameError> {
    let before = *state.territory();
    let opponent = mover.opponent();

    let mut candidates: Vec<(Agent, PieceId)> = state
        .placed(opponent)
        .into_iter()
        .filter(|&piece| piece != CATHEDRAL)
        .map(|piece| (opponent, piece))
        .collect();
    // Player B cannot capture the cathedral.
    if mover == Agent::PlayerA && state.placed(Agent::PlayerA).contains(CATHEDRAL) {
        candidates.push((Agent::PlayerA, CATHEDRAL));
    }

    let mut captured = Vec::new();
    let mut captured_size = 0;
    for (owner, piece) in candidates {
        let Some(PieceState::Placed(placement)) = state.piece_state(owner, piece) else {
            continue;
        };
        let mut working = *state.grid();
        working.vacate(placement.cells);
        let enclosed = resolve(&working).owned_by(mover);
        if placement.cells.is_subset(enclosed) {
            state.remove(owner, piece)?;
            debug!(%mover, %owner, piece, "Captured piece");
            captured.push(piece);
            captured_size += placement.cells.num_entries();
        }
    }

    let territory = resolve(state.grid());
    state.set_territory(territory);
    Ok(CaptureReport {
        captured,
        captured_size,
        territory_delta: territory_delta(&before, &territory),
    })
}
