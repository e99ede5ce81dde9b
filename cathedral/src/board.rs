mod bitboard;

use std::sync::Arc;

pub use bitboard::*;

use crate::{
    catalog, ActionId, ActionIndex, Agent, Cell, GameError, PieceDescriptor, PieceId, PieceSet,
    Rotation, Territory, TerritoryMap, CATHEDRAL,
};

/// Occupancy of the playing grid.
///
/// This is a small [`Copy`] value, so taking a working copy to try something
/// out and throwing it away again is free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    /// The cells of player A, player B and the cathedral, in that order.
    bitboards: [BitBoard; 3],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if self.bitboards[0].contains(x, y) {
            Cell::PlayerA
        } else if self.bitboards[1].contains(x, y) {
            Cell::PlayerB
        } else if self.bitboards[2].contains(x, y) {
            Cell::Cathedral
        } else {
            Cell::Empty
        }
    }

    pub fn set_cell(&mut self, x: i8, y: i8, value: Cell) {
        self.fill(BitBoard::empty().insert(x, y), value);
    }

    /// Sets every cell in `cells` to `value`.
    pub fn fill(&mut self, cells: BitBoard, value: Cell) {
        for bitboard in &mut self.bitboards {
            *bitboard &= !cells;
        }
        if value != Cell::Empty {
            self.bitboards[value.code() as usize - 1] |= cells;
        }
    }

    pub fn vacate(&mut self, cells: BitBoard) {
        self.fill(cells, Cell::Empty);
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.occupied().contains(x, y)
    }

    pub fn occupied(&self) -> BitBoard {
        self.bitboards[0] | self.bitboards[1] | self.bitboards[2]
    }

    pub fn empty_cells(&self) -> BitBoard {
        !self.occupied()
    }

    /// All cells holding `value`.
    pub fn cells_with(&self, value: Cell) -> BitBoard {
        match value {
            Cell::Empty => self.empty_cells(),
            _ => self.bitboards[value.code() as usize - 1],
        }
    }

    /// A snapshot indexed by `[x][y]`.
    pub fn to_rows(&self) -> [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let mut rows = [[Cell::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for value in [Cell::PlayerA, Cell::PlayerB, Cell::Cathedral] {
            for (x, y) in self.cells_with(value) {
                rows[x as usize][y as usize] = value;
            }
        }
        rows
    }
}

/// Where a piece sits on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub action: ActionId,
    pub cells: BitBoard,
    pub position: (i8, i8),
    pub rotation: Rotation,
}

/// Lifecycle of a single piece.
///
/// `Captured` is only ever reached by the cathedral. Other pieces go back to
/// `Unplaced` when they are captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceState {
    Unplaced,
    Placed(Placement),
    Captured,
}

/// The grid, the territory, and the pieces of both agents.
///
/// This is a passive store: it does not check the rules of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    actions: Arc<ActionIndex>,
    grid: Grid,
    territory: TerritoryMap,
    /// Indexed by agent, then by piece id.
    pieces: [Vec<PieceState>; 2],
}

impl BoardState {
    /// An empty board with all pieces unplaced.
    pub fn new(actions: Arc<ActionIndex>) -> Self {
        Self {
            actions,
            grid: Grid::new(),
            territory: TerritoryMap::default(),
            pieces: Agent::BOTH.map(|agent| vec![PieceState::Unplaced; catalog(agent).len()]),
        }
    }

    pub fn actions(&self) -> &ActionIndex {
        &self.actions
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, x: i8, y: i8) -> Cell {
        self.grid.cell(x, y)
    }

    pub fn set_cell(&mut self, x: i8, y: i8, value: Cell) {
        self.grid.set_cell(x, y, value);
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.grid.is_occupied(x, y)
    }

    pub fn territory(&self) -> &TerritoryMap {
        &self.territory
    }

    pub fn territory_at(&self, x: i8, y: i8) -> Territory {
        self.territory.get(x, y)
    }

    pub(crate) fn set_territory(&mut self, territory: TerritoryMap) {
        self.territory = territory;
    }

    /// Returns `None` if the agent has no such piece.
    pub fn piece_state(&self, agent: Agent, piece: PieceId) -> Option<PieceState> {
        self.pieces[agent.index()].get(piece).copied()
    }

    fn pieces_where(&self, agent: Agent, predicate: impl Fn(&PieceState) -> bool) -> PieceSet {
        self.pieces[agent.index()]
            .iter()
            .enumerate()
            .filter(|(_, state)| predicate(state))
            .map(|(piece, _)| piece)
            .collect()
    }

    pub fn unplaced(&self, agent: Agent) -> PieceSet {
        self.pieces_where(agent, |state| *state == PieceState::Unplaced)
    }

    pub fn placed(&self, agent: Agent) -> PieceSet {
        self.pieces_where(agent, |state| matches!(state, PieceState::Placed(_)))
    }

    pub fn captured(&self, agent: Agent) -> PieceSet {
        self.pieces_where(agent, |state| *state == PieceState::Captured)
    }

    /// The unplaced pieces, by ascending id.
    pub fn unplaced_pieces(&self, agent: Agent) -> Vec<PieceDescriptor> {
        let templates = catalog(agent);
        self.unplaced(agent)
            .into_iter()
            .map(|id| PieceDescriptor {
                id,
                label: templates[id].label,
                size: templates[id].size(),
            })
            .collect()
    }

    /// Total number of cells of the unplaced pieces.
    pub fn remaining_size(&self, agent: Agent) -> u32 {
        let templates = catalog(agent);
        self.unplaced(agent)
            .into_iter()
            .map(|piece| templates[piece].size())
            .sum()
    }

    /// Puts the piece of `action` on the board.
    ///
    /// The caller must have checked that the move is legal. The cathedral is
    /// written as a neutral cell.
    pub fn place(&mut self, agent: Agent, action: ActionId) -> Result<Placement, GameError> {
        let (piece, footprint) = self.actions.lookup(agent, action)?;
        let placement = Placement {
            action,
            cells: footprint.cells,
            position: footprint.position,
            rotation: footprint.rotation,
        };
        let state = &mut self.pieces[agent.index()][piece];
        if *state != PieceState::Unplaced {
            debug_assert!(false, "{agent} placed piece {piece} which is {state:?}");
            return Err(GameError::InvariantViolation {
                agent,
                piece,
                message: "placing a piece that is not unplaced",
            });
        }
        *state = PieceState::Placed(placement);

        let value = if piece == CATHEDRAL {
            Cell::Cathedral
        } else {
            Cell::of_agent(agent)
        };
        self.grid.fill(placement.cells, value);
        Ok(placement)
    }

    /// Takes a placed piece off the board and returns the cells it covered.
    ///
    /// The piece goes back to the unplaced pool, except for the cathedral,
    /// which stays captured for the rest of the game.
    pub fn remove(&mut self, agent: Agent, piece: PieceId) -> Result<BitBoard, GameError> {
        let placement = match self.piece_state(agent, piece) {
            Some(PieceState::Placed(placement)) => placement,
            other => {
                debug_assert!(false, "{agent} removed piece {piece} which is {other:?}");
                return Err(GameError::InvariantViolation {
                    agent,
                    piece,
                    message: "removing a piece that is not on the board",
                });
            }
        };
        self.pieces[agent.index()][piece] = if piece == CATHEDRAL {
            PieceState::Captured
        } else {
            PieceState::Unplaced
        };
        self.grid.vacate(placement.cells);
        Ok(placement.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SQUARE, TAVERN_1};

    fn new_state() -> BoardState {
        BoardState::new(Arc::new(ActionIndex::build()))
    }

    #[test]
    fn grid_cells() {
        let mut grid = Grid::new();
        grid.set_cell(2, 3, Cell::PlayerB);
        grid.set_cell(2, 3, Cell::Cathedral);
        assert_eq!(grid.cell(2, 3), Cell::Cathedral);
        assert!(grid.cells_with(Cell::PlayerB).is_empty());
        assert!(grid.is_occupied(2, 3));
        grid.set_cell(2, 3, Cell::Empty);
        assert_eq!(grid, Grid::new());
        assert_eq!(grid.empty_cells(), BitBoard::full());
    }

    #[test]
    fn place_and_remove() {
        let mut state = new_state();
        let action = state
            .actions()
            .action_of(Agent::PlayerB, SQUARE, (0, 0), Rotation::R0)
            .unwrap();
        let placement = state.place(Agent::PlayerB, action).unwrap();
        assert_eq!(placement.cells.num_entries(), 4);
        assert_eq!(state.cell(1, 1), Cell::PlayerB);
        assert!(!state.unplaced(Agent::PlayerB).contains(SQUARE));
        assert!(state.placed(Agent::PlayerB).contains(SQUARE));
        assert_eq!(state.remaining_size(Agent::PlayerB), 47 - 4);

        assert_eq!(state.remove(Agent::PlayerB, SQUARE), Ok(placement.cells));
        assert!(state.unplaced(Agent::PlayerB).contains(SQUARE));
        assert!(state.grid().occupied().is_empty());
    }

    #[test]
    fn captured_cathedral_stays_off_the_pool() {
        let mut state = new_state();
        let action = state
            .actions()
            .action_of(Agent::PlayerA, CATHEDRAL, (4, 4), Rotation::R0)
            .unwrap();
        state.place(Agent::PlayerA, action).unwrap();
        assert_eq!(state.grid().cells_with(Cell::Cathedral).num_entries(), 6);
        state.remove(Agent::PlayerA, CATHEDRAL).unwrap();
        assert_eq!(state.captured(Agent::PlayerA), PieceSet::from_iter([CATHEDRAL]));
        assert!(!state.unplaced(Agent::PlayerA).contains(CATHEDRAL));
        assert_eq!(state.unplaced_pieces(Agent::PlayerA).len(), 14);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn removing_an_unplaced_piece_is_a_bug() {
        let mut state = new_state();
        let _ = state.remove(Agent::PlayerA, TAVERN_1);
    }
}
