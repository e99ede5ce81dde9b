//! Precomputed placements for every (agent, piece) pair.
//!
//! Each distinct absolute cell set a piece can cover on the empty board gets
//! one action id. Ids are contiguous per piece and ordered by piece id, so
//! mapping an id back to its piece is a binary search over the start offsets
//! of the per-piece ranges.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::{catalog, ActionId, Agent, BitBoard, GameError, PieceId, Rotation, BOARD_SIZE};

/// The cells covered by one action, and the placement that produced them first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footprint {
    pub cells: BitBoard,
    /// The reference cell of the piece.
    pub position: (i8, i8),
    pub rotation: Rotation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct AgentActions {
    /// Indexed by action id.
    footprints: Vec<Footprint>,
    /// `starts[piece]` is the first action id of `piece`. Has one extra
    /// trailing entry equal to the total number of actions.
    starts: Vec<u32>,
    lookup: HashMap<(PieceId, (i8, i8), Rotation), ActionId>,
}

/// All placements of all pieces of both agents on the empty board.
///
/// Built once per game; ids are stable for the lifetime of the index but are
/// not comparable across agents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionIndex {
    agents: [AgentActions; 2],
}

impl AgentActions {
    fn enumerate(agent: Agent) -> Self {
        let templates = catalog(agent);
        let mut footprints = Vec::new();
        let mut starts = Vec::with_capacity(templates.len() + 1);
        let mut lookup = HashMap::new();

        for (piece, template) in templates.iter().enumerate() {
            starts.push(footprints.len() as u32);
            let mut seen = HashSet::new();
            for x in 0..BOARD_SIZE {
                for y in 0..BOARD_SIZE {
                    for rotation in Rotation::ALL {
                        let Some(cells) = template.cells_at((x, y), rotation) else {
                            continue;
                        };
                        // The same cells reached through a symmetry are the same action
                        if !seen.insert(cells) {
                            continue;
                        }
                        let action = ActionId(footprints.len() as u32);
                        lookup.insert((piece, (x, y), rotation), action);
                        footprints.push(Footprint {
                            cells,
                            position: (x, y),
                            rotation,
                        });
                    }
                }
            }
        }
        starts.push(footprints.len() as u32);

        Self {
            footprints,
            starts,
            lookup,
        }
    }

    fn piece_of(&self, action: ActionId) -> Option<PieceId> {
        if action.index() >= self.footprints.len() {
            return None;
        }
        // starts[0] == 0, so there is at least one start <= action
        Some(self.starts.partition_point(|&start| start <= action.0) - 1)
    }
}

impl ActionIndex {
    /// Enumerates the placements of both agents.
    ///
    /// This is deterministic: two indices built with the same catalogs are equal.
    pub fn build() -> Self {
        Self {
            agents: Agent::BOTH.map(AgentActions::enumerate),
        }
    }

    pub fn num_actions(&self, agent: Agent) -> usize {
        self.agents[agent.index()].footprints.len()
    }

    /// Which piece an action places.
    pub fn piece_of(&self, agent: Agent, action: ActionId) -> Result<PieceId, GameError> {
        self.agents[agent.index()]
            .piece_of(action)
            .ok_or(GameError::UnknownAction { agent, action })
    }

    /// The piece and footprint of an action.
    pub fn lookup(&self, agent: Agent, action: ActionId) -> Result<(PieceId, &Footprint), GameError> {
        let piece = self.piece_of(agent, action)?;
        Ok((piece, &self.agents[agent.index()].footprints[action.index()]))
    }

    pub fn cells_of(&self, agent: Agent, action: ActionId) -> Result<BitBoard, GameError> {
        self.lookup(agent, action).map(|(_, footprint)| footprint.cells)
    }

    pub fn position_and_rotation_of(
        &self,
        agent: Agent,
        action: ActionId,
    ) -> Result<((i8, i8), Rotation), GameError> {
        self.lookup(agent, action)
            .map(|(_, footprint)| (footprint.position, footprint.rotation))
    }

    /// The inverse of [`Self::position_and_rotation_of()`].
    ///
    /// Returns `None` for placements that are off the board, and for placements
    /// that duplicate the cells of an earlier recorded placement.
    pub fn action_of(
        &self,
        agent: Agent,
        piece: PieceId,
        position: (i8, i8),
        rotation: Rotation,
    ) -> Option<ActionId> {
        self.agents[agent.index()]
            .lookup
            .get(&(piece, position, rotation))
            .copied()
    }

    /// The contiguous range of action ids that place `piece`.
    ///
    /// Empty if the agent has no such piece.
    pub fn actions_for(&self, agent: Agent, piece: PieceId) -> Range<u32> {
        let starts = &self.agents[agent.index()].starts;
        match (starts.get(piece), starts.get(piece + 1)) {
            (Some(&start), Some(&end)) => start..end,
            _ => 0..0,
        }
    }

    /// The actions placing `piece`, together with the cells they cover.
    pub fn footprints_for(
        &self,
        agent: Agent,
        piece: PieceId,
    ) -> impl Iterator<Item = (ActionId, &Footprint)> + '_ {
        let range = self.actions_for(agent, piece);
        let footprints = &self.agents[agent.index()].footprints[range.start as usize..range.end as usize];
        range.map(ActionId).zip(footprints)
    }
}
