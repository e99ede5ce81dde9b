use serde::{Deserialize, Serialize};

use crate::PieceId;

/// One of the two players.
///
/// Player A owns the cathedral and moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Agent {
    #[serde(rename = "player_0")]
    PlayerA,
    #[serde(rename = "player_1")]
    PlayerB,
}

impl Agent {
    pub const BOTH: [Agent; 2] = [Agent::PlayerA, Agent::PlayerB];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opponent(self) -> Agent {
        match self {
            Agent::PlayerA => Agent::PlayerB,
            Agent::PlayerB => Agent::PlayerA,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Agent::PlayerA => "player_0",
            Agent::PlayerB => "player_1",
        }
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The content of a single cell of the playing grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    PlayerA = 1,
    PlayerB = 2,
    /// The neutral piece, placed by player A but belonging to neither side.
    Cathedral = 3,
}

impl Cell {
    pub fn of_agent(agent: Agent) -> Cell {
        match agent {
            Agent::PlayerA => Cell::PlayerA,
            Agent::PlayerB => Cell::PlayerB,
        }
    }

    /// The numeric board code (0 to 3).
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Ownership of a single empty cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Territory {
    #[default]
    Unclaimed,
    Owned(Agent),
    /// The cell belongs to a region that cannot be claimed right now.
    ///
    /// This is recomputed from scratch after every move.
    Invalid,
}

impl Territory {
    pub fn owner(self) -> Option<Agent> {
        match self {
            Territory::Owned(agent) => Some(agent),
            Territory::Unclaimed | Territory::Invalid => None,
        }
    }

    /// The numeric territory code: 0 unclaimed, 1/2 owned, -1 invalid.
    pub fn code(self) -> i8 {
        match self {
            Territory::Unclaimed => 0,
            Territory::Owned(agent) => agent.index() as i8 + 1,
            Territory::Invalid => -1,
        }
    }
}

/// Clockwise rotation of a piece around its reference cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    pub fn quarter_turns(self) -> u8 {
        self as u8
    }

    pub fn degrees(self) -> u16 {
        u16::from(self.quarter_turns()) * 90
    }

    pub fn from_degrees(degrees: u16) -> Option<Rotation> {
        match degrees {
            0 => Some(Rotation::R0),
            90 => Some(Rotation::R90),
            180 => Some(Rotation::R180),
            270 => Some(Rotation::R270),
            _ => None,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> u16 {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees).ok_or_else(|| format!("{degrees} is not a multiple of 90 below 360"))
    }
}

/// Opaque handle for one placement (piece, position, rotation) of one agent.
///
/// Ids are only meaningful together with the agent they were issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u32);

impl ActionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Summarizes the effects of playing a move, for reward computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub piece: PieceId,
    /// Number of cells of the placed piece.
    pub piece_size: u32,
    /// Newly claimed cells (both players) compared to before the move.
    pub territory_delta: i32,
    /// The pieces taken off the board by this move, in the order they were captured.
    ///
    /// These belong to the opponent, except for the cathedral.
    pub captured: Vec<PieceId>,
    /// Total number of cells of the captured pieces.
    pub captured_size: u32,
}

/// The result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won(Agent),
    Draw,
}

/// Describes a piece that is still waiting to be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PieceDescriptor {
    pub id: PieceId,
    pub label: &'static str,
    pub size: u32,
}
