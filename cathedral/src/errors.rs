use crate::{ActionId, Agent, PieceId};

/// Why a placement is not allowed in the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    /// Player A must place the cathedral before any other piece.
    CathedralFirst,
    /// The piece is already on the board, or was captured for good.
    PieceNotAvailable { piece: PieceId },
    CellOccupied { x: i8, y: i8 },
    OpponentTerritory { x: i8, y: i8 },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::CathedralFirst => {
                write!(f, "The cathedral has to be placed before any other piece")
            }
            IllegalPlacement::PieceNotAvailable { piece } => {
                write!(f, "Piece {} is not among the unplaced pieces", piece)
            }
            IllegalPlacement::CellOccupied { x, y } => {
                write!(f, "The cell ({}, {}) is already occupied", x, y)
            }
            IllegalPlacement::OpponentTerritory { x, y } => {
                write!(f, "The cell ({}, {}) is territory of the opponent", x, y)
            }
        }
    }
}

/// The error type for operations on a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    IllegalMove {
        agent: Agent,
        action: ActionId,
        reason: IllegalPlacement,
    },
    NotYourTurn {
        agent: Agent,
    },
    GameOver,
    /// The action id is outside of the range precomputed for the agent.
    UnknownAction {
        agent: Agent,
        action: ActionId,
    },
    /// Internal bookkeeping went wrong. This is a bug, not a game condition.
    InvariantViolation {
        agent: Agent,
        piece: PieceId,
        message: &'static str,
    },
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::IllegalMove { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::IllegalMove { agent, action, .. } => {
                write!(f, "Action {} is illegal for {}", action, agent)
            }
            GameError::NotYourTurn { agent } => {
                write!(f, "It is not the turn of {}", agent)
            }
            GameError::GameOver => write!(f, "The game is already over"),
            GameError::UnknownAction { agent, action } => {
                write!(f, "Action {} does not exist for {}", action, agent)
            }
            GameError::InvariantViolation {
                agent,
                piece,
                message,
            } => write!(
                f,
                "Invariant violated for piece {} of {}: {}",
                piece, agent, message
            ),
        }
    }
}
