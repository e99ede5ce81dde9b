use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::{evaluate, Score, TurnStats};
use crate::turn::{check_action, execute_turn, has_legal_action, legal_actions};
use crate::{
    ActionId, ActionIndex, Agent, BoardState, Cell, GameError, MoveOutcome, Outcome,
    PieceDescriptor, Territory, BOARD_SIZE, CATHEDRAL,
};

const SIDE: usize = BOARD_SIZE as usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingMove(Agent),
    GameOver,
}

/// A game of Cathedral between player A and player B.
///
/// Player A moves first and has to start with the cathedral. After each move
/// the opponent moves next, unless it has no legal move left, in which case
/// the same agent moves again. The game ends when neither agent can move.
#[derive(Clone, Debug)]
pub struct Game {
    state: BoardState,
    phase: Phase,
    stats: [TurnStats; 2],
    scores: [Score; 2],
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        let state = BoardState::new(Arc::new(ActionIndex::build()));
        let stats = [TurnStats::default(); 2];
        let scores = evaluate(&state, &stats);
        Self {
            state,
            phase: Phase::AwaitingMove(Agent::PlayerA),
            stats,
            scores,
        }
    }

    /// Starts over with an empty board and freshly enumerated actions.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The agent to move, or `None` once the game is over.
    pub fn current_agent(&self) -> Option<Agent> {
        match self.phase {
            Phase::AwaitingMove(agent) => Some(agent),
            Phase::GameOver => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::GameOver
    }

    fn check_turn(&self, agent: Agent) -> Result<(), GameError> {
        match self.phase {
            Phase::GameOver => Err(GameError::GameOver),
            Phase::AwaitingMove(current) if current != agent => {
                Err(GameError::NotYourTurn { agent })
            }
            Phase::AwaitingMove(_) => Ok(()),
        }
    }

    /// Why `action` is not legal for `agent` right now, if it isn't.
    ///
    /// This only looks at the board, not at whose turn it is.
    pub fn check_legal(&self, agent: Agent, action: ActionId) -> Result<(), GameError> {
        check_action(&self.state, agent, action)
    }

    pub fn is_legal(&self, agent: Agent, action: ActionId) -> bool {
        self.check_legal(agent, action).is_ok()
    }

    /// The legal actions of `agent`, in ascending order. Empty once the game
    /// is over.
    pub fn legal_actions(&self, agent: Agent) -> Vec<ActionId> {
        if self.is_terminal() {
            return Vec::new();
        }
        legal_actions(&self.state, agent)
    }

    /// Plays a move for `agent`.
    ///
    /// On error, nothing about the game has changed.
    pub fn apply(&mut self, agent: Agent, action: ActionId) -> Result<MoveOutcome, GameError> {
        self.check_turn(agent)?;
        let outcome = execute_turn(&mut self.state, agent, action)?;
        if !outcome.captured.is_empty() {
            debug!(%agent, captured = ?outcome.captured, "Pieces captured");
        }

        if outcome.piece != CATHEDRAL {
            let stats = &mut self.stats[agent.index()];
            stats.turns += 1;
            stats.squares_placed += outcome.piece_size;
        }
        self.phase = self.next_phase(agent);
        if self.stats[0].turns == self.stats[1].turns || self.is_terminal() {
            self.scores = evaluate(&self.state, &self.stats);
        }
        Ok(outcome)
    }

    fn next_phase(&self, mover: Agent) -> Phase {
        let opponent = mover.opponent();
        if has_legal_action(&self.state, opponent) {
            Phase::AwaitingMove(opponent)
        } else if has_legal_action(&self.state, mover) {
            debug!(%opponent, "No legal move, passing");
            Phase::AwaitingMove(mover)
        } else {
            debug!(
                remaining_a = self.state.remaining_size(Agent::PlayerA),
                remaining_b = self.state.remaining_size(Agent::PlayerB),
                "Game over"
            );
            Phase::GameOver
        }
    }

    /// What [`Self::apply()`] would return, without playing the move.
    pub fn preview(&self, agent: Agent, action: ActionId) -> Result<MoveOutcome, GameError> {
        self.check_turn(agent)?;
        let mut state = self.state.clone();
        execute_turn(&mut state, agent, action)
    }

    /// The result of the game, once it is over.
    ///
    /// The agent with fewer remaining cells in its pool wins.
    pub fn winner(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }
        Some(outcome_by_remaining(
            self.remaining_size(Agent::PlayerA),
            self.remaining_size(Agent::PlayerB),
        ))
    }

    /// Completed turns of `agent`. Placing the cathedral does not count.
    pub fn turns(&self, agent: Agent) -> u32 {
        self.stats[agent.index()].turns
    }

    /// The scores as of the last time both agents had played equally many turns.
    pub fn scores(&self) -> &[Score; 2] {
        &self.scores
    }

    /// A snapshot of the cells, indexed by `[x][y]`.
    pub fn cell_grid(&self) -> [[Cell; SIDE]; SIDE] {
        self.state.grid().to_rows()
    }

    /// A snapshot of the territory, indexed by `[x][y]`.
    pub fn territory_grid(&self) -> [[Territory; SIDE]; SIDE] {
        self.state.territory().to_rows()
    }

    pub fn unplaced_pieces(&self, agent: Agent) -> Vec<PieceDescriptor> {
        self.state.unplaced_pieces(agent)
    }

    pub fn remaining_size(&self, agent: Agent) -> u32 {
        self.state.remaining_size(agent)
    }
}

/// Fewer remaining cells wins, equal totals are a draw.
fn outcome_by_remaining(remaining_a: u32, remaining_b: u32) -> Outcome {
    match remaining_a.cmp(&remaining_b) {
        std::cmp::Ordering::Less => Outcome::Won(Agent::PlayerA),
        std::cmp::Ordering::Greater => Outcome::Won(Agent::PlayerB),
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}
