//! Heuristic score breakdown, for display and for training signals.

use serde::{Deserialize, Serialize};

use crate::{Agent, BoardState};

/// Counters the game keeps per agent. Placing the cathedral is not a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    pub turns: u32,
    /// Cells placed during those turns.
    pub squares_placed: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Average number of cells placed per turn, or 0 before the first turn.
    pub squares_per_turn: f64,
    /// Remaining cells of the opponent minus own remaining cells.
    pub remaining_pieces: i32,
    /// Own territory minus territory of the opponent.
    pub territory: i32,
    pub total: f64,
}

/// Scores both agents, indexed by [`Agent::index()`].
pub fn evaluate(state: &BoardState, stats: &[TurnStats; 2]) -> [Score; 2] {
    Agent::BOTH.map(|agent| {
        let opponent = agent.opponent();
        let own = stats[agent.index()];
        let squares_per_turn = if own.turns == 0 {
            0.0
        } else {
            f64::from(own.squares_placed) / f64::from(own.turns)
        };
        let remaining_pieces =
            state.remaining_size(opponent) as i32 - state.remaining_size(agent) as i32;
        let territory = state.territory().owned_by(agent).num_entries() as i32
            - state.territory().owned_by(opponent).num_entries() as i32;
        Score {
            squares_per_turn,
            remaining_pieces,
            territory,
            total: squares_per_turn + f64::from(remaining_pieces + territory),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{resolve, ActionIndex, Cell};

    #[test]
    fn fresh_board() {
        let state = BoardState::new(Arc::new(ActionIndex::build()));
        let [a, b] = evaluate(&state, &[TurnStats::default(); 2]);
        // The cathedral is part of the pool of player A
        assert_eq!(a.remaining_pieces, 47 - 53);
        assert_eq!(b.remaining_pieces, 53 - 47);
        assert_eq!(a.squares_per_turn, 0.0);
        assert_eq!(b.total, 6.0);
    }

    #[test]
    fn territory_and_rate() {
        let mut state = BoardState::new(Arc::new(ActionIndex::build()));
        for (x, y) in [(1, 0), (1, 1), (0, 1)] {
            state.set_cell(x, y, Cell::PlayerB);
        }
        let territory = resolve(state.grid());
        state.set_territory(territory);
        let stats = [
            TurnStats::default(),
            TurnStats {
                turns: 2,
                squares_placed: 3,
            },
        ];
        let [a, b] = evaluate(&state, &stats);
        assert_eq!(b.territory, 1);
        assert_eq!(a.territory, -1);
        assert_eq!(b.squares_per_turn, 1.5);
        assert_eq!(b.total, 1.5 + 6.0 + 1.0);
    }
}
