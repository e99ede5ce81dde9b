use tracing::trace;

use crate::{
    resolve_captures, ActionId, Agent, BitBoard, BoardState, GameError, IllegalPlacement,
    MoveOutcome, PieceId, PieceSet, CATHEDRAL,
};

/// Checks whether `agent` may put `piece` onto `cells`.
///
/// The checks run in a fixed order and the first failing one is reported.
pub fn check_placement(
    state: &BoardState,
    agent: Agent,
    piece: PieceId,
    cells: BitBoard,
) -> Result<(), IllegalPlacement> {
    let unplaced = state.unplaced(agent);
    if piece != CATHEDRAL && unplaced.contains(CATHEDRAL) {
        return Err(IllegalPlacement::CathedralFirst);
    }
    if !unplaced.contains(piece) {
        return Err(IllegalPlacement::PieceNotAvailable { piece });
    }
    if let Some((x, y)) = (cells & state.grid().occupied()).first() {
        return Err(IllegalPlacement::CellOccupied { x, y });
    }
    let enemy_territory = state.territory().owned_by(agent.opponent());
    if let Some((x, y)) = (cells & enemy_territory).first() {
        return Err(IllegalPlacement::OpponentTerritory { x, y });
    }
    Ok(())
}

/// Like [`check_placement()`], for an action id.
pub fn check_action(state: &BoardState, agent: Agent, action: ActionId) -> Result<(), GameError> {
    let (piece, footprint) = state.actions().lookup(agent, action)?;
    check_placement(state, agent, piece, footprint.cells).map_err(|reason| {
        GameError::IllegalMove {
            agent,
            action,
            reason,
        }
    })
}

/// Unknown actions are not legal.
pub fn is_legal(state: &BoardState, agent: Agent, action: ActionId) -> bool {
    check_action(state, agent, action).is_ok()
}

fn legal_actions_iter(state: &BoardState, agent: Agent) -> impl Iterator<Item = ActionId> + '_ {
    let unplaced = state.unplaced(agent);
    let pieces = if unplaced.contains(CATHEDRAL) {
        PieceSet::new().insert(CATHEDRAL)
    } else {
        unplaced
    };
    let blocked = state.grid().occupied() | state.territory().owned_by(agent.opponent());
    pieces.into_iter().flat_map(move |piece| {
        state
            .actions()
            .footprints_for(agent, piece)
            .filter(move |(_, footprint)| !footprint.cells.intersects(blocked))
            .map(|(action, _)| action)
    })
}

/// All legal actions of `agent`, in ascending order.
pub fn legal_actions(state: &BoardState, agent: Agent) -> Vec<ActionId> {
    legal_actions_iter(state, agent).collect()
}

pub fn has_legal_action(state: &BoardState, agent: Agent) -> bool {
    legal_actions_iter(state, agent).next().is_some()
}

/// Places a piece and resolves captures and territory.
///
/// The move is validated before anything is touched, so on an illegal move
/// the state is left as it was.
pub fn execute_turn(
    state: &mut BoardState,
    agent: Agent,
    action: ActionId,
) -> Result<MoveOutcome, GameError> {
    check_action(state, agent, action)?;
    let piece = state.actions().piece_of(agent, action)?;
    let placement = state.place(agent, action)?;
    let report = resolve_captures(state, agent)?;
    trace!(
        %agent,
        %action,
        piece,
        territory_delta = report.territory_delta,
        captured_size = report.captured_size,
        "Executed turn"
    );
    Ok(MoveOutcome {
        piece,
        piece_size: placement.cells.num_entries(),
        territory_delta: report.territory_delta,
        captured: report.captured,
        captured_size: report.captured_size,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{ActionIndex, Cell, Rotation, Territory, SQUARE, TAVERN_1};

    fn new_state() -> BoardState {
        BoardState::new(Arc::new(ActionIndex::build()))
    }

    fn action(state: &BoardState, agent: Agent, piece: PieceId, position: (i8, i8)) -> ActionId {
        state
            .actions()
            .action_of(agent, piece, position, Rotation::R0)
            .unwrap()
    }

    #[test]
    fn cathedral_comes_first() {
        let mut state = new_state();
        let tavern = action(&state, Agent::PlayerA, TAVERN_1, (0, 0));
        assert_eq!(
            check_action(&state, Agent::PlayerA, tavern),
            Err(GameError::IllegalMove {
                agent: Agent::PlayerA,
                action: tavern,
                reason: IllegalPlacement::CathedralFirst
            })
        );
        // Player B has no cathedral to wait for
        let tavern_b = action(&state, Agent::PlayerB, TAVERN_1, (0, 0));
        assert!(is_legal(&state, Agent::PlayerB, tavern_b));

        let cathedral = action(&state, Agent::PlayerA, CATHEDRAL, (5, 5));
        execute_turn(&mut state, Agent::PlayerA, cathedral).unwrap();
        assert!(is_legal(&state, Agent::PlayerA, tavern));
    }

    #[test]
    fn occupied_and_enemy_cells() {
        let mut state = new_state();
        let cathedral = action(&state, Agent::PlayerA, CATHEDRAL, (5, 5));
        execute_turn(&mut state, Agent::PlayerA, cathedral).unwrap();
        let square = action(&state, Agent::PlayerB, SQUARE, (4, 4));
        let err = check_action(&state, Agent::PlayerB, square).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalMove {
                reason: IllegalPlacement::CellOccupied { .. },
                ..
            }
        ));

        // Territory of player A at (0, 0)
        state.set_cell(1, 0, Cell::PlayerA);
        state.set_cell(0, 1, Cell::PlayerA);
        state.set_cell(1, 1, Cell::PlayerA);
        let territory = crate::resolve(state.grid());
        state.set_territory(territory);
        assert_eq!(state.territory_at(0, 0), Territory::Owned(Agent::PlayerA));
        let tavern = action(&state, Agent::PlayerB, TAVERN_1, (0, 0));
        assert_eq!(
            check_placement(&state, Agent::PlayerB, TAVERN_1, state.actions().cells_of(Agent::PlayerB, tavern).unwrap()),
            Err(IllegalPlacement::OpponentTerritory { x: 0, y: 0 })
        );
        // Own territory is fine
        let tavern = action(&state, Agent::PlayerA, TAVERN_1, (0, 0));
        assert!(is_legal(&state, Agent::PlayerA, tavern));
    }

    #[test]
    fn unknown_action() {
        let state = new_state();
        let action = ActionId(state.actions().num_actions(Agent::PlayerB) as u32);
        assert_eq!(
            execute_turn(&mut new_state(), Agent::PlayerB, action),
            Err(GameError::UnknownAction {
                agent: Agent::PlayerB,
                action
            })
        );
        assert!(!is_legal(&state, Agent::PlayerB, action));
    }

    #[test]
    fn legal_actions_agree_with_is_legal() {
        let mut state = new_state();
        for (agent, piece, position) in [
            (Agent::PlayerA, CATHEDRAL, (5, 5)),
            (Agent::PlayerB, SQUARE, (0, 0)),
            (Agent::PlayerA, SQUARE, (8, 8)),
        ] {
            let action = action(&state, agent, piece, position);
            execute_turn(&mut state, agent, action).unwrap();
        }
        for agent in Agent::BOTH {
            let legal = legal_actions(&state, agent);
            let expected: Vec<ActionId> = (0..state.actions().num_actions(agent) as u32)
                .map(ActionId)
                .filter(|&action| is_legal(&state, agent, action))
                .collect();
            assert_eq!(legal, expected);
            assert_eq!(has_legal_action(&state, agent), !legal.is_empty());
        }
    }

    #[test]
    fn closing_a_ring_captures_the_piece_inside() {
        let mut state = new_state();
        let cathedral = action(&state, Agent::PlayerA, CATHEDRAL, (1, 1));
        execute_turn(&mut state, Agent::PlayerA, cathedral).unwrap();
        // Seven of the eight neighbors of (5, 5); (6, 6) stays open
        for (x, y) in [(4, 4), (4, 5), (4, 6), (5, 4), (5, 6), (6, 4), (6, 5)] {
            state.set_cell(x, y, Cell::PlayerA);
        }
        let tavern_b = action(&state, Agent::PlayerB, TAVERN_1, (5, 5));
        execute_turn(&mut state, Agent::PlayerB, tavern_b).unwrap();
        assert_eq!(state.cell(5, 5), Cell::PlayerB);

        let closing = action(&state, Agent::PlayerA, TAVERN_1, (6, 6));
        let outcome = execute_turn(&mut state, Agent::PlayerA, closing).unwrap();
        assert_eq!(outcome.captured, vec![TAVERN_1]);
        assert_eq!(outcome.captured_size, 1);
        assert_eq!(outcome.territory_delta, 1);
        assert_eq!(state.cell(5, 5), Cell::Empty);
        assert_eq!(state.territory_at(5, 5), Territory::Owned(Agent::PlayerA));
        assert!(state
            .unplaced_pieces(Agent::PlayerB)
            .iter()
            .any(|piece| piece.id == TAVERN_1));
    }

    #[test]
    fn illegal_move_leaves_state_alone() {
        let mut state = new_state();
        let before = state.clone();
        let tavern = action(&state, Agent::PlayerA, TAVERN_1, (0, 0));
        assert!(execute_turn(&mut state, Agent::PlayerA, tavern).is_err());
        assert_eq!(state, before);
    }
}
