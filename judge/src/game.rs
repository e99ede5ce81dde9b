use cathedral::{Agent, Game, Outcome, Score};
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::trace;

use crate::player::Policy;

/// What is reported about a finished game.
#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub game_idx: usize,
    pub outcome: Outcome,
    /// Number of moves, including the cathedral and moves that captured nothing.
    pub plies: u32,
    pub turns: [u32; 2],
    pub remaining_size: [u32; 2],
    pub scores: [Score; 2],
    #[serde(skip)]
    pub final_board: String,
}

/// Plays one game to the end.
///
/// Policies only get asked for a move when they have a legal one, so an error
/// here means a policy misbehaved.
pub fn play_game(
    game_idx: usize,
    rng: &mut StdRng,
    policies: &mut [Box<dyn Policy>; 2],
) -> anyhow::Result<GameSummary> {
    let mut game = Game::new();
    let mut plies = 0;
    while let Some(agent) = game.current_agent() {
        let policy = &mut policies[agent.index()];
        let action = policy.choose_action(rng, &game, agent)?;
        let outcome = game.apply(agent, action)?;
        trace!(%agent, policy = policy.name(), %action, ?outcome, "Move");
        plies += 1;
    }

    let outcome = game
        .winner()
        .ok_or_else(|| anyhow::anyhow!("Game loop ended before the game was over"))?;
    Ok(GameSummary {
        game_idx,
        outcome,
        plies,
        turns: Agent::BOTH.map(|agent| game.turns(agent)),
        remaining_size: Agent::BOTH.map(|agent| game.remaining_size(agent)),
        scores: *game.scores(),
        final_board: game.state().to_string(),
    })
}
