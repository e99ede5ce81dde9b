use anyhow::Context;
use cathedral::{ActionId, Agent, Game};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Picks the moves for one side of a game.
pub trait Policy {
    fn name(&self) -> &'static str;

    /// Only called when `agent` is to move, so there is at least one legal action.
    fn choose_action(
        &mut self,
        rng: &mut StdRng,
        game: &Game,
        agent: Agent,
    ) -> anyhow::Result<ActionId>;
}

/// Which policy plays a side, as given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyKind {
    Random,
    Greedy,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn Policy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy),
            PolicyKind::Greedy => Box::new(GreedyPolicy),
        }
    }
}

/// Plays a uniformly random legal action.
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_action(
        &mut self,
        rng: &mut StdRng,
        game: &Game,
        agent: Agent,
    ) -> anyhow::Result<ActionId> {
        game.legal_actions(agent)
            .choose(rng)
            .copied()
            .with_context(|| format!("No legal action for {}", agent))
    }
}

/// Plays the action with the best immediate reward, breaking ties randomly.
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_action(
        &mut self,
        rng: &mut StdRng,
        game: &Game,
        agent: Agent,
    ) -> anyhow::Result<ActionId> {
        let mut top_choices: Vec<ActionId> = Vec::new();
        let mut top_score = i64::MIN;
        for action in game.legal_actions(agent) {
            let outcome = game.preview(agent, action)?;
            // Captures are worth more than the cells they free up
            let score = i64::from(outcome.piece_size)
                + i64::from(outcome.territory_delta)
                + 2 * i64::from(outcome.captured_size);
            match score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    top_choices.push(action);
                }
                std::cmp::Ordering::Greater => {
                    top_choices = vec![action];
                    top_score = score;
                }
            }
        }
        top_choices
            .choose(rng)
            .copied()
            .with_context(|| format!("No legal action for {}", agent))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn greedy_prefers_large_pieces() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = Game::new();
        let action = GreedyPolicy
            .choose_action(&mut rng, &game, Agent::PlayerA)
            .unwrap();
        game.apply(Agent::PlayerA, action).unwrap();

        let action = GreedyPolicy
            .choose_action(&mut rng, &game, Agent::PlayerB)
            .unwrap();
        let outcome = game.apply(Agent::PlayerB, action).unwrap();
        // Nothing can be captured yet, so the biggest piece wins
        assert_eq!(outcome.piece_size, 5);
    }

    #[test]
    fn random_policy_plays_legal_moves() {
        let mut rng = StdRng::seed_from_u64(7);
        let game = Game::new();
        for _ in 0..10 {
            let action = RandomPolicy
                .choose_action(&mut rng, &game, Agent::PlayerA)
                .unwrap();
            assert!(game.is_legal(Agent::PlayerA, action));
        }
    }
}
