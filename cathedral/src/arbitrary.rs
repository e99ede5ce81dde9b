use quickcheck::Arbitrary;

use crate::{ActionId, Agent, Game};

/// A game played by picking among the legal actions according to a random
/// sequence of choices. Games are short or long depending on the sequence.
#[derive(Clone, Debug)]
pub struct RandomGame {
    choices: Vec<u16>,
}

impl Arbitrary for RandomGame {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let num_plies = usize::arbitrary(g) % 80;
        RandomGame {
            choices: (0..num_plies).map(|_| u16::arbitrary(g)).collect(),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.choices
                .shrink()
                .map(|choices| RandomGame { choices }),
        )
    }
}

impl RandomGame {
    /// Plays the game, calling `visit` with the game before each move.
    ///
    /// Stops early when the game is over.
    pub fn play(&self, mut visit: impl FnMut(&Game, Agent, ActionId)) -> Game {
        let mut game = Game::new();
        for &choice in &self.choices {
            let Some(agent) = game.current_agent() else {
                break;
            };
            let legal = game.legal_actions(agent);
            let action = legal[choice as usize % legal.len()];
            visit(&game, agent, action);
            game.apply(agent, action).unwrap();
        }
        game
    }
}
