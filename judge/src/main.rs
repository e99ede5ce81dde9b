use cathedral::{Agent, Outcome};
use clap::Parser;
use judge::{play_game, PolicyKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// The policy playing the cathedral side
    #[arg(long, value_enum, default_value_t = PolicyKind::Greedy)]
    player_a: PolicyKind,

    /// The policy playing the other side
    #[arg(long, value_enum, default_value_t = PolicyKind::Random)]
    player_b: PolicyKind,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Print the board at the end of each game
    #[arg(long, default_value_t = false)]
    show_board: bool,

    /// Print a JSON summary of each game to stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    draws: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut policies = [args.player_a.build(), args.player_b.build()];
    let names = [policies[0].name(), policies[1].name()];
    let mut match_score = MatchScore::default();

    for game_idx in 0..args.num_games {
        let summary = play_game(game_idx, &mut rng, &mut policies)?;
        match summary.outcome {
            Outcome::Won(agent) => {
                debug!(winner = names[agent.index()], %agent, game_idx);
                match_score.wins[agent.index()] += 1;
            }
            Outcome::Draw => {
                debug!(game_idx, "Draw");
                match_score.draws += 1;
            }
        }
        if args.show_board {
            eprintln!("Game {}:\n{}", game_idx, summary.final_board);
        }
        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        }
    }

    eprintln!(
        "End result:\n- {} wins by {} ({})\n- {} wins by {} ({})\n- {} draws",
        match_score.wins[0],
        names[0],
        Agent::PlayerA,
        match_score.wins[1],
        names[1],
        Agent::PlayerB,
        match_score.draws
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
