use anyhow::Context;
use broadside::{
    init_logging, Board, Difficulty, GameStatus, Rules, Skirmish, TargetingEngine, STANDARD_FLEET,
};
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

/// Turns after which a game is abandoned.
const MAX_TURNS: usize = 1_000;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Tier {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl From<Tier> for Difficulty {
    fn from(t: Tier) -> Self {
        match t {
            Tier::Easy => Difficulty::Easy,
            Tier::Normal => Difficulty::Normal,
            Tier::Hard => Difficulty::Hard,
            Tier::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Parser)]
enum Commands {
    /// Let one CPU tier clear randomly placed fleets and report shot counts.
    Simulate {
        #[arg(long, value_enum, default_value_t = Tier::Expert)]
        difficulty: Tier,
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Allow ships to touch")]
        relaxed: bool,
    },
    /// Two CPU tiers race to clear each other's fleet, turn by turn.
    Duel {
        #[arg(long, value_enum, default_value_t = Tier::Normal)]
        first: Tier,
        #[arg(long, value_enum, default_value_t = Tier::Expert)]
        second: Tier,
        #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn skirmish(difficulty: Difficulty, rules: Rules, seed: u64) -> anyhow::Result<Skirmish> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::with_rules(rules);
    board
        .auto_place(&mut rng, &STANDARD_FLEET)
        .context("placing the fleet")?;
    let engine = TargetingEngine::new(
        difficulty,
        &STANDARD_FLEET,
        SmallRng::seed_from_u64(seed.wrapping_add(1)),
    );
    Ok(Skirmish::new(board, engine))
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            difficulty,
            games,
            seed,
            relaxed,
        } => {
            let difficulty = Difficulty::from(difficulty);
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            let rules = if relaxed { Rules::relaxed() } else { Rules::default() };

            let mut shots = Vec::with_capacity(games);
            for game in 0..games as u64 {
                let mut s = skirmish(difficulty, rules, seed.wrapping_add(game * 2))?;
                if s.play_out(MAX_TURNS)? != GameStatus::Won {
                    anyhow::bail!("game {} did not finish within {} turns", game, MAX_TURNS);
                }
                shots.push(s.shots_fired());
            }

            let mean = if shots.is_empty() {
                0.0
            } else {
                shots.iter().sum::<usize>() as f64 / shots.len() as f64
            };
            let result = json!({
                "difficulty": difficulty.to_string(),
                "seed": seed,
                "games": games,
                "mean_shots": mean,
                "min_shots": shots.iter().min(),
                "max_shots": shots.iter().max(),
            });
            println!("{}", serde_json::to_string(&result)?);
        }
        Commands::Duel { first, second, seed } => {
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            let (first, second) = (Difficulty::from(first), Difficulty::from(second));
            // Each side fires at the board the other side defends.
            let mut a = skirmish(first, Rules::default(), seed)?;
            let mut b = skirmish(second, Rules::default(), seed.wrapping_add(2))?;

            let mut winner = None;
            for _ in 0..MAX_TURNS {
                a.take_turn()?;
                if a.status() == GameStatus::Won {
                    winner = Some("first");
                    break;
                }
                b.take_turn()?;
                if b.status() == GameStatus::Won {
                    winner = Some("second");
                    break;
                }
            }

            let result = json!({
                "seed": seed,
                "first": {"difficulty": first.to_string(), "shots": a.shots_fired()},
                "second": {"difficulty": second.to_string(), "shots": b.shots_fired()},
                "winner": winner,
            });
            println!("{}", serde_json::to_string(&result)?);
        }
    }
    Ok(())
}
