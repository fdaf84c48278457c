use clap::{Parser, Subcommand};
use engine::api::{run_scripted_duel, DuelScript};
use engine::content::builtin_scripts;
use engine::{Duel, Move, Participant, ParticipantId, RoundOutcome, Slot, StatsStore};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{fs, path::PathBuf};

#[derive(Subcommand)]
enum Cmd {
    /// Run a scripted duel from a JSON file (or a built-in script)
    Duel {
        /// Path to a duel script JSON
        #[arg(long, conflicts_with = "builtin")]
        script: Option<PathBuf>,
        /// Built-in script name
        #[arg(long, default_value = "best_of_three")]
        builtin: String,
        /// Stats JSON file to update with the result
        #[arg(long)]
        stats: Option<PathBuf>,
        /// Emit the report as JSON instead of the text log
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Play out a duel with seeded random moves
    Simulate {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Challenger id
        #[arg(long, default_value_t = 1)]
        challenger: u64,
        #[arg(long, default_value = "Challenger")]
        challenger_name: String,
        /// Opponent id
        #[arg(long, default_value_t = 2)]
        opponent: u64,
        #[arg(long, default_value = "Opponent")]
        opponent_name: String,
        /// Round wins needed to take the match
        #[arg(long, default_value_t = engine::WIN_THRESHOLD)]
        first_to: u8,
        /// Permit challenger == opponent (self-play)
        #[arg(long, default_value_t = false)]
        allow_self: bool,
        /// Stats JSON file to update with the result
        #[arg(long)]
        stats: Option<PathBuf>,
    },
    /// Show a player's persisted record
    Stats {
        /// Stats JSON file
        #[arg(long)]
        file: PathBuf,
        /// Player id to look up
        #[arg(long)]
        id: u64,
        /// Display name used if the player has no record yet
        #[arg(long, default_value = "Unknown")]
        name: String,
    },
}

#[derive(Parser)]
#[command(name = "rps-cli")]
#[command(about = "RPS duel harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn random_move(rng: &mut ChaCha8Rng) -> Move {
    match rng.gen_range(0..3) {
        0 => Move::Rock,
        1 => Move::Paper,
        _ => Move::Scissors,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Duel {
            script,
            builtin,
            stats,
            json,
        } => {
            let text = match script {
                Some(path) => fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("reading script {}: {e}", path.display()))?,
                None => builtin_scripts()
                    .get(builtin.as_str())
                    .copied()
                    .ok_or_else(|| anyhow::anyhow!("unknown built-in script '{builtin}'"))?
                    .to_string(),
            };
            let script: DuelScript = serde_json::from_str(&text)?;
            let report = run_scripted_duel(&script)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in &report.log {
                    println!("{line}");
                }
            }
            if let Some(path) = stats {
                let mut store = StatsStore::load(path)?;
                store.record_result(&report.summary);
                store.save()?;
            }
        }
        Cmd::Simulate {
            seed,
            challenger,
            challenger_name,
            opponent,
            opponent_name,
            first_to,
            allow_self,
            stats,
        } => {
            if challenger == opponent && !allow_self {
                anyhow::bail!("you can't challenge yourself (pass --allow-self to override)");
            }
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut duel = Duel::with_threshold(
                Participant::new(challenger, challenger_name),
                Participant::new(opponent, opponent_name),
                first_to,
            );
            loop {
                duel.submit_move(Slot::A, random_move(&mut rng))?;
                duel.submit_move(Slot::B, random_move(&mut rng))?;
                match duel.resolve_round()? {
                    RoundOutcome::Tie(mv) => {
                        println!("round {}: both play {} {}; tie", duel.round(), mv, mv.emoji());
                    }
                    RoundOutcome::Win {
                        winner,
                        loser,
                        winner_move,
                        loser_move,
                    } => {
                        println!(
                            "round {}: {} plays {} {} and beats {}'s {} {}",
                            duel.round(),
                            duel.participant(winner).name,
                            winner_move,
                            winner_move.emoji(),
                            duel.participant(loser).name,
                            loser_move,
                            loser_move.emoji(),
                        );
                    }
                }
                if duel.is_match_complete() || duel.win_threshold() == 1 {
                    break;
                }
                duel.begin_next_round()?;
            }
            let summary = duel.summary()?;
            match &summary.winner {
                Some(winner) => {
                    println!("{} wins the duel and earns {} XP!", winner.name, engine::XP_REWARD);
                }
                None => println!("It's a tie! No XP earned"),
            }
            if let Some(path) = stats {
                let mut store = StatsStore::load(path)?;
                store.record_result(&summary);
                store.save()?;
            }
        }
        Cmd::Stats { file, id, name } => {
            let mut store = StatsStore::load(file)?;
            let record = store.stats(ParticipantId(id), &name).clone();
            let win_or_wins = if record.wins == 1 { "win" } else { "wins" };
            let loss_or_losses = if record.losses == 1 { "loss" } else { "losses" };
            let game_or_games = if record.games == 1 { "game" } else { "games" };
            println!("{} has {} XP", record.username, record.xp);
            println!(
                "{} {} and {} {}",
                record.wins, win_or_wins, record.losses, loss_or_losses
            );
            println!("over {} {}", record.games, game_or_games);
        }
    }
    Ok(())
}
