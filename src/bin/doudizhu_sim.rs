//! Dou Dizhu simulator CLI - plays uniform random games and reports totals.

use std::time::Instant;

use clap::Parser;
use rust_doudizhu::core::{GameConfig, GameRng, PlayerId, PlayerMap};
use rust_doudizhu::game::DouDizhu;
use rust_doudizhu::rules::random_playout;
use tracing::info;

#[derive(Parser)]
#[command(name = "doudizhu-sim")]
#[command(about = "Play random Dou Dizhu games and report aggregate results")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "100")]
    games: u32,

    /// Base seed; game `n` uses a fork of it
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Highest bid allowed
    #[arg(long, default_value = "3")]
    max_bid: u8,

    /// Disable the spring doubling
    #[arg(long)]
    no_spring: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the final state of every game
    #[arg(long)]
    show_state: bool,
}

#[derive(Default)]
struct Totals {
    games: u32,
    no_bid: u32,
    landlord_wins: u32,
    springs: u32,
    bombs: u64,
    returns: PlayerMap<i64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = GameConfig::default()
        .with_max_bid(args.max_bid)
        .with_spring_bonus(!args.no_spring);
    let game = DouDizhu::new(config)?;
    info!(games = args.games, seed = args.seed, "starting simulation");

    let start = Instant::now();
    let mut rng = GameRng::new(args.seed);
    let mut totals = Totals::default();

    for game_num in 1..=args.games {
        let mut game_rng = rng.fork();
        let mut state = game.new_game();
        let returns = random_playout(&mut state, &mut game_rng);

        totals.games += 1;
        for seat in PlayerId::all() {
            totals.returns[seat] += returns[seat];
        }
        match state.outcome() {
            Some(outcome) => {
                totals.landlord_wins += u32::from(outcome.landlord_won());
                totals.springs += u32::from(outcome.spring);
                totals.bombs += u64::from(outcome.bombs);
            }
            None => totals.no_bid += 1,
        }

        if args.show_state {
            println!("=== Game {game_num} ===\n{state}");
        }
    }

    let elapsed = start.elapsed();
    let scored = totals.games - totals.no_bid;
    let landlord_rate = if scored > 0 {
        f64::from(totals.landlord_wins) / f64::from(scored)
    } else {
        0.0
    };

    println!("Games:            {}", totals.games);
    println!("No-bid games:     {}", totals.no_bid);
    println!("Landlord wins:    {} ({:.1}%)", totals.landlord_wins, landlord_rate * 100.0);
    println!("Springs:          {}", totals.springs);
    println!("Bombs played:     {}", totals.bombs);
    for (seat, total) in totals.returns.iter() {
        println!("{seat} total:   {total}");
    }
    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        games_per_sec = f64::from(totals.games) / elapsed.as_secs_f64().max(f64::EPSILON),
        "simulation finished"
    );
    Ok(())
}
