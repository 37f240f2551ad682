//! Headless autoplay runner (default binary).
//!
//! Plays seeded games to completion with a greedy first-fit policy: for
//! each tray piece, try every rotation and take the first valid position.
//! Useful for eyeballing engine behavior and for quick determinism checks
//! from the shell.

use std::env;

use anyhow::{anyhow, Result};

use block_puzzle_core::core::placement::find_valid_positions;
use block_puzzle_core::{GameConfig, GameSession};

#[derive(Debug, Clone)]
struct RunArgs {
    seed: u32,
    games: u32,
    level: u32,
}

fn parse_args(args: &[String]) -> Result<RunArgs> {
    let mut run = RunArgs {
        seed: 1,
        games: 1,
        level: 1,
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                run.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--games" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --games"))?;
                run.games = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --games value: {}", v))?;
            }
            "--level" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --level"))?;
                run.level = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --level value: {}", v))?;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(run)
}

/// Play one game to the terminal state, returning (turns, score, clears)
fn run_game(seed: u32, level: u32) -> Result<(u32, u32, u32)> {
    let mut session = GameSession::new(GameConfig::default(), seed);
    session.set_level(level);

    let mut turns = 0u32;
    while !session.is_game_over() {
        let mut placed = false;

        'slots: for slot in 0..session.tray().len() {
            let Some(piece) = session.tray()[slot] else {
                continue;
            };
            let rotations = session.catalog().rotation_count(piece.shape_id);

            for _ in 0..rotations {
                let position = session.tray()[slot]
                    .and_then(|p| session.catalog().resolve(p))
                    .and_then(|v| find_valid_positions(session.board(), v).first().copied());

                if let Some((x, y)) = position {
                    session.place_piece(slot, x, y)?;
                    turns += 1;
                    placed = true;
                    break 'slots;
                }
                session.rotate_piece(slot)?;
            }
        }

        if !placed {
            break;
        }
    }

    println!("{}", session.board());
    Ok((turns, session.score(), session.total_clears()))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let run = parse_args(&args)?;

    for game in 0..run.games {
        let seed = run.seed.wrapping_add(game);
        let (turns, score, clears) = run_game(seed, run.level)?;
        println!(
            "game {} (seed {}): {} turns, {} points, {} clears",
            game + 1,
            seed,
            turns,
            score,
            clears
        );
    }

    Ok(())
}
