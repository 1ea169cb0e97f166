mod game;
mod input;
mod render;
mod snake;
mod state;
mod term;

use std::{error::Error, fs::File, path::PathBuf};

use clap::Parser;
use log::info;

pub type TermInt = u16;
pub type Coords = (i32, i32);

#[derive(Parser, Debug)]
#[command(name = "snake", about = "Snake in the terminal")]
struct Args {
    /// Game ticks per second
    #[arg(long, default_value_t = game::DEFAULT_TPS, value_parser = clap::value_parser!(u32).range(1..=120))]
    tps: u32,

    /// Seed for food placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logger(log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    builder.format_timestamp(None);

    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logger(args.log_file.as_ref())?;

    let config = game::Config { tps: args.tps, seed: args.seed };
    info!("snake {} with {:?}", env!("CARGO_PKG_VERSION"), config);

    // The game owns the terminal until it is dropped, errors are reported after that
    let mut game = game::SnakeGame::new(&config)?;
    game.run()?;
    Ok(())
}
