//! Console host for a single wheel game match.
//!
//! Reads commands from stdin, forwards them to a match actor, and prints
//! every view the match pushes back.

use anyhow::{Context, Result};
use pico_args::Arguments;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use wheel_game::{
    GameConfig,
    session::{MatchActor, MatchError, MatchHandle},
    wheel::RandomWheel,
};

use wg_client::{
    commands::{Command, HELP as COMMANDS_HELP, parse_command},
    render::{render_queue, render_view},
};

const HELP: &str = "\
Play a wheel game round in the terminal

USAGE:
  wg_client [OPTIONS]

OPTIONS:
  --config PATH         JSON game config  [env: WHEEL_CONFIG]
  --seed N              Seed the wheel for a reproducible game

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  WHEEL_PLAYERS         Comma-separated player names
  WHEEL_SPIN_MS         Wheel spin duration in milliseconds
  WHEEL_NOTIFICATION_MS How long notifications stay up
  RUST_LOG              Log filter  [default: info]
";

struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        config: pargs
            .opt_value_from_str("--config")
            .context("Invalid --config")?
            .or_else(|| std::env::var_os("WHEEL_CONFIG").map(PathBuf::from)),
        seed: pargs.opt_value_from_str("--seed").context("Invalid --seed")?,
    };

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let config = GameConfig::load(args.config.as_deref()).context("Failed to load config")?;
    log::info!(
        "Starting match with {} players and {} puzzles",
        config.players.len(),
        config.puzzles.len()
    );

    let wheel = match args.seed {
        Some(seed) => RandomWheel::seeded(seed),
        None => RandomWheel::new(),
    };
    let (actor, handle) = MatchActor::new(&config, wheel);
    let actor_task = tokio::spawn(actor.run());

    let (_subscriber, mut views) = handle.subscribe(32).await?;
    let printer = tokio::spawn(async move {
        while let Some(view) = views.recv().await {
            println!("\n{}", render_view(&view));
        }
    });

    println!("Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(&handle, command).await?,
            Err(e) => println!("{e}"),
        }
    }

    handle.close().await?;
    actor_task.await.context("Match task panicked")?;
    printer.await.context("Printer task panicked")?;

    println!("Goodbye!");
    Ok(())
}

async fn execute(handle: &MatchHandle, command: Command) -> Result<(), MatchError> {
    match command {
        // Resulting views arrive through the subscription.
        Command::Play(intent) => {
            handle.dispatch(intent).await?;
        }
        Command::NextPuzzle => match handle.next_puzzle().await {
            Ok(_) => {}
            Err(MatchError::Round(e)) => println!("{e}"),
            Err(e) => return Err(e),
        },
        Command::ShowQueue => print!("{}", render_queue(&handle.view().await?)),
        Command::Show => println!("{}", render_view(&handle.view().await?)),
        Command::Help => print!("{COMMANDS_HELP}"),
        Command::Quit => {}
    }
    Ok(())
}
