//! Reversi terminal shell
//!
//! Plays one local match of a human against an automated player. The
//! controller in reversi-core owns all game state; this binary only reads
//! commands, renders views and runs the AI delay timers.
//!
//! AI moves are deferred: when the controller hands out a ticket, a task
//! sleeps for the ticket's delay and sends it back over a channel. Input keeps
//! flowing meanwhile and is rejected by the controller while the AI is to move.

mod command;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use reversi_core::{AiDelay, AiTicket, MatchConfig, Piece, StrategyKind, TurnController};

use crate::command::{Command, HELP};

const DEFAULT_EXPORT: &str = "reversi-match.json";

#[derive(Parser, Debug)]
#[command(name = "reversi", version, about = "Play Reversi against a simple automated opponent")]
struct Args {
    /// Piece you play: one (moves first) or two
    #[arg(long, default_value = "one")]
    human: Piece,

    /// Pause before AI moves: none or default (500 ms)
    #[arg(long, default_value = "default")]
    delay: AiDelay,

    /// AI strategy: random (0) or greedy (1)
    #[arg(long, default_value = "random")]
    strategy: StrategyKind,

    /// Seed for the random strategy
    #[arg(long)]
    seed: Option<u64>,

    /// Log engine events to stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = MatchConfig {
        human: args.human,
        delay: args.delay,
        strategy: args.strategy,
        seed: args.seed,
    };
    let mut controller = TurnController::new(config);
    let (ticket_tx, mut ticket_rx) = mpsc::unbounded_channel::<AiTicket>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Reversi");
    println!("=======");
    println!(
        "Opponent: {} - {}",
        controller.strategy().name(),
        controller.strategy().description()
    );
    if config.human_moves_first() {
        println!("You play {} and move first.", config.human.symbol());
    } else {
        println!("You play {}; the AI opens.", config.human.symbol());
    }
    println!("Type `help` for commands.\n");
    show(&controller);
    schedule(&mut controller, &ticket_tx);

    loop {
        tokio::select! {
            Some(ticket) = ticket_rx.recv() => {
                if let Some(placement) = controller.resolve_ai(ticket) {
                    println!("\nAI plays {} flipping {}", placement.at, placement.captures.len());
                    show(&controller);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = handle(&mut controller, command).await {
                            println!("{:#}", e);
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
        schedule(&mut controller, &ticket_tx);
    }

    info!("shutting down");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Start an AI timer if the controller wants one.
fn schedule(controller: &mut TurnController, tx: &UnboundedSender<AiTicket>) {
    let Some(ticket) = controller.schedule_ai() else {
        return;
    };
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(ticket.delay()).await;
        // The receiver only goes away on shutdown.
        if tx.send(ticket).is_err() {
            debug!(epoch = ticket.epoch(), "AI ticket dropped at shutdown");
        }
    });
}

async fn handle(controller: &mut TurnController, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Place(at) => match controller.select(at) {
            Ok(placement) => {
                println!("\nYou play {} flipping {}", placement.at, placement.captures.len());
                show(controller);
            }
            Err(e) => println!("{}", e),
        },
        Command::Undo => {
            if controller.recall() {
                println!("\nTook back one round.");
                show(controller);
            } else {
                println!("Nothing to undo yet.");
            }
        }
        Command::Restart(side) => {
            let mut config = *controller.config();
            if let Some(human) = side {
                config.human = human;
            }
            controller.restart_with(config);
            println!("\nNew round.");
            show(controller);
        }
        Command::Export(path) => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT));
            export(controller, &path).await?;
            println!("Saved match record to {}", path.display());
        }
        Command::Show => show(controller),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

async fn export(controller: &TurnController, path: &Path) -> anyhow::Result<()> {
    let json = controller
        .record()
        .to_json()
        .context("failed to serialize match record")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn show(controller: &TurnController) {
    let view = controller.view();
    print!("{}", render::board(&view));
    println!("{}", render::status(&view, controller.config()));
}
