//! Traitors: Solo - terminal front end
//!
//! Drives a game session from stdin. Each phase prints its own prompt; the
//! history log is echoed as it grows.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use traitors_solo::core::config::{SessionConfig, Tuning};
use traitors_solo::core::error::Result;
use traitors_solo::core::types::{GameId, PlayerRef};
use traitors_solo::game::session::{self, SessionHandle};
use traitors_solo::game::{GameController, GameState, HumanVoteRequest, Phase, RevealCard};
use traitors_solo::roster::Role;

/// Traitors: Solo - find the traitors before they outnumber you
#[derive(Parser, Debug)]
#[command(name = "traitors")]
#[command(about = "Single-device hidden-traitor game against AI players")]
struct Args {
    /// Number of players including you (clamped to 4..=8)
    #[arg(long, short = 'p')]
    players: Option<i64>,

    /// Your display name
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Random seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with session settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the history log as JSON here on exit
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Also print what the traitors do at night
    #[arg(long)]
    show_secrets: bool,
}

/// Tracks which history entries were already echoed
struct Echo {
    game: Option<GameId>,
    printed: usize,
    show_secrets: bool,
}

impl Echo {
    fn print_new(&mut self, state: &GameState) {
        if self.game != Some(state.id) || self.printed > state.history.len() {
            self.game = Some(state.id);
            self.printed = 0;
        }
        for entry in state.history.iter().skip(self.printed) {
            if self.show_secrets || !entry.event.is_secret() {
                println!("{}", entry);
            }
        }
        self.printed = state.history.len();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(players) = args.players {
        config.players = players;
    }
    if let Some(name) = args.name.clone() {
        config.human_name = name;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "Traitors: Solo starting");

    let rt = Runtime::new()?;
    let controller = GameController::new(Tuning::default(), ChaCha8Rng::seed_from_u64(seed))?;
    let (session, task) = rt.block_on(async { session::spawn(controller) });

    println!("\n=== TRAITORS: SOLO ===");
    println!("Find the traitors before they outnumber the faithful.");
    println!();
    println!("Commands (any phase): status, history, clear, restart, quit");
    println!();

    let mut echo = Echo {
        game: None,
        printed: 0,
        show_secrets: args.show_secrets,
    };

    loop {
        let state = session.snapshot();
        echo.print_new(&state);
        prompt(&state);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "quit" | "q" => break,
            "status" | "s" => {
                display_status(&state);
                continue;
            }
            "history" | "h" => {
                echo.printed = 0;
                continue;
            }
            "clear" => {
                report(rt.block_on(session.clear_history()));
                continue;
            }
            "restart" => {
                report(rt.block_on(session.restart()));
                continue;
            }
            _ => {}
        }

        let result = match state.phase {
            Phase::Lobby => start_from_lobby(&rt, &session, &config, input),
            Phase::Reveal => rt.block_on(session.advance_reveal()),
            Phase::Night => Ok(()),
            Phase::Day => rt.block_on(session.start_vote()),
            Phase::Vote => match state.pending_human_vote() {
                Some(request) => match parse_vote(&request, input) {
                    Some(target) => rt.block_on(session.cast_vote(target.id)),
                    None => {
                        println!("Pick a number from the list or type a name.");
                        Ok(())
                    }
                },
                None => Ok(()),
            },
            Phase::Ended => {
                println!("Type 'restart' for a new game or 'quit' to leave.");
                Ok(())
            }
        };
        report(result);
    }

    let state = session.snapshot();
    drop(session);
    if let Err(err) = rt.block_on(task) {
        tracing::warn!(%err, "Session task did not shut down cleanly");
    }

    if let Some(path) = &args.history_out {
        fs::write(path, serde_json::to_string_pretty(&state.history)?)?;
        tracing::info!(path = %path.display(), entries = state.history.len(), "History written");
    }

    println!("\nGoodbye!");
    Ok(())
}

fn start_from_lobby(
    rt: &Runtime,
    session: &SessionHandle,
    config: &SessionConfig,
    input: &str,
) -> Result<()> {
    let mut words: Vec<&str> = input.split_whitespace().collect();
    let players = match words.first().and_then(|w| w.parse::<i64>().ok()) {
        Some(n) => {
            words.remove(0);
            n
        }
        None => config.players,
    };
    let rest = words;
    let name = if rest.is_empty() {
        config.human_name.clone()
    } else {
        rest.join(" ")
    };
    rt.block_on(session.start_game(players, name))
}

fn report(result: Result<()>) {
    match result {
        Ok(()) => {}
        Err(err) if err.is_recoverable() => println!("{}", err),
        Err(err) => println!("Cannot do that: {}", err),
    }
}

fn prompt(state: &GameState) {
    match state.phase {
        Phase::Lobby => println!("Press Enter to start, or type '<players> [name]'."),
        Phase::Reveal => match state.reveal_card() {
            Some(RevealCard::Own { name, role }) => {
                let line = match role {
                    Role::Traitor => "You are a TRAITOR. Eliminate the faithful without being caught.",
                    Role::Faithful => "You are FAITHFUL. Find and banish the traitors.",
                };
                println!("{}, look at the screen. {}", name, line);
                println!("Press Enter to hide your role.");
            }
            Some(RevealCard::PassDevice { name }) => {
                println!("Pass the device to {} and press Enter.", name)
            }
            None => {}
        },
        Phase::Night => {}
        Phase::Day => {
            println!();
            println!("Living players:");
            for p in state.alive_players() {
                println!("  {}", p.name);
            }
            println!("Discuss, then press Enter to vote.");
        }
        Phase::Vote => {
            if let Some(request) = state.pending_human_vote() {
                println!("{}, who do you vote to banish?", request.voter.name);
                for (i, c) in request.candidates.iter().enumerate() {
                    println!("  {}. {}", i + 1, c.name);
                }
            }
        }
        Phase::Ended => {
            if let Some(outcome) = &state.outcome {
                println!();
                println!("{}", outcome.title);
                println!("Roles:");
                for p in &state.players {
                    let fate = if p.alive { "" } else { " (eliminated)" };
                    println!("  {} - {}{}", p.name, p.role, fate);
                }
            }
        }
    }
}

fn parse_vote<'a>(request: &'a HumanVoteRequest, input: &str) -> Option<&'a PlayerRef> {
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| request.candidates.get(i));
    }
    request
        .candidates
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(input))
}

fn display_status(state: &GameState) {
    println!();
    println!(
        "--- Round {} | {} | {} alive ---",
        state.round,
        state.phase,
        state.alive_count()
    );
    for p in &state.players {
        let marker = if p.is_human { " (you)" } else { "" };
        let status = if p.alive { "alive" } else { "eliminated" };
        println!("  {}{} - {}", p.name, marker, status);
    }
}
