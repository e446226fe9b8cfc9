use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use adaptive_rps::ai::AdaptiveAgent;
use adaptive_rps::config::AppConfig;
use adaptive_rps::game::Move;
use adaptive_rps::persistence::LoadOutcome;
use adaptive_rps::session::{Session, ShutdownFlag};

/// Play Rock-Paper-Scissors against an AI that learns your habits.
#[derive(Parser)]
#[command(name = "adaptive_rps", about = "Play Rock-Paper-Scissors against an adaptive AI")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "rps.toml")]
    config: PathBuf,

    /// Override the learning file path
    #[arg(long)]
    state: Option<PathBuf>,

    /// Seed the agent's RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

enum ExitReason {
    Quit,
    Interrupted,
}

const HELP: &[&str] = &[
    "Keys:",
    "  r / p / s  play rock, paper or scissors",
    "  t          game statistics",
    "  n          your most common patterns",
    "  l          AI learning status",
    "  h          this help",
    "  q / Esc    quit (Ctrl-C also saves and exits)",
];

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(state) = cli.state {
        config.persistence.path = state;
    }
    if cli.seed.is_some() {
        config.agent.seed = cli.seed;
    }
    config.validate().context("validating configuration")?;

    let (agent, outcome) = AdaptiveAgent::open(config.agent.clone(), config.persistence.clone())
        .with_context(|| format!("loading {}", config.persistence.path.display()))?;

    println!("Welcome to Adaptive Rock Paper Scissors!");
    println!("This AI learns and adapts to your playing style.");
    match outcome {
        LoadOutcome::Loaded => println!(
            "Loaded previous learning ({} games played).",
            agent.stats().games_played()
        ),
        LoadOutcome::Missing => println!("No previous learning found, starting fresh."),
        LoadOutcome::ResetCorrupt => {
            println!("Previous learning file was unreadable, starting fresh.")
        }
    }
    println!();

    let mut session = Session::new(agent);
    let shutdown = ShutdownFlag::install().context("installing signal handler")?;

    enable_raw_mode().context("enabling raw mode")?;
    let res = game_loop(&mut session, &shutdown);
    // Restore terminal; runs even when the loop failed
    let _ = disable_raw_mode();

    let reason = res?;
    session.finish().context("saving learning state")?;

    if let ExitReason::Interrupted = reason {
        println!("\nInterrupted.");
    }
    println!("\nThanks for playing! AI learning progress has been saved.");
    Ok(())
}

fn game_loop(session: &mut Session, shutdown: &ShutdownFlag) -> Result<ExitReason> {
    let mut out = io::stdout();
    emit(&mut out, HELP)?;

    loop {
        if shutdown.is_set() {
            return Ok(ExitReason::Interrupted);
        }
        let ready = match event::poll(POLL_INTERVAL) {
            Ok(ready) => ready,
            Err(_) if shutdown.is_set() => return Ok(ExitReason::Interrupted),
            Err(e) => return Err(e).context("polling terminal events"),
        };
        if !ready {
            continue;
        }
        let Event::Key(key) = event::read().context("reading terminal event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_interrupt(&key) {
            return Ok(ExitReason::Interrupted);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(ExitReason::Quit),
            KeyCode::Char('t') | KeyCode::Char('T') => emit(&mut out, stats_lines(session))?,
            KeyCode::Char('n') | KeyCode::Char('N') => emit(&mut out, pattern_lines(session))?,
            KeyCode::Char('l') | KeyCode::Char('L') => emit(&mut out, learning_lines(session))?,
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => emit(&mut out, HELP)?,
            KeyCode::Char(c) => match c.to_string().parse::<Move>() {
                Ok(player) => {
                    let report = session.play_round(player);
                    emit(
                        &mut out,
                        [
                            format!("You chose: {}", report.player),
                            format!("AI chose: {}", report.agent),
                            report.outcome.verdict().to_string(),
                        ],
                    )?;
                }
                Err(_) => emit(&mut out, ["Invalid move! Press r, p or s (h for help)."])?,
            },
            _ => {}
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

/// Raw mode does not translate `\n`, so every line ends with `\r\n`.
fn emit<I>(out: &mut impl Write, lines: I) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    write!(out, "\r\n")?;
    for line in lines {
        write!(out, "{}\r\n", line.as_ref())?;
    }
    out.flush()
}

fn stats_lines(session: &Session) -> Vec<String> {
    let stats = session.agent().stats();
    let mut lines = vec![
        "Game Statistics:".to_string(),
        format!("Games Played: {}", stats.games_played()),
        format!("AI Wins: {}", stats.wins),
        format!("Player Wins: {}", stats.losses),
        format!("Draws: {}", stats.draws),
        format!("Session started: {}", stats.session_start),
        "Most Successful AI Moves:".to_string(),
    ];
    lines.extend(
        stats
            .top_winning_moves(3)
            .into_iter()
            .map(|(m, count)| format!("- {m}: {count} wins")),
    );
    lines
}

fn pattern_lines(session: &Session) -> Vec<String> {
    let mut lines = vec!["Your Most Common Patterns:".to_string()];
    lines.extend(
        session
            .agent()
            .stats()
            .top_patterns(3)
            .into_iter()
            .map(|(pattern, count)| format!("- {pattern}: {count} times")),
    );
    lines
}

fn learning_lines(session: &Session) -> Vec<String> {
    let status = session.agent().learning_status();
    let mut lines = vec![
        "AI Learning Status:".to_string(),
        format!("Exploration Rate: {:.3}", status.epsilon),
        format!("Patterns Learned: {}", status.patterns_learned),
        "Move Frequencies:".to_string(),
    ];
    lines.extend(
        status
            .move_shares
            .iter()
            .map(|(m, share)| format!("- {m}: {:.1}%", share * 100.0)),
    );
    lines
}
