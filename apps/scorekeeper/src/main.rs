//! Command-line driver for the scorekeeper.
//!
//! Each invocation restores the saved session, applies one command and
//! saves the result.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use scorekeeper::domain::{catalog, standings, Category};
use scorekeeper::adapters::GeminiAssistant;
use scorekeeper::services::rule_assistant::{game_context, RuleAssistant};
use scorekeeper::{
    telemetry, AppConfig, AssistantDesk, ContractKind, DomainError, FileSnapshotStore, GameFlow,
    GameState, PlayerId, RoundSubmission,
};

#[derive(Parser)]
#[command(name = "scorekeeper")]
#[command(about = "Keep score of a Wiezen game")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a new game; names in seating order, the first deals first
    Start {
        #[arg(num_args = 4, required = true, value_name = "NAME")]
        names: Vec<String>,
    },
    /// Record a played round
    Round {
        /// Contract token, e.g. normal, troel, abondance, solo-slim
        contract: ContractKind,
        /// Active player(s), by name or id
        #[arg(short, long = "active", num_args = 1..=2, required = true)]
        active: Vec<String>,
        /// Tricks won by the active side
        #[arg(short, long)]
        tricks: u8,
    },
    /// Record a round where everyone passed
    Pass,
    /// Finish the game and show the final standings
    Finish,
    /// Reopen a finished game
    Reopen,
    /// Discard the game and its saved snapshot
    Reset,
    /// Show scores, dealer and round log
    Show,
    /// List the available contracts
    Contracts,
    /// Ask the rule assistant a question about the rules or this game
    Ask {
        #[arg(required = true, num_args = 1.., value_name = "QUESTION")]
        question: Vec<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };
    telemetry::init_tracing(&config.log_filter);

    let store = FileSnapshotStore::new(&config.data_dir);
    let mut flow = GameFlow::restore_with_key(store, config.snapshot_key.clone());

    let desk = AssistantDesk::configured(config.assistant_key.as_deref(), |key| {
        Box::new(GeminiAssistant::new(key)) as Box<dyn RuleAssistant>
    });

    match run(&mut flow, &desk, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error[{}]: {e}", e.code());
            ExitCode::from(2)
        }
    }
}

fn run(
    flow: &mut GameFlow<FileSnapshotStore>,
    desk: &AssistantDesk,
    command: Command,
) -> Result<(), DomainError> {
    match command {
        Command::Start { names } => {
            flow.start_game(&names)?;
            print_state(flow.state());
        }
        Command::Round {
            contract,
            active,
            tricks,
        } => {
            let active = active
                .iter()
                .map(|raw| resolve_player(flow.state(), raw))
                .collect();
            let round = flow.submit_round(RoundSubmission::played(contract, active, tricks))?;
            let doubled = if round.is_doubled { " (x2)" } else { "" };
            println!(
                "Round {}: {} with {} tricks, {} points{doubled}",
                round.round_number, round.contract, round.tricks_won, round.points
            );
            print_state(flow.state());
        }
        Command::Pass => {
            let round = flow.submit_round(RoundSubmission::pass())?;
            println!("Round {}: everyone passed; next round counts double", round.round_number);
            print_state(flow.state());
        }
        Command::Finish => {
            flow.finish_game()?;
            print_standings(flow.state());
        }
        Command::Reopen => {
            flow.reopen_game()?;
            print_state(flow.state());
        }
        Command::Reset => {
            flow.reset_game();
            println!("Game reset.");
        }
        Command::Show => {
            print_state(flow.state());
            print_rounds(flow.state());
        }
        Command::Contracts => print_contracts(),
        Command::Ask { question } => {
            let context = game_context(flow.state());
            println!("{}", desk.ask(&question.join(" "), Some(&context)));
        }
    }
    Ok(())
}

/// Match by id first, then by name (case-insensitive). Unknown input is
/// passed through as an id so the scorer reports it.
fn resolve_player(state: &GameState, raw: &str) -> PlayerId {
    state
        .players()
        .iter()
        .find(|p| p.id.as_str() == raw)
        .or_else(|| {
            state
                .players()
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(raw.trim()))
        })
        .map(|p| p.id.clone())
        .unwrap_or_else(|| PlayerId::new(raw))
}

fn print_state(state: &GameState) {
    println!("{}", game_context(state));
}

fn print_standings(state: &GameState) {
    println!("Final standings:");
    for s in standings(state) {
        println!("  {}. {:<12} {:>5}", s.place, s.name, s.score);
    }
}

fn print_rounds(state: &GameState) {
    if state.rounds().is_empty() {
        return;
    }
    let header: Vec<String> = state
        .players()
        .iter()
        .map(|p| format!("{:>8}", p.name))
        .collect();
    println!("{:>3}  {:<18}{}", "#", "contract", header.join(""));
    for round in state.rounds() {
        let deltas: Vec<String> = state
            .players()
            .iter()
            .map(|p| format!("{:>8}", round.delta_for(&p.id)))
            .collect();
        let doubled = if round.is_doubled { " x2" } else { "" };
        println!(
            "{:>3}  {:<18}{}",
            round.round_number,
            format!("{}{doubled}", round.contract),
            deltas.join("")
        );
    }
}

fn print_contracts() {
    for def in catalog() {
        let side = match def.category {
            Category::Team => "2 vs 2",
            Category::Solo => "1 vs 3",
        };
        println!(
            "{:<14} {:<18} {side}  target {:>2}  tricks {}-{}",
            def.kind.token().to_ascii_lowercase(),
            def.kind.label(),
            def.target,
            def.min_tricks,
            def.max_tricks
        );
    }
    println!(
        "{:<14} {:<18} all pass, next round counts double",
        "pass",
        ContractKind::AllPassed.label()
    );
}
