mod config;
mod error;
mod replay;
mod scenario;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dormcraft_core::{
    Board, LayoutRegistry, SuggestionContext, SuggestionPipeline, SuggestionSource,
    layouts_by_creator,
};
use dormcraft_openrouter::{OpenRouterClient, OpenRouterSource};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{load_api_key, load_config};
use crate::replay::ReplaySource;
use crate::scenario::{load_candidate, Scenario, Submission};

#[derive(Parser)]
#[command(name = "dcraft")]
#[command(about = "DormCraft layout validation and suggestions", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG is used otherwise)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a scenario's proposals and optionally check one more layout
    Validate {
        #[arg(long)]
        scenario: PathBuf,

        /// Extra layout candidate (JSON) to check against the room
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Report every violation instead of the first
        #[arg(long)]
        all: bool,
    },
    /// Ask a model for a compromise layout and add it if it validates
    Suggest {
        #[arg(long)]
        scenario: PathBuf,

        /// Model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Seconds before the model call is abandoned
        #[arg(long)]
        timeout: Option<u64>,

        /// Use a recorded model response instead of calling OpenRouter
        #[arg(long)]
        replay: Option<PathBuf>,
    },
    /// Print the context payload a model would receive
    Prompt {
        #[arg(long)]
        scenario: PathBuf,
    },
    /// Print the board's share link
    Link {
        #[arg(long)]
        scenario: PathBuf,

        #[arg(long)]
        base_url: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Validate {
            scenario,
            layout,
            all,
        } => validate(&scenario, layout.as_deref(), all),
        Command::Suggest {
            scenario,
            model,
            timeout,
            replay,
        } => {
            let config = load_config()?;
            let (mut board, _) = Scenario::load(&scenario)?.into_board()?;
            let deadline = config.timeout(timeout);

            match replay {
                Some(path) => {
                    let source = ReplaySource::from_file(&path)?;
                    suggest(&mut board, &source, deadline).await
                }
                None => {
                    let client =
                        OpenRouterClient::new(load_api_key(&config)?).with_timeout(deadline)?;
                    let source = OpenRouterSource::new(client, config.model(model));
                    info!(model = %source.model(), "requesting suggestion");
                    suggest(&mut board, &source, deadline).await
                }
            }
        }
        Command::Prompt { scenario } => {
            let (board, _) = Scenario::load(&scenario)?.into_board()?;
            println!("{}", SuggestionContext::from_registry(&board).render());
            Ok(ExitCode::SUCCESS)
        }
        Command::Link { scenario, base_url } => {
            let config = load_config()?;
            let (board, _) = Scenario::load(&scenario)?.into_board()?;
            println!("{}", board.share_link(&config.share_base_url(base_url)));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn validate(scenario: &Path, layout: Option<&Path>, all: bool) -> anyhow::Result<ExitCode> {
    let (board, submissions) = Scenario::load(scenario)?.into_board()?;

    for submission in &submissions {
        match submission {
            Submission::Accepted { creator, layout_id } => {
                println!("{layout_id}: accepted from {creator}");
            }
            Submission::Rejected { creator, violation } => {
                println!("rejected from {creator}: {violation}");
            }
        }
    }

    for (creator, count) in layouts_by_creator(board.current_layouts()) {
        println!("{creator}: {count} layout(s) on {}", board.board_id());
    }

    let Some(path) = layout else {
        return Ok(ExitCode::SUCCESS);
    };

    let candidate = load_candidate(path)?;
    let validator = board.validator();
    let violations = if all {
        validator.violations(&candidate)
    } else {
        validator.validate(&candidate).err().into_iter().collect()
    };

    if violations.is_empty() {
        println!("{}: valid", path.display());
        return Ok(ExitCode::SUCCESS);
    }
    for violation in &violations {
        println!("{}: {violation}", path.display());
    }
    Ok(ExitCode::FAILURE)
}

async fn suggest<S: SuggestionSource>(
    board: &mut Board,
    source: &S,
    deadline: Duration,
) -> anyhow::Result<ExitCode> {
    match SuggestionPipeline::with_deadline(deadline).run(board, source).await {
        Ok(accepted) => {
            println!("{}: {}", accepted.layout_id, accepted.rationale);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("suggestion failed at {}: {err}", err.stage());
            Ok(ExitCode::FAILURE)
        }
    }
}
