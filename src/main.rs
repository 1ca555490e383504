//! KBK Dashboard - Main Entry Point
//!
//! Terminal client for the thesis-title (KBK) prediction API: predict,
//! browse history and inspect the Naive Bayes model analysis.

mod api;
mod constants;
mod logic;
mod output;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use api::{AnalysisPage, Dashboard};
use logic::config::DashboardConfig;
use logic::history::{Confirmation, Preconfirmed};

#[derive(Parser)]
#[command(name = "kbk-dashboard")]
#[command(about = "KBK thesis-title prediction dashboard")]
#[command(version)]
struct Cli {
    /// Print responses as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Prediction API base URL (overrides KBK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List trained models (adopts the latest if none is selected)
    Models,

    /// Select the model version used for predictions and analysis
    Select {
        version: String,
    },

    /// Predict the KBK of a thesis title
    Predict {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Prediction history of this session
    #[command(subcommand)]
    History(HistoryCommand),

    /// Model analysis
    Analyze {
        #[arg(value_enum)]
        page: Page,

        /// Analyse this version instead of the selected one
        #[arg(long)]
        model_version: Option<String>,
    },

    /// Show the session token
    Session {
        /// Forget the token and start a new session
        #[arg(long)]
        reset: bool,
    },

    /// Backend health check
    Health,

    /// Ask the backend to train a new model
    Train,
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List past predictions
    #[command(alias = "ls")]
    List,

    /// Show a past prediction
    Show { id: String },

    /// Delete one prediction
    #[command(alias = "rm")]
    Delete { id: String },

    /// Delete every prediction of this session
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Page {
    Overview,
    Performance,
    NaiveBayes,
    Features,
}

impl From<Page> for AnalysisPage {
    fn from(page: Page) -> Self {
        match page {
            Page::Overview => AnalysisPage::Overview,
            Page::Performance => AnalysisPage::Performance,
            Page::NaiveBayes => AnalysisPage::NaiveBayes,
            Page::Features => AnalysisPage::Features,
        }
    }
}

/// `[y/N]` prompt on stdin
struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Load `.env` (or `env_file`), then build the logger so `RUST_LOG` may come from it
fn init_environment(env_file: Option<&Path>) -> env_logger::Builder {
    match env_file {
        Some(path) => dotenvy::from_path(path).ok(),
        None => dotenvy::dotenv().ok().map(drop),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
}

fn main() -> ExitCode {
    init_environment(None).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = DashboardConfig::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }

    log::info!("{} v{} using {}", constants::APP_NAME, constants::APP_VERSION, config.api_url);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let dash = Dashboard::open(config).map_err(anyhow::Error::msg)?;
    runtime.block_on(dispatch(&dash, cli.command, cli.json))
}

async fn dispatch(dash: &Dashboard, command: Commands, as_json: bool) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Models => show("load models", api::list_models(dash).await, as_json, output::models),
        Commands::Select { version } => {
            show("select model", api::select_model(dash, &version), as_json, output::selected)
        }
        Commands::Predict { title } => {
            let title = title.join(" ");
            match api::predict(dash, &title).await.transpose() {
                Some(response) => show("predict", response, as_json, output::prediction),
                None => {
                    output::info("Empty title, nothing to predict");
                    Ok(ExitCode::SUCCESS)
                }
            }
        }
        Commands::History(cmd) => match cmd {
            HistoryCommand::List => {
                show("load history", api::history_list(dash).await, as_json, |rows| {
                    output::history(rows)
                })
            }
            HistoryCommand::Show { id } => {
                show("load history entry", api::history_show(dash, &id).await, as_json, output::prediction)
            }
            HistoryCommand::Delete { id } => {
                show("delete history entry", api::history_delete(dash, &id).await, as_json, output::deleted)
            }
            HistoryCommand::Clear { yes } => {
                let response = if yes {
                    api::history_clear(dash, &Preconfirmed(true)).await
                } else {
                    api::history_clear(dash, &StdinConfirmation).await
                };
                show("clear history", response, as_json, output::cleared)
            }
        },
        Commands::Analyze { page, model_version } => show(
            "load analysis",
            api::analyze(dash, page.into(), model_version.as_deref()).await,
            as_json,
            output::analysis,
        ),
        Commands::Session { reset } => {
            show("read session", api::session_info(dash, reset), as_json, output::session)
        }
        Commands::Health => show("reach backend", api::health(dash).await, as_json, output::health),
        Commands::Train => show("start training", api::train(dash).await, as_json, output::trained),
    }
}

/// Render a command response. A failed command prints its error and exits non-zero.
fn show<T: Serialize>(
    action: &str,
    response: Result<T, String>,
    as_json: bool,
    render: impl FnOnce(&T),
) -> anyhow::Result<ExitCode> {
    match response {
        Ok(value) if as_json => {
            output::json(&value).context("Failed to encode response")?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(value) => {
            render(&value);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            output::error(&format!("Could not {}: {}", action, e));
            Ok(ExitCode::FAILURE)
        }
    }
}
