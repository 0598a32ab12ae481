use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use jobfind::client::JSearchClient;
use jobfind::config::Config;
use jobfind::credentials::{mask, CredentialStore, CREDENTIAL_ENV};
use jobfind::error::SearchError;
use jobfind::models::{DatePosted, EmploymentType, ExperienceLevel, SearchFilters, SortOrder};
use jobfind::notify::{ConsoleNotifier, NoticeKind, Notifier};
use jobfind::render::{view, HtmlPresenter, RenderOptions, TextPresenter, View};
use jobfind::session::{DisplayState, SearchState, Session};
use jobfind::tui;

#[derive(Parser)]
#[command(name = "jobfind")]
#[command(about = "Search job listings from the terminal")]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a search and print the results as cards
    Search {
        #[command(flatten)]
        filters: FilterArgs,

        /// Write the results as an HTML page instead of printing cards
        #[arg(long, conflicts_with = "json")]
        html: Option<PathBuf>,

        /// Print the normalized results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse results interactively (sort with s, page with n/p)
    Browse {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Manage the API key
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Job title or keywords
    #[arg(short, long, default_value = "")]
    title: String,

    /// City, state or country
    #[arg(short, long, default_value = "")]
    location: String,

    /// Only jobs posted within this window
    #[arg(long, value_enum, default_value = "all")]
    posted: DatePosted,

    /// Only remote jobs
    #[arg(long)]
    remote: bool,

    /// Employment type
    #[arg(long = "type", value_enum)]
    employment_type: Option<EmploymentType>,

    /// Experience requirement
    #[arg(long, value_enum)]
    experience: Option<ExperienceLevel>,

    /// Result page (1-50)
    #[arg(short, long, default_value = "1")]
    page: u32,

    /// Sort order for the page (defaults to the configured order)
    #[arg(short, long, value_enum)]
    sort: Option<SortOrder>,
}

impl FilterArgs {
    fn to_filters(&self) -> SearchFilters {
        SearchFilters {
            title: self.title.clone(),
            location: self.location.clone(),
            posted_within: self.posted,
            remote_only: self.remote,
            employment_type: self.employment_type,
            experience: self.experience,
        }
    }
}

#[derive(Subcommand)]
enum KeyCommands {
    /// Save the RapidAPI key
    Set {
        /// API key
        key: String,
    },

    /// Show which key is in use
    Show,

    /// Remove the saved key
    Clear,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration
    Show,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_session(filters: &FilterArgs, config: &Config, store: &CredentialStore) -> Result<Session> {
    let credential = store.resolve(std::env::var(CREDENTIAL_ENV).ok())?;
    let sort = filters.sort.unwrap_or(config.default_sort);
    let mut session = Session::new(SearchState::new(credential, sort));
    session.go_to_page(filters.page);
    Ok(session)
}

fn prompt_for_key(notifier: &dyn Notifier) {
    notifier.notify(&SearchError::MissingCredential.to_string(), NoticeKind::Error);
    notifier.notify(
        &format!("Run `jobfind key set <KEY>` or set {}.", CREDENTIAL_ENV),
        NoticeKind::Info,
    );
}

fn main() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_from(&config_path)?;
    let store = CredentialStore::open();
    let notifier = ConsoleNotifier;

    match cli.command {
        Commands::Search { filters, html, json } => {
            let mut session = open_session(&filters, &config, &store)?;
            let client = JSearchClient::new(&config)?;
            session.search(&filters.to_filters(), &client);

            if session.display() == &DisplayState::Error(SearchError::MissingCredential) {
                prompt_for_key(&notifier);
                return Ok(ExitCode::FAILURE);
            }

            let current = view(session.state(), session.display(), RenderOptions::from(&config));
            if let Some(path) = html {
                std::fs::write(&path, HtmlPresenter.present(&current))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                if let Some((message, kind)) = current.notice() {
                    notifier.notify(message, kind);
                }
                notifier.notify(&format!("Saved results to {}", path.display()), NoticeKind::Success);
            } else if json {
                let jobs = match &current {
                    View::Results { jobs, .. } => jobs.clone(),
                    _ => Vec::new(),
                };
                println!("{}", serde_json::to_string_pretty(&jobs)?);
                // stdout stays machine-readable; the reason goes to stderr
                if let Some((message, kind)) = current.notice() {
                    notifier.notify(message, kind);
                }
            } else {
                let mut out = io::stdout().lock();
                TextPresenter::default().present(&current, &mut out)?;
                out.flush()?;
            }

            match current {
                View::Error { guidance: false, .. } => Ok(ExitCode::FAILURE),
                _ => Ok(ExitCode::SUCCESS),
            }
        }

        Commands::Browse { filters } => {
            let session = open_session(&filters, &config, &store)?;
            if session.state().credential.is_none() {
                prompt_for_key(&notifier);
                return Ok(ExitCode::FAILURE);
            }
            let client = JSearchClient::new(&config)?;
            tui::run_browse(session, filters.to_filters(), &client, RenderOptions::from(&config))?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Key { command } => {
            match command {
                KeyCommands::Set { key } => match store.store(&key) {
                    Ok(_) => notifier.notify("API key saved successfully!", NoticeKind::Success),
                    Err(e) => {
                        notifier.notify(&e.to_string(), NoticeKind::Error);
                        return Ok(ExitCode::FAILURE);
                    }
                },
                KeyCommands::Show => {
                    let from_env = std::env::var(CREDENTIAL_ENV).ok().filter(|v| !v.trim().is_empty());
                    match (from_env, store.load()?) {
                        (Some(key), _) => println!("{} (from {})", mask(key.trim()), CREDENTIAL_ENV),
                        (None, Some(key)) => println!("{} (from {})", mask(&key), store.path().display()),
                        (None, None) => println!("No API key configured."),
                    }
                }
                KeyCommands::Clear => {
                    if store.clear()? {
                        notifier.notify("API key removed.", NoticeKind::Success);
                    } else {
                        println!("No saved API key.");
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config { command } => {
            match command {
                ConfigCommands::Path => println!("{}", config_path.display()),
                ConfigCommands::Show => print!("{}", config.to_toml()?),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
