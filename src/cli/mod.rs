pub mod mode;
pub mod prompt;

use clap::{CommandFactory, Parser};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use log::info;

use crate::api::client::{self, ClientConfig, ProviderRegistry};
use crate::api::types::LookupOutcome;
use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::output;
use crate::progress::ProgressManager;
use mode::Selection;

/// Institutional directory lookup CLI
#[derive(Parser, Debug)]
#[command(
    name = "dirlook",
    about = "Institutional directory lookup CLI - query user and device records from the terminal",
    version,
    author,
    long_about = None
)]
pub struct Cli {
    /// NetID of the user to look up
    #[arg(short, long)]
    pub user: Option<String>,

    /// Name of the device to look up
    #[arg(short, long)]
    pub device: Option<String>,

    /// Name of the group to look up
    #[arg(short, long)]
    pub group: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Styled report (default)
    Text,
    /// Raw record as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl Cli {
    /// Run the CLI application
    pub async fn run() -> Result<()> {
        let cli = Self::parse();

        // Set up logging
        if cli.verbose {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
                .init();
        } else {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }

        let result = cli.execute().await;

        // Handle errors with better messaging
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                match &e {
                    LookupError::NoToken => {
                        eprintln!("Error: API token is not set.");
                        eprintln!("\nSet the DIRLOOK_TOKEN environment variable, or add");
                        eprintln!("directory.token to ~/.dirlook/config.yaml.");
                    }
                    LookupError::Unreachable(_) => {
                        eprintln!(
                            "Unable to connect to the API - please ensure you are connected to the campus network."
                        );
                    }
                    LookupError::ApiError {
                        code,
                        message,
                        hint,
                    } => {
                        eprintln!("Error: {}", message);
                        if cli.verbose {
                            eprintln!("Code: {}", code);
                        }
                        if let Some(hint) = hint {
                            eprintln!("\nHint: {}", hint);
                        }
                    }
                    LookupError::Network(err) => {
                        eprintln!("Network error: {}", err);
                        eprintln!("\nPlease check your internet connection and try again.");
                    }
                    LookupError::Parse(msg) => {
                        eprintln!("Error parsing response: {}", msg);
                        if !cli.verbose {
                            eprintln!("\nRun with --verbose for more details.");
                        }
                    }
                    _ => {
                        eprintln!("Error: {}", e);
                        if let Some(hint) = e.hint() {
                            eprintln!("\nHint: {}", hint);
                        }
                    }
                }
                Err(e)
            }
        }
    }

    async fn execute(&self) -> Result<()> {
        let config = Config::load()?;
        let token = config.get_token().ok_or(LookupError::NoToken)?;

        let selection = mode::resolve(
            self.user.as_deref(),
            self.device.as_deref(),
            self.group.as_deref(),
        );

        let (mode, query) = match selection {
            Selection::None => {
                Self::command().print_help()?;
                println!();
                return Err(LookupError::NoMode);
            }
            Selection::Ambiguous => return Err(LookupError::AmbiguousMode),
            Selection::Single(mode, query) => (mode, query),
        };

        if self.verbose {
            info!("Verbose logging enabled.");
            println!("{}", self.parameter_table());
        }

        let client_config = ClientConfig {
            token,
            base_url: config.get_base_url(),
            ..Default::default()
        };

        let registry = ProviderRegistry::standard(client_config.clone())?;
        let provider = registry
            .get(mode)
            .ok_or_else(|| LookupError::NoProvider(mode.as_str().to_string()))?;

        // Fail fast on an unreachable host before the real request goes out
        client::self_test(&client_config).await?;

        info!("Using `{}` provider.", mode.as_str());

        let progress = ProgressManager::new(self.verbose);
        let spinner = progress.create_lookup_spinner(&format!(
            "Searching the {} for \"{}\"...",
            mode.display_name(),
            query
        ));

        let outcome = provider.lookup(&query).await;

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let response = match outcome? {
            LookupOutcome::Found(response) => response,
            LookupOutcome::NotFound => {
                println!(
                    "🔍 Could not locate a {} with this identifier.",
                    mode.as_str()
                );
                return Ok(());
            }
        };

        let record = prompt::disambiguate(provider, &query, &response.records)?;
        let report = output::format_report(provider, record, self.format)?;
        println!("{}", report);

        Ok(())
    }

    /// Echo the resolved invocation parameters (verbose mode only)
    fn parameter_table(&self) -> String {
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("Parameter").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

        table.add_row(vec![
            Cell::new("user"),
            Cell::new(self.user.as_deref().unwrap_or("-")),
        ]);
        table.add_row(vec![
            Cell::new("device"),
            Cell::new(self.device.as_deref().unwrap_or("-")),
        ]);
        table.add_row(vec![
            Cell::new("group"),
            Cell::new(self.group.as_deref().unwrap_or("-")),
        ]);
        table.add_row(vec![
            Cell::new("verbose"),
            Cell::new(self.verbose.to_string()),
        ]);
        table.add_row(vec![Cell::new("format"), Cell::new(self.format.as_str())]);

        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.to_string()
    }
}
