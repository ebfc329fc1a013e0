//! jbpub CLI - share links and repository resolution for JupyterBook.pub.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod settings;

use logging::LogFormat;
use settings::Settings;

/// jbpub - build shareable JupyterBook.pub links
#[derive(Parser, Debug)]
#[command(name = "jbpub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "JBPUB_CONFIG")]
    config: Option<PathBuf>,

    /// Public base URL share links are built under
    #[arg(long)]
    base_url: Option<String>,

    /// Resolver base URL (defaults to the base URL)
    #[arg(long)]
    resolver_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the share link for a repository reference
    Link {
        /// Repository URL, with or without scheme
        input: String,
    },

    /// Ask the resolver what a repository reference points to
    Resolve {
        /// Repository URL, with or without scheme
        input: String,
        /// Print the raw answer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read references from stdin line by line and print live link state
    Watch {
        /// Debounce window in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,
    },

    /// Serve the link generator page
    Serve {
        /// Listen address
        #[arg(short, long)]
        listen: Option<std::net::SocketAddr>,
    },

    /// Show configuration and resolver health
    Status,

    /// Show version information
    Version,
}

impl Cli {
    /// Applies command-line overrides on top of loaded settings.
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(base_url) = &self.base_url {
            settings.base_url.clone_from(base_url);
        }
        if let Some(resolver_url) = &self.resolver_url {
            settings.resolver_url = Some(resolver_url.clone());
        }
        if self.json_logs {
            settings.log_format = "json".to_string();
        }
        match &self.command {
            Commands::Watch {
                debounce_ms: Some(ms),
            } => settings.debounce_ms = *ms,
            Commands::Serve {
                listen: Some(addr),
            } => settings.listen_addr = *addr,
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    cli.apply_overrides(&mut settings);

    let log_level = logging::raise_level(&settings.log_level, cli.verbose);
    logging::init_logging(log_level, LogFormat::parse(&settings.log_format));

    let result = match &cli.command {
        Commands::Link { input } => commands::link(&settings, input),
        Commands::Resolve { input, json } => commands::resolve(&settings, input, *json).await,
        Commands::Watch { .. } => commands::watch(&settings).await,
        Commands::Serve { .. } => commands::serve(&settings).await,
        Commands::Status => commands::status(&settings).await,
        Commands::Version => {
            commands::version();
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
