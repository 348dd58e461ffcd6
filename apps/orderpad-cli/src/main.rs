//! # OrderPad CLI
//!
//! Terminal front end for the OrderPad POS client.
//!
//! ## Session Handling
//! The token is never written to disk. `login` prints it; later commands
//! read it from `--token` or `ORDERPAD_TOKEN`:
//!
//! ```text
//! $ export ORDERPAD_TOKEN=$(orderpad login -u alice -p s3cret --quiet)
//! $ orderpad menu
//! ```

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use orderpad_client::{ClientConfig, Notifier, Services, Session};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "orderpad")]
#[command(about = "Order-taking client for the POS backend")]
#[command(version)]
struct Cli {
    /// Settings file (default: platform config dir/settings.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Bearer token from a previous login
    #[arg(long, env = "ORDERPAD_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the bearer token
    Login {
        #[arg(short, long, env = "ORDERPAD_USER")]
        user: String,

        #[arg(short, long, env = "ORDERPAD_PASSWORD", hide_env_values = true)]
        password: String,

        /// Print only the token
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show who the current token belongs to
    Whoami,

    /// Show the menu grouped by category
    Menu {
        /// Only list products of this category
        #[arg(long)]
        category: Option<String>,
    },

    /// List dining areas
    Areas {
        /// Bypass the freshness window and report failures
        #[arg(long)]
        refresh: bool,
    },

    /// List warehouses
    Warehouses,

    /// Validate an order type (and area for dine-in)
    OrderType {
        /// dine_in, take_away or delivery (default from settings)
        order_type: Option<String>,

        /// Area id, required for dine-in
        #[arg(long)]
        area: Option<String>,
    },

    /// Show or edit the settings file
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print effective settings (file + environment)
    Show,
    /// Set the backend URL
    SetUrl { url: String },
    /// Set the list freshness window in milliseconds
    SetWindow { millis: u64 },
}

/// Prints notifications to stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_error(&self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let Cli {
        config: config_path,
        token,
        command,
    } = Cli::parse();
    let connect = || load_services(config_path.clone(), token.clone());
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    match command {
        Command::Login {
            user,
            password,
            quiet,
        } => {
            let (_, services) = connect()?;
            commands::login(&services, &user, &password, quiet).await
        }
        Command::Whoami => {
            let (_, services) = connect()?;
            commands::whoami(&services)
        }
        Command::Menu { category } => {
            let (_, services) = connect()?;
            commands::menu(&services, category.as_deref()).await
        }
        Command::Areas { refresh } => {
            let (_, services) = connect()?;
            commands::areas(&services, notifier, refresh).await
        }
        Command::Warehouses => {
            let (_, services) = connect()?;
            commands::warehouses(&services).await
        }
        Command::OrderType { order_type, area } => {
            let (config, services) = connect()?;
            commands::order_type(&services, &config, notifier, order_type.as_deref(), area).await
        }
        // Runs without loading settings so a broken file can still be fixed
        Command::Settings { action } => commands::settings(config_path.clone(), &action),
    }
}

/// Loads settings and wires the services around one session.
fn load_services(
    config_path: Option<PathBuf>,
    token: Option<String>,
) -> anyhow::Result<(ClientConfig, Services)> {
    let config = ClientConfig::load(config_path)?;
    debug!(base_url = %config.api.base_url, device = %config.device.name, "Settings loaded");

    let session = Arc::new(match token {
        Some(token) => Session::with_token(token),
        None => Session::new(),
    });
    let services = Services::new(&config, session)?;
    Ok((config, services))
}
