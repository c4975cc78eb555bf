//! ghfav CLI: GitHub user favorites in the terminal

mod commands;
mod logging;
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

use ghfav::data::{FavoritesStore, FileStore, Settings};
use ghfav::lookup::GithubLookup;

#[derive(Parser)]
#[command(name = "ghfav", about = "Keep a list of favorite GitHub users", version)]
struct Cli {
    /// Directory holding the favorites file
    #[arg(long, global = true, env = "GHFAV_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// GitHub API root (e.g. a GitHub Enterprise server)
    #[arg(long, global = true, env = "GHFAV_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Look up users and add them to favorites
    Add {
        /// GitHub logins
        #[arg(required = true)]
        logins: Vec<String>,
    },
    /// Remove a user from favorites
    Remove {
        /// GitHub login
        login: String,
    },
    /// List favorites
    List {
        /// Print the raw JSON list
        #[arg(long)]
        json: bool,
    },
    /// Show one favorite
    Show {
        /// GitHub login
        login: String,
        /// Fetch the live profile as well
        #[arg(long)]
        refresh: bool,
    },
    /// Interactive view (default)
    Tui,
}

/// Settings merged with command-line overrides
///
/// Also returns the load error, if any, so it can be logged once logging
/// is up.
fn settings_for(cli: &Cli) -> (Settings, Option<ghfav::error::AppError>) {
    let (mut settings, load_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = Some(dir.clone());
    }
    if let Some(url) = &cli.api_url {
        settings.api_base_url = url.clone();
    }
    settings.validate();
    (settings, load_error)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Tui);

    let (settings, load_error) = settings_for(&cli);
    let data_dir = settings.favorites_dir()?;

    if matches!(command, Command::Tui) {
        logging::init_file(&data_dir.join("ghfav.log"))?;
    } else {
        logging::init_stderr();
    }
    if let Some(e) = load_error {
        warn!("using default settings: {e}");
    }

    let store = FavoritesStore::load(Box::new(FileStore::new(&data_dir)));
    if !dispatch(command, store, &settings)? {
        std::process::exit(1);
    }
    Ok(())
}

/// Run one command; `Ok(false)` means it failed and was already reported
///
/// The GitHub client is only built for commands that go to the network, so
/// a bad token never gets in the way of local ones.
fn dispatch(
    command: Command,
    store: FavoritesStore,
    settings: &Settings,
) -> Result<bool, Box<dyn std::error::Error>> {
    let ok = match command {
        Command::Add { logins } => {
            let lookup = GithubLookup::from_settings(settings)?;
            commands::add(store, &lookup, &logins)
        }
        Command::Remove { login } => commands::remove(store, &login),
        Command::List { json } => commands::list(&store, json)?,
        Command::Show { login, refresh } if refresh => {
            let lookup = GithubLookup::from_settings(settings)?;
            commands::show(&store, Some(&lookup), &login)
        }
        Command::Show { login, .. } => commands::show(&store, None, &login),
        Command::Tui => {
            tui::run(store, GithubLookup::from_settings(settings)?, settings)?;
            true
        }
    };
    Ok(ok)
}
