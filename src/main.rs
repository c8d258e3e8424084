mod cli;
mod config;
mod error;
mod joke;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jokebox")]
#[command(about = "Fetch dad jokes and keep the good ones", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: <config dir>/jokebox/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a joke, or manage saved jokes
    Joke {
        #[command(subcommand)]
        command: Option<JokeCommands>,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum JokeCommands {
    /// Save the last fetched joke
    Save,
    /// List saved jokes
    List,
    /// Delete a saved joke by its number in `joke list`
    Delete {
        /// Joke number, starting at 1
        #[arg(allow_hyphen_values = true)]
        number: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Create an empty configuration file
    Init,
    /// Print the configuration file path
    Path,
    /// Print a configuration value
    Get {
        /// Dotted key, e.g. joke.last
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Dotted key, e.g. joke.url
        key: String,
        value: String,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG overrides the -v flags
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config;
    let result = match cli.command {
        Commands::Joke { command } => match command {
            None => cli::joke::fetch(config),
            Some(JokeCommands::Save) => cli::joke::save(config),
            Some(JokeCommands::List) => cli::joke::list(config),
            Some(JokeCommands::Delete { number }) => cli::joke::delete(config, &number),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Init => cli::config::init(config),
            ConfigCommands::Path => cli::config::path(config),
            ConfigCommands::Get { key } => cli::config::get(config, &key),
            ConfigCommands::Set { key, value } => cli::config::set(config, &key, &value),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
