use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use waterbuddy_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "waterbuddy", version, about = "WaterBuddy daily hydration tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive tracking session (state lasts until you quit)
    Shell {
        /// Print events and snapshots as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// List age groups, standard goals and quick-add amounts
    Catalog {
        #[arg(long)]
        json: bool,
    },
    /// Print a hydration tip
    Tip(commands::tip::TipArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("warning: {e}; using defaults");
            Config::default()
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Commands::Shell { json } => commands::shell::run(config, json),
        Commands::Catalog { json } => commands::catalog::run(json),
        Commands::Tip(args) => commands::tip::run(&config, args),
        Commands::Config { action } => commands::config::run(config, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
