use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "workline-cli", version, about = "Workline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timeline layout inference
    Timeline {
        #[command(subcommand)]
        action: commands::timeline::TimelineAction,
    },
    /// Portfolio overview
    Apps {
        #[command(subcommand)]
        action: commands::apps::AppsAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timeline { action } => commands::timeline::run(action),
        Commands::Apps { action } => commands::apps::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
