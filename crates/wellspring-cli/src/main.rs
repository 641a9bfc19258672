use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wellspring-cli", version, about = "Wellspring CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Guided breathing exercise
    Breathe {
        #[command(subcommand)]
        action: commands::breathe::BreatheAction,
    },
    /// Wellness check questionnaire
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Mood tracking
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Journaling
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Wellness history
    Dashboard {
        #[command(subcommand)]
        action: commands::dashboard::DashboardAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Breathe { action } => commands::breathe::run(action),
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Mood { action } => commands::mood::run(action),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Dashboard { action } => commands::dashboard::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
