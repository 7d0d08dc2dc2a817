use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "loveos", version, about = "LoveOS CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print progress, levels and days online as JSON
    Status,
    /// Print the storage key derived from the configured passcode
    Key,
    /// Print the boot sequence lines
    Boot,
    /// Open reason cards (1-based, in the given order)
    Reasons {
        #[arg(long, value_delimiter = ',', required = true)]
        open: Vec<usize>,
    },
    /// Click the heart monitor
    Heart {
        #[arg(long, default_value = "1")]
        clicks: u32,
    },
    /// Submit a code to the surprise lock
    Unlock {
        /// Code to try; separators are ignored
        code: String,
    },
    /// Answer quiz questions in order (0-based option indices)
    Quiz {
        #[arg(long, value_delimiter = ',', required = true)]
        answers: Vec<usize>,
    },
    /// Show the final letter once level 3 is open
    Letter {
        /// Report the countdown instead of waiting for it
        #[arg(long)]
        no_wait: bool,
    },
    /// Delete the saved progress for the configured passcode
    Reset,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::progress::status(),
        Commands::Key => commands::progress::key(),
        Commands::Boot => commands::progress::boot(),
        Commands::Reasons { open } => commands::play::reasons(&open),
        Commands::Heart { clicks } => commands::play::heart(clicks),
        Commands::Unlock { code } => commands::play::unlock(&code),
        Commands::Quiz { answers } => commands::play::quiz(&answers),
        Commands::Letter { no_wait } => commands::play::letter(!no_wait),
        Commands::Reset => commands::progress::reset(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
