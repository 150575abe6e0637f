//! CLI frontend for the hilo high/low prediction service.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hilo",
    about = "hilo: high/low outcome tracking and next-round prediction",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the upstream tables and serve predictions over HTTP
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind
        #[arg(short, long, env = "PORT", default_value = "8000")]
        port: u16,

        /// Records kept per table
        #[arg(short, long, default_value = "50")]
        capacity: usize,

        /// Seconds between polls
        #[arg(long, default_value = "5")]
        poll_interval: u64,

        /// Extra seconds to wait after a failed poll
        #[arg(long, default_value = "5")]
        retry_delay: u64,

        /// Upstream request timeout in seconds
        #[arg(long, default_value = "10")]
        timeout: u64,

        /// Base URL of the upstream notify endpoint
        #[arg(long)]
        upstream: Option<String>,

        /// Emit logs as JSON lines
        #[arg(long)]
        log_json: bool,
    },

    /// Predict the next outcome from a sequence of labels
    Predict {
        /// Labels oldest first, e.g. "HHLHL" (T/X also accepted)
        sequence: String,

        /// Rounds considered by the pattern summary
        #[arg(short, long, default_value = "20")]
        window: usize,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Feed a recorded list of rounds through the predictor
    Replay {
        /// JSON file: [{"session": 1, "dice": [1, 2, 3]}, ...]
        file: PathBuf,

        /// Table the rounds belong to: classic or md5
        #[arg(short, long, default_value = "classic")]
        variant: String,

        /// Records kept in history
        #[arg(short, long, default_value = "50")]
        capacity: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            capacity,
            poll_interval,
            retry_delay,
            timeout,
            upstream,
            log_json,
        } => commands::serve::run(commands::serve::ServeArgs {
            host,
            port,
            capacity,
            poll_interval,
            retry_delay,
            timeout,
            upstream,
            log_json,
        }),
        Commands::Predict {
            sequence,
            window,
            json,
        } => commands::predict::run(&sequence, window, json),
        Commands::Replay {
            file,
            variant,
            capacity,
        } => commands::replay::run(&file, &variant, capacity),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
