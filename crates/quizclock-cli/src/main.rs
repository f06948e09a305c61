//! quizclock CLI — timed terminal quiz.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod run;

#[derive(Parser)]
#[command(name = "quizclock", version, about = "Timed terminal quiz runner")]
struct Cli {
    /// CSV file containing quiz questions [default: problem.csv]
    #[arg(long)]
    filename: Option<PathBuf>,

    /// Time limit per question in seconds [default: 10]
    #[arg(long)]
    limit: Option<u64>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ignore answers typed before their question is shown
    #[arg(long)]
    discard_stale_input: bool,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never interleave with the quiz on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizclock=warn")),
        )
        .init();

    let cli = Cli::parse();

    let overrides = run::Overrides {
        filename: cli.filename,
        limit: cli.limit,
        discard_stale_input: cli.discard_stale_input,
    };

    if let Err(e) = run::execute(overrides, cli.config).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
