mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docqa")]
#[command(about = "Ask questions about a PDF, answered by Gemini", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug logs from the pipeline
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask questions interactively (default)
    Chat,

    /// Answer a single question and exit
    Ask {
        /// The question to answer
        question: String,

        /// Print the retrieved chunks the answer was based on
        #[arg(long)]
        sources: bool,
    },

    /// Build the index and show statistics
    Stats,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("docqa=debug,docqa_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(session) = commands::open_session().await? else {
        std::process::exit(1);
    };

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            commands::chat::run(&session).await?;
        }
        Commands::Ask { question, sources } => {
            commands::ask::run(&session, &question, sources).await?;
        }
        Commands::Stats => {
            commands::stats::run(&session)?;
        }
    }

    Ok(())
}
