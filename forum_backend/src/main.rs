use anyhow::Result;
use clap::{Parser, Subcommand};
use forum_backend::bootstrap;
use forum_backend::cli;
use forum_backend::config::ForumConfig;
use forum_backend::telemetry;
use forum_backend::threading::ThreadService;

#[derive(Parser)]
#[command(author, version, about = "Forum backend with threads, comments, replies and likes")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the assembled view of one thread as JSON
    View {
        thread_id: String,
    },
    /// Start the interactive CLI for threads, comments, replies, and likes
    Cli,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let args = Args::parse();

    let config = ForumConfig::from_env()?;
    let resources = bootstrap::initialize(&config)?;

    match args.command.unwrap_or(Command::Cli) {
        Command::View { thread_id } => {
            let view = ThreadService::new(resources.database)
                .get_thread(&thread_id)
                .await?;
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
        Command::Cli => cli::run_cli(config, resources.database).await,
    }
}
