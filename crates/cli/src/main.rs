use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands {
    pub mod list;
    pub mod schema;
}

#[derive(Parser)]
#[command(name = "quark")]
#[command(about = "Query EC2 instance inventory as quark_ec2_instance rows", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream every instance of every region as JSON rows
    List(ConnectionArgs),
    /// Print the table and column descriptor
    Schema,
}

#[derive(Args)]
pub(crate) struct ConnectionArgs {
    /// Connection file, ini (`[connection]` section) or json object
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    #[arg(long, env = "QUARK_ACCESS_KEY")]
    pub(crate) access_key: Option<String>,

    #[arg(long, env = "QUARK_SECRET_KEY", hide_env_values = true)]
    pub(crate) secret_key: Option<String>,

    #[arg(long, env = "QUARK_SESSION_TOKEN", hide_env_values = true)]
    pub(crate) session_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List(connection) => commands::list::list_instances(connection).await?,
        Commands::Schema => commands::schema::print_schema()?,
    }
    Ok(())
}
