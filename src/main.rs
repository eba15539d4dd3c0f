use clap::Parser;
use slsa_provenance::{
    cli::{self, commands::GenerateCommands},
    error::Result,
};

#[derive(Parser)]
#[command(name = cli::CLI_NAME, version = cli::CLI_VERSION, author, about)]
pub struct Cli {
    #[command(subcommand)]
    command: GenerateCommands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    slsa_provenance::init_logging()?;

    // Parse command line arguments
    let cli = Cli::parse();

    let result = cli::handlers::handle_generate_command(cli.command).await;

    // Format and display any errors
    if let Err(ref e) = result {
        eprintln!("{}", cli::format_error(e));
    }

    result
}
