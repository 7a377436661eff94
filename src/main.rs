use clap::Parser;
use journey_processor::cli::{run, Cli};
use journey_processor::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
