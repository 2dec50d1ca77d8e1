use clap::Parser;
use leadsync::cli::{execute_command, Cli};
use leadsync::utils::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = execute_command(cli).await {
        eprintln!("leadsync: {}", e);
        std::process::exit(1);
    }
}
