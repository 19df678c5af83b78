use imgmap_cli::cli::CliCommand;
use imgmap_core::logging;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    logging::init_logging();

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("imgmap error: {:#}", err);
        std::process::exit(1);
    }
}
