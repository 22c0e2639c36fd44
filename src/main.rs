use clap::Parser;
use session_server::CliArgs;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Delegate to the server framework entry point; failures are already logged.
    match session_server::run_with_config(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
