use std::process::ExitCode;

use dirlook::cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Cli::run already reported the failure on stderr
    match cli::Cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
