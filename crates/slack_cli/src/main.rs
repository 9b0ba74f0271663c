use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    slack_cli::run().await
}
