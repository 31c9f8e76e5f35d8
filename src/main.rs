use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match pinata_overlay::run_with_config().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "overlay stopped");
            ExitCode::FAILURE
        }
    }
}
