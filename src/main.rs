use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match tickring::cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(tickring::errors::get_exit_code(&e))
        }
    }
}
