use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match clinassist_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("clinassist: {e}");
            ExitCode::FAILURE
        }
    }
}
