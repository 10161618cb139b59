use allure_docx::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Recoverable rendering problems (missing attachments, chart failures)
    // are reported as warnings; surface them by default.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match cli::run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
