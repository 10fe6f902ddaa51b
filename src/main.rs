use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    match credit_pulse::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
