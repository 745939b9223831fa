//! Registrant - plugin registrant generator for Flutter projects

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = registrant::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
