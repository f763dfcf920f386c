use std::process::ExitCode;

use rmd::{cli, logger};

fn main() -> ExitCode {
    logger::init();

    let matches = cli::cli().get_matches_from(cli::normalize_args(std::env::args_os()));

    // Returning instead of exiting lets every temporary resource clean up first.
    match cli::options_from(&matches).and_then(rmd::run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rmd: {}", e);
            ExitCode::FAILURE
        }
    }
}
