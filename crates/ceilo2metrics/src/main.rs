use ceilo2metrics::{run_from_args, CliError};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match run_from_args(std::env::args_os(), &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        // clap prints help/version to stdout and usage errors to stderr
        Err(CliError::Argument(err)) => err.exit(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
