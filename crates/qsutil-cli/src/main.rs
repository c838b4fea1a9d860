use qsutil_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if let Err(file_err) = logging::init_logging() {
        match logging::init_logging_stderr() {
            Ok(()) => tracing::warn!("log file unavailable, using stderr: {:#}", file_err),
            Err(e) => eprintln!("qsutil: logging disabled: {:#}", e),
        }
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("qsutil error: {:#}", err);
        std::process::exit(1);
    }
}
