use crate::nace::NaceCode;
use clap::Parser;
use clap::error::ErrorKind;

/// Exit status for a missing or invalid argument.
pub const USAGE_EXIT_CODE: i32 = 1;

#[derive(Debug, Parser)]
#[command(name = "nace-filter", version)]
#[command(about = "Extract the rows of <data-dir>/activity.csv matching a NACE code")]
pub struct Cli {
    /// NACE code to keep, exactly 5 digits (e.g. 62020)
    #[arg(value_name = "NACE")]
    pub code: NaceCode,
}

impl Cli {
    /// Parses the process arguments, exiting with [`USAGE_EXIT_CODE`] and the
    /// usage line on stderr when they are missing or invalid.
    pub fn parse_or_exit() -> Self {
        Self::try_parse().unwrap_or_else(|err| {
            let code = exit_code(err.kind());
            if code == 0 {
                err.exit()
            }
            // Nothing left to report to if stderr itself is gone.
            err.print().ok();
            std::process::exit(code)
        })
    }
}

/// Maps a clap error to the process exit status: help and version output are
/// successes, everything else is a usage error.
pub fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => USAGE_EXIT_CODE,
    }
}
