use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod util;

/// Exit status when some formulas were skipped but the run completed.
const EXIT_PARTIAL: u8 = 2;

fn main() -> ExitCode {
    let cli = cli::parse();
    let opts = cli.command.io();
    init_logging(opts.verbose);

    let ctx = display::Context::detect().with_quiet(opts.quiet);

    if ctx.interactive {
        display::print_banner();
    }

    match commands::dispatch(cli.command, ctx) {
        Ok(outcome) if outcome.is_clean() => ExitCode::SUCCESS,
        Ok(outcome) => {
            display::print_partial(&outcome, ctx);
            ExitCode::from(EXIT_PARTIAL)
        }
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("FFORGE_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
