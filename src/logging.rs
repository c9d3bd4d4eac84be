//! Logging setup for filehub.
//!
//! Uses the `log` facade with an `env_logger` backend. Log lines go to stderr
//! so they never mix with listings written to stdout.
//!
//! The level is chosen by, in priority order:
//!
//! 1. `RUST_LOG` (if set), parsed with env_logger's filter syntax
//! 2. `--quiet`: errors only
//! 3. `--verbose` count: `-v` info, `-vv` debug, `-vvv` trace
//! 4. Default: warnings
//!
//! Flag-derived levels apply to this crate only; dependencies such as the
//! HTTP client stay at `warn` unless `RUST_LOG` says otherwise.
//!
//! # Example
//!
//! ```rust,no_run
//! use filehub::logging::init_logging;
//!
//! init_logging(2, false);
//! log::debug!("filter state changed");
//! ```

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Initialize logging from the CLI verbosity flags.
///
/// Call once, before anything logs. Later calls are ignored with a debug
/// message, which keeps tests that build several apps in one process safe.
pub fn init_logging(verbose: u8, quiet: bool) {
    let from_env = env::var("RUST_LOG").ok();
    let level = determine_level(verbose, quiet);

    let mut builder = Builder::new();
    match &from_env {
        Some(filters) => {
            builder.parse_filters(filters);
        }
        None => {
            builder
                .filter_level(LevelFilter::Warn.min(level))
                .filter_module(CRATE_TARGET, level);
        }
    }
    configure_format(&mut builder, verbose);

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
        return;
    }

    match from_env {
        Some(filters) => log::debug!("Logging initialized from RUST_LOG={filters}"),
        None => log::debug!("Logging initialized at level {level}"),
    }
}

/// Map CLI flags to a level for this crate's targets.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Debug builds add a timestamp, and the module path from `-vv` up.
/// Release builds print level and message only.
fn configure_format(builder: &mut Builder, verbose: u8) {
    #[cfg(debug_assertions)]
    {
        builder.format(move |buf, record| {
            let timestamp = buf.timestamp_seconds();
            let level = record.level();
            let style = buf.default_level_style(level);
            if verbose >= 2 {
                writeln!(
                    buf,
                    "{timestamp} {style}{level:<5}{style:#} [{}] {}",
                    record.module_path().unwrap_or("unknown"),
                    record.args()
                )
            } else {
                writeln!(buf, "{timestamp} {style}{level:<5}{style:#} {}", record.args())
            }
        });
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = verbose;
        builder.format(|buf, record| {
            let level = record.level();
            let style = buf.default_level_style(level);
            writeln!(buf, "{style}{level:<5}{style:#} {}", record.args())
        });
    }
}
