//! Logging infrastructure for the pymdoc CLI.
//!
//! Logs go to stderr so stdout only ever carries documentation.
//!
//! # Example
//!
//! ```rust,no_run
//! use pymdoc_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(1, false, false);
//! info!("Extracting documentation");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directives for a verbosity level.
///
/// `None` means no flag was given and `RUST_LOG` may decide.
pub fn filter_directives(verbose: u8, quiet: bool) -> Option<&'static str> {
    if quiet {
        return Some("pymdoc=error,pymdoc_cli=error");
    }
    match verbose {
        0 => None,
        1 => Some("pymdoc=info,pymdoc_cli=info"),
        2 => Some("pymdoc=debug,pymdoc_cli=debug"),
        _ => Some("pymdoc=trace,pymdoc_cli=trace"),
    }
}

/// Initialize the tracing subscriber.
///
/// Should be called once at the start of the program, before any logging
/// occurs. The level is chosen in this order:
/// 1. `--quiet`: errors only
/// 2. `-v` count: info, debug, trace
/// 3. `RUST_LOG`
/// 4. Default: warnings
pub fn init_logger(verbose: u8, quiet: bool, no_color: bool) {
    let filter = match filter_directives(verbose, quiet) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pymdoc=warn,pymdoc_cli=warn")),
    };

    init_logger_with_filter(filter, no_color);
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
