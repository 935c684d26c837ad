//! Logging setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "tavola_cli=info,tavola_client=info";

/// Initialise tracing. `RUST_LOG` overrides the default filter; logs go to
/// stderr so command output on stdout stays clean.
pub fn init_logger(json_format: bool, verbose: bool) -> anyhow::Result<()> {
    let default = if verbose {
        "tavola_cli=debug,tavola_client=debug"
    } else {
        DEFAULT_FILTER
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let registry = tracing_subscriber::registry().with(env_filter);

    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }
    Ok(())
}
