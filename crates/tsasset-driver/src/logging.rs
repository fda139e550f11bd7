//! Tracing subscriber setup for the CLI
//!
//! Filter comes from `TSASSET_LOG`, then `RUST_LOG`, then the verbosity flag.
//! Output goes to stderr so compiled JavaScript on stdout stays clean.

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;

fn build_filter(verbose: bool) -> EnvFilter {
    if let Ok(val) = env::var("TSASSET_LOG") {
        return EnvFilter::builder().parse_lossy(val);
    }
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::new(if verbose { "debug" } else { "info" })
}

pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(io::stderr)
        .with_target(verbose)
        .without_time()
        .try_init();
}
