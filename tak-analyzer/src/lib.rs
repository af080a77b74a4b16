//! Tak game analysis tools
//!
//! Reads PTN game records, replays them with `tak-core`, and reports
//! roads, flat counts and Tak threats for any position.
//!
//! Binaries:
//! - `tak-analyze` - analyse one game at a chosen ply
//! - `perft` - count the move tree from the opening position
//! - `export_sqlite` - per-ply threat summaries for many games

use std::io;
use std::path::Path;

pub mod perft;
pub mod ptn;
pub mod render;

/// Install the env_logger backend. `RUST_LOG` wins over `verbose`;
/// otherwise 0 = info, 1 = debug, 2+ = trace.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Make room for a fresh output file: create its parent directory and
/// remove any previous file at `path`.
pub fn prepare_output(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
