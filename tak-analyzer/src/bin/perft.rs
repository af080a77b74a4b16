//! Count the Tak move tree from the opening position.
//!
//! Usage: perft --size 5 --depth 4
//!
//! Ctrl-C stops the search and prints the counts so far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use tak_analyzer::perft::perft;
use tak_core::GameState;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Count positions reachable from the opening")]
struct Args {
    /// Board size (3-8)
    #[arg(long, default_value_t = 5)]
    size: u8,

    /// Search depth in plies
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// Seconds between progress lines
    #[arg(long, default_value_t = 5)]
    log_interval: u64,

    /// Print the counts as JSON
    #[arg(long)]
    json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tak_analyzer::init_logging(args.verbose);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, stopping...");
        r.store(false, Ordering::SeqCst);
    })
    .context("setting Ctrl-C handler")?;

    let root = GameState::new(args.size)?;

    if !args.json {
        println!("Tak Perft");
        println!("=========");
        println!("Size:  {}x{}", args.size, args.size);
        println!("Depth: {}", args.depth);
        println!();
    }

    let start = Instant::now();
    let counts = perft(&root, args.depth, &running, Duration::from_secs(args.log_interval))?;
    let elapsed = start.elapsed().as_secs_f64();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    if counts.interrupted {
        println!("Interrupted; partial counts:");
    }
    println!("Nodes:   {}", counts.nodes);
    println!("Leaves:  {}", counts.leaves);
    println!("Roads:   {}", counts.roads);
    println!("Stalled: {}", counts.stalled);
    println!(
        "Time:    {:.2}s ({:.0} nodes/s)",
        elapsed,
        counts.nodes as f64 / elapsed.max(f64::EPSILON)
    );
    Ok(())
}
