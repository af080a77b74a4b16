//! Export per-ply Tak summaries of PTN games to SQLite.
//!
//! Usage: export_sqlite game1.ptn game2.ptn ... [-o data/threats.db]
//!
//! Tables:
//! - games(id, path, site, white, black, size, result, plies)
//! - plies(game_id, ply, next_color, flats, roads and threats per color)

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rusqlite::{params, Connection};

use tak_analyzer::ptn::{format_turn, read_game};
use tak_core::{check_roads, check_tak_par, count_flats, Color};

#[derive(Parser, Debug)]
#[command(name = "export_sqlite", about = "Write per-ply Tak summaries of PTN games to SQLite")]
struct Args {
    /// PTN files to export
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output database (replaced if it exists)
    #[arg(short, long, default_value = "data/threats.db")]
    output: PathBuf,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE games (
            id INTEGER PRIMARY KEY,
            path TEXT NOT NULL,
            site TEXT,
            white TEXT,
            black TEXT,
            size INTEGER NOT NULL,
            result TEXT,
            plies INTEGER NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE TABLE plies (
            game_id INTEGER NOT NULL REFERENCES games(id),
            ply INTEGER NOT NULL,
            next_color TEXT NOT NULL,
            white_flats INTEGER NOT NULL,
            black_flats INTEGER NOT NULL,
            white_road INTEGER NOT NULL,
            black_road INTEGER NOT NULL,
            white_threats TEXT NOT NULL,
            black_threats TEXT NOT NULL,
            PRIMARY KEY (game_id, ply)
        )",
        [],
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    tak_analyzer::init_logging(args.verbose);

    println!("PTN to SQLite Exporter");
    println!("======================");
    println!("Inputs: {}", args.inputs.len());
    println!("Output: {:?}", args.output);
    println!();

    tak_analyzer::prepare_output(&args.output)
        .with_context(|| format!("preparing {}", args.output.display()))?;

    let conn = Connection::open(&args.output).context("creating database")?;
    create_tables(&conn).context("creating tables")?;

    let start = Instant::now();
    let mut exported = 0usize;
    let mut rows = 0usize;

    // One transaction for all inserts
    let tx = conn.unchecked_transaction()?;
    {
        let mut insert_game = tx.prepare(
            "INSERT INTO games (path, site, white, black, size, result, plies)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        let mut insert_ply = tx.prepare(
            "INSERT INTO plies (game_id, ply, next_color, white_flats, black_flats,
                                white_road, black_road, white_threats, black_threats)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;

        for path in &args.inputs {
            // A bad file is skipped, not fatal
            let record = match read_game(path) {
                Ok(record) => record,
                Err(e) => {
                    warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            let positions = match record.positions() {
                Ok(positions) => positions,
                Err(e) => {
                    warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            insert_game.execute(params![
                path.display().to_string(),
                record.site,
                record.white,
                record.black,
                record.size,
                record.result.map(|r| r.to_string()),
                record.plies() as i64,
            ])?;
            let game_id = tx.last_insert_rowid();

            for state in &positions {
                let roads = check_roads(state.board());
                let flats = count_flats(state.board());
                let report = check_tak_par(state)?;
                let own_threats = |color: Color| {
                    report
                        .threats(color, color)
                        .turns
                        .iter()
                        .map(format_turn)
                        .collect::<Vec<_>>()
                        .join(" ")
                };

                insert_ply.execute(params![
                    game_id,
                    state.ply() as i64,
                    state.next_color().name(),
                    flats.white,
                    flats.black,
                    roads.white,
                    roads.black,
                    own_threats(Color::White),
                    own_threats(Color::Black),
                ])?;
                rows += 1;
            }

            exported += 1;
            info!("{}: {} plies", path.display(), record.plies());
        }
    }
    tx.commit()?;

    let elapsed = start.elapsed().as_secs_f64();
    println!(
        "Exported {} of {} games ({} positions) in {:.2}s",
        exported,
        args.inputs.len(),
        rows,
        elapsed
    );

    let stored: i64 = conn.query_row("SELECT COUNT(*) FROM plies", [], |row| row.get(0))?;
    if stored as usize != rows {
        anyhow::bail!("expected {} rows in plies, found {}", rows, stored);
    }

    println!("\nDone! Database created at {:?}", args.output);
    Ok(())
}
