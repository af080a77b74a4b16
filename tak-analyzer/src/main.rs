//! Analyse one PTN game at a chosen ply.
//!
//! Usage: tak-analyze game.ptn [--ply N] [--json] [--block] [-v]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use tak_analyzer::ptn::{format_turn, read_game, GameRecord};
use tak_analyzer::render::{describe_game, render_board};
use tak_core::{block_tak, check_roads, check_tak, check_tak_par, count_flats, Board, Color, PerColor, TakReport, Turn};

#[derive(Parser, Debug)]
#[command(name = "tak-analyze", about = "Report roads, flats and Tak threats in a PTN game")]
struct Args {
    /// PTN file to read
    path: PathBuf,

    /// Analyse the position after this many plies (default: end of game)
    #[arg(long)]
    ply: Option<usize>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Also list moves that block the opponent's threats
    #[arg(long)]
    block: bool,

    /// Run Tak detection on one thread
    #[arg(long)]
    sequential: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Analysis<'a> {
    game: &'a GameRecord,
    ply: usize,
    next_color: Color,
    board: &'a Board,
    roads: PerColor<bool>,
    flats: PerColor<u32>,
    tak: TakReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocks: Option<Vec<Turn>>,
}

fn notation(turns: &[Turn]) -> String {
    if turns.is_empty() {
        return "-".to_string();
    }
    turns.iter().map(format_turn).collect::<Vec<_>>().join(" ")
}

fn print_text(record: &GameRecord, analysis: &Analysis) {
    println!("{}", describe_game(record));
    println!("==========");
    println!("Ply {} of {}, {} to move", analysis.ply, record.plies(), analysis.next_color);
    println!();
    print!("{}", render_board(analysis.board));
    println!();
    println!("Flats: white {} black {}", analysis.flats.white, analysis.flats.black);
    println!("Roads: white {} black {}", analysis.roads.white, analysis.roads.black);
    println!();
    for mover in Color::ALL {
        for target in Color::ALL {
            let threats = analysis.tak.threats(mover, target);
            println!(
                "{} moves completing a {} road: {}",
                mover,
                target,
                notation(&threats.turns)
            );
        }
    }
    if let Some(blocks) = &analysis.blocks {
        println!();
        println!("{} blocks: {}", analysis.next_color, notation(blocks));
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tak_analyzer::init_logging(args.verbose);

    let record = read_game(&args.path).with_context(|| format!("reading {}", args.path.display()))?;
    let state = record.replay(args.ply).context("replaying game")?;
    info!("replayed {} of {} plies", state.ply(), record.plies());

    let tak = if args.sequential {
        check_tak(&state)?
    } else {
        check_tak_par(&state)?
    };
    let blocks = if args.block {
        Some(block_tak(&state, state.next_color())?)
    } else {
        None
    };

    let analysis = Analysis {
        game: &record,
        ply: state.ply(),
        next_color: state.next_color(),
        board: state.board(),
        roads: check_roads(state.board()),
        flats: count_flats(state.board()),
        tak,
        blocks,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_text(&record, &analysis);
    }
    Ok(())
}
