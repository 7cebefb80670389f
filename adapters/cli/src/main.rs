#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a maze escape simulation to completion.

mod layout;
mod sim;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use maze_escape_core::{AgentId, Coordinate};

use crate::{
    layout::MazeLayout,
    sim::{Simulation, TickEvent},
};

/// Simulates agents escaping a 3-D maze described by a text file.
#[derive(Debug, Parser)]
#[command(name = "maze-escape")]
struct Args {
    /// Path to the maze description file.
    maze: PathBuf,

    /// Upper bound on simulation ticks before giving up.
    #[arg(long, default_value_t = 1000)]
    max_ticks: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let text = fs::read_to_string(&args.maze)
        .with_context(|| format!("failed to read maze description {}", args.maze.display()))?;
    let layout = MazeLayout::parse(&text)
        .with_context(|| format!("failed to parse maze description {}", args.maze.display()))?;

    for warning in layout.warnings() {
        eprintln!("{warning}");
    }

    let dimension = layout.dimension();
    println!(
        "maze {}x{}x{} with {} agent(s), exit at {}",
        dimension.width(),
        dimension.height(),
        dimension.depth(),
        layout.starts().len(),
        format_coordinate(layout.exit()),
    );

    let labels: Vec<String> = layout
        .starts()
        .iter()
        .map(|start| start.label().to_owned())
        .collect();
    let mut simulation = Simulation::new(&layout);

    let mut ticks_used = 0;
    for tick in 1..=args.max_ticks {
        if simulation.is_settled() {
            break;
        }
        ticks_used = tick;

        let mut events = Vec::new();
        simulation.tick(&mut events);
        for event in events {
            report_event(tick, &labels, &event);
        }
    }

    if simulation.is_settled() {
        println!("simulation settled after {ticks_used} tick(s)");
        Ok(())
    } else {
        anyhow::bail!("agents still active after {} ticks", args.max_ticks)
    }
}

fn report_event(tick: u64, labels: &[String], event: &TickEvent) {
    match event {
        TickEvent::Advanced { id, to } => println!(
            "tick {tick}: {} moved to {}",
            label_for(labels, *id),
            format_coordinate(*to)
        ),
        TickEvent::Blocked { id } => {
            println!("tick {tick}: {} is blocked, waiting", label_for(labels, *id));
        }
        TickEvent::Escaped { id, moves } => println!(
            "tick {tick}: {} escaped via {moves}",
            label_for(labels, *id)
        ),
        TickEvent::Stranded { id } => println!(
            "tick {tick}: {} cannot reach the exit, retiring",
            label_for(labels, *id)
        ),
    }
}

fn label_for(labels: &[String], id: AgentId) -> &str {
    labels
        .get(id.get() as usize)
        .map_or("<unknown>", String::as_str)
}

fn format_coordinate(coordinate: Coordinate) -> String {
    format!(
        "({}, {}, {})",
        coordinate.x(),
        coordinate.y(),
        coordinate.z()
    )
}
