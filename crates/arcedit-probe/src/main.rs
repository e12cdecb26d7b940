//! ArcEdit probe entry point.

use std::path::PathBuf;

use arcedit_core::CursorConfig;
use arcedit_probe::{LogRenderer, ProbeResult, Scenario, replay, report_line};
use clap::Parser;

/// Replay a cursor scenario and print one JSON report per frame.
#[derive(Debug, Parser)]
#[command(name = "arcedit-probe", version, about)]
struct Args {
    /// Scenario JSON file.
    scenario: PathBuf,
    /// Cursor configuration JSON file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Keep the track crosshair visible when no tool is picking.
    #[arg(long)]
    visible_when_idle: bool,
    /// Pretty-print reports.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::init();
    log::info!("Starting ArcEdit probe");

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> ProbeResult<()> {
    let mut config = match &args.config {
        Some(path) => CursorConfig::load(path)?,
        None => CursorConfig::default(),
    };
    if args.visible_when_idle {
        config.visible_when_idle = true;
    }

    let scenario = Scenario::load(&args.scenario)?;
    let mut renderer = LogRenderer::default();
    let reports = replay(&scenario, config, &mut renderer);
    for report in &reports {
        println!("{}", report_line(report, args.pretty)?);
    }
    log::info!(
        "Replayed {} frames, {} render commands",
        reports.len(),
        renderer.applied
    );
    Ok(())
}
