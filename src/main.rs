//! Othello desktop front-end
//!
//! Play against another person or against the tree-search AI.

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use othello::ui::OthelloApp;
use othello::Settings;

#[derive(Parser, Debug)]
#[command(name = "othello", about = "Othello with minimax, negamax and alpha-beta AI")]
struct Args {
    /// TOML settings file (mode, algorithm, difficulty, heuristics)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log tree construction and moves
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .init();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    info!(
        "starting {} / {} / {}",
        settings.mode.label(),
        settings.algorithm,
        settings.difficulty
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([760.0, 560.0])
            .with_title("Othello"),
        ..Default::default()
    };

    eframe::run_native(
        "Othello",
        options,
        Box::new(move |cc| Ok(Box::new(OthelloApp::new(cc, settings)))),
    )?;
    Ok(())
}
