// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod config;
mod drag;
mod engine;
mod extract;
mod grid;
mod logging;
mod paths;
mod run;
mod select_area;
mod surface;

use clap::Parser;

use cli::{Args, Cmd};

fn main() {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| paths::default_log_path("quadsnip.log"));

    // Init logging FIRST. This decides whether console is on.
    if let Err(e) = logging::init_logging(&log_path, args.verbose) {
        eprintln!("quadsnip: failed to init logging: {e}");
        std::process::exit(1);
    }

    // From here on: eventline only.
    eventline::info!("quadsnip starting");
    eventline::debug!("verbose={}", args.verbose);
    eventline::debug!("log_path={}", log_path.display());

    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eventline::error!("{e}");
            eprintln!("quadsnip: {e}");
            std::process::exit(1);
        }
    };

    let out_dir = paths::effective_output_dir(args.out_dir.clone(), &cfg.output_directory);
    eventline::info!("output dir={}", out_dir.display());

    let result = match args.cmd {
        Cmd::Extract {
            image,
            points,
            rect,
            width,
            height,
        } => run::run_extract(&image, points, rect, width, height, &out_dir),

        Cmd::Replay {
            image,
            script,
            mode,
            overlay,
        } => run::run_replay(&image, &script, mode, overlay, &cfg, out_dir),
    };

    if let Err(e) = result {
        eventline::error!("fatal error: {e}");
        eprintln!("quadsnip: {e}");
        std::process::exit(1);
    }
}
