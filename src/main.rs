//! naksha - live dead-reckoning point-cloud mapper
//!
//! Polls a JSON scan mailbox (or replays a recorded scan file), accumulates
//! the map and keeps an SVG rendering of it up to date.
//!
//! # Usage
//!
//! ```bash
//! # Live mailbox with default config
//! cargo run --release
//!
//! # Custom config file
//! cargo run --release -- --config configs/naksha.toml
//!
//! # Replay a recording
//! cargo run --release -- --replay scans.txt --output replay.svg
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;

use clap::Parser;

use naksha::config::NakshaConfig;
use naksha::engine::{IngestionLoop, MappingSession};
use naksha::render::{RenderThread, SvgRenderSink, frame_slot};
use naksha::sensors::CoordinateTransformer;
use naksha::utils::setup_ctrl_c_handler;

#[derive(Parser, Debug)]
#[command(name = "naksha")]
#[command(about = "Dead-reckoning 2D point-cloud mapper for range-finder scans")]
struct Args {
    /// Configuration file (default: naksha.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON scan mailbox to poll
    #[arg(long)]
    feed: Option<PathBuf>,

    /// Replay a recorded scan file instead of polling the mailbox
    #[arg(long)]
    replay: Option<PathBuf>,

    /// SVG output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();

    // Config errors are reported before logging is up, so use stderr
    let (mut config, source) = match NakshaConfig::discover(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("naksha: {}", e);
            process::exit(2);
        }
    };
    apply_overrides(&mut config, &args);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "[{}] {} - {}",
            record.level(),
            record.target(),
            record.args()
        )
    })
    .init();

    log::info!("naksha starting");
    match &source {
        Some(path) => log::info!("  Config: {}", path.display()),
        None => log::info!("  Config: defaults"),
    }
    match &config.replay.path {
        Some(path) => log::info!("  Input: replay {} ({} ms/scan)", path.display(), config.replay.pacing_ms),
        None => log::info!("  Input: mailbox {}", config.feed.path.display()),
    }
    log::info!("  Order: {}", config.scan_order());
    log::info!("  Camera: {}", config.camera());
    log::info!("  Output: {}", config.render.output.display());

    let running = match setup_ctrl_c_handler() {
        Ok(running) => running,
        Err(e) => {
            log::error!("Failed to install Ctrl-C handler: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&config, &running) {
        log::error!("{}", e);
        process::exit(1);
    }

    log::info!("naksha shutdown complete");
}

fn apply_overrides(config: &mut NakshaConfig, args: &Args) {
    if let Some(feed) = &args.feed {
        config.feed.path = feed.clone();
    }
    if let Some(replay) = &args.replay {
        config.replay.path = Some(replay.clone());
    }
    if let Some(output) = &args.output {
        config.render.output = output.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
}

fn run(config: &NakshaConfig, running: &AtomicBool) -> naksha::Result<()> {
    // The only fatal condition: no surface to draw on
    let sink = SvgRenderSink::create(&config.render.output, config.svg_settings())?;

    let feed = config.open_feed()?;
    let (publisher, receiver) = frame_slot();
    let render = RenderThread::spawn(Box::new(sink), receiver)?;

    let mut session = MappingSession::new(
        CoordinateTransformer::new(config.scan_order()),
        config.acceptance_policy(),
    );
    let mut ingestion = IngestionLoop::new(feed, config.heading_provider(), config.ingestion_config());
    ingestion.run(&mut session, &publisher, running);

    drop(publisher);
    if let Some(stats) = render.shutdown() {
        log::info!(
            "Rendered {} frames ({} replaced before drawing, {} failed)",
            stats.frames_rendered,
            stats.frames_evicted,
            stats.render_errors
        );
    }

    let t = session.translation();
    log::info!(
        "Final map: {} points from {} scans, translation ({:.3}, {:.3})",
        session.map_len(),
        session.accepted(),
        t.x,
        t.y
    );
    Ok(())
}
