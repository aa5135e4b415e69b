//! End-to-end replay: recorded file in, SVG out.

use std::fs;
use std::sync::atomic::AtomicBool;

use approx::assert_relative_eq;
use naksha::{
    CameraConvention, CoordinateTransformer, IngestionLoop, LogRenderSink, MappingSession,
    NakshaConfig, RenderThread, ScanOrder, SvgRenderSink, frame_slot,
};
use tempfile::TempDir;

const RECORDING: &str = "\
{90,0} [1,1,1,1]

{0,2} [0,0,3]
this line is corrupt
{90,0} [1]
";

fn replay_config(dir: &TempDir) -> NakshaConfig {
    let replay = dir.path().join("scans.txt");
    fs::write(&replay, RECORDING).unwrap();

    let mut config = NakshaConfig::default();
    config.replay.path = Some(replay);
    config.replay.pacing_ms = 0;
    config.render.output = dir.path().join("map.svg");
    config
}

fn session_for(config: &NakshaConfig) -> MappingSession {
    MappingSession::new(
        CoordinateTransformer::new(config.scan_order()),
        config.acceptance_policy(),
    )
}

#[test]
fn test_replay_to_svg() {
    let dir = TempDir::new().unwrap();
    let config = replay_config(&dir);
    assert_eq!(config.scan_order(), ScanOrder::Ascending);
    assert_eq!(config.camera(), CameraConvention::Overhead);

    let sink = SvgRenderSink::create(&config.render.output, config.svg_settings()).unwrap();
    let (publisher, receiver) = frame_slot();
    let render = RenderThread::spawn(Box::new(sink), receiver).unwrap();

    let mut session = session_for(&config);
    let mut ingestion = IngestionLoop::new(
        config.open_feed().unwrap(),
        config.heading_provider(),
        config.ingestion_config(),
    );
    let running = AtomicBool::new(true);
    let stats = ingestion.run(&mut session, &publisher, &running);

    // Every well-formed line is accepted, zero motion included
    assert_eq!(stats.accepted, 3);
    assert_eq!(stats.decode_failures, 1);
    assert_eq!(session.map_len(), 4 + 1 + 1);

    // Second line moved 2 units along recorded heading 0
    let t = session.translation();
    assert_relative_eq!(t.x, 2.0, epsilon = 1e-5);
    assert_relative_eq!(t.y, 0.0, epsilon = 1e-5);

    drop(publisher);
    let render_stats = render.shutdown().unwrap();
    assert!(render_stats.frames_rendered >= 1);
    assert_eq!(render_stats.render_errors, 0);

    let svg = fs::read_to_string(&config.render.output).unwrap();
    assert!(svg.contains("data-up=\"0 1 0\""));
    assert!(svg.contains("data-front=\"0 0 -1\""));
    // Six points plus the translation marker
    assert_eq!(svg.matches("<circle").count(), 7);
}

#[test]
fn test_replay_with_log_sink() {
    let dir = TempDir::new().unwrap();
    let config = replay_config(&dir);

    let (publisher, receiver) = frame_slot();
    let render = RenderThread::spawn(Box::new(LogRenderSink::new()), receiver).unwrap();

    let mut session = session_for(&config);
    let mut ingestion = IngestionLoop::new(
        config.open_feed().unwrap(),
        config.heading_provider(),
        config.ingestion_config(),
    );
    let running = AtomicBool::new(true);
    ingestion.run(&mut session, &publisher, &running);
    drop(publisher);

    let stats = render.shutdown().unwrap();
    assert!(stats.frames_rendered >= 1);
    assert_eq!(
        stats.frames_rendered + stats.frames_evicted,
        ingestion.stats().accepted
    );
}
