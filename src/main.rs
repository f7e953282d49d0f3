//! Headless lodviz demo.
//!
//! Builds a tiered scene from an optional TOML options file, runs a short
//! frame loop into a [`RecordingRenderer`], and replays a scripted pointer
//! session: a click at the viewport center, a drag that orbits the camera,
//! and a click into empty space.

use std::path::{Path, PathBuf};

use lodviz::input::{InputEvent, InputProcessor, MouseButton};
use lodviz::options::Options;
use lodviz::renderer::RecordingRenderer;
use lodviz::util::frame_timing::FrameTiming;
use lodviz::TieredScene;

const DEMO_FRAMES: u64 = 120;

fn load_options(path: Option<&Path>) -> Options {
    let Some(path) = path else {
        return Options::default();
    };
    match Options::load(path) {
        Ok(options) => options,
        Err(e) => {
            log::warn!(
                "failed to load {}: {e}; using defaults",
                path.display()
            );
            Options::default()
        }
    }
}

/// Pointer events the demo replays, keyed by the frame they arrive on.
fn scripted_events(width: f32, height: f32) -> Vec<(u64, InputEvent)> {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let press = |pressed| InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed,
    };
    let mut events = vec![
        (10, InputEvent::CursorMoved { x: cx, y: cy }),
        (10, press(true)),
        (11, press(false)),
        (40, press(true)),
    ];
    for step in 1..=10 {
        let x = cx + step as f32 * 12.0;
        events.push((40 + step, InputEvent::CursorMoved { x, y: cy }));
    }
    events.extend([
        (51, press(false)),
        (90, InputEvent::CursorMoved { x: 2.0, y: 2.0 }),
        (90, press(true)),
        (91, press(false)),
    ]);
    events
}

fn run(options: Options) -> lodviz::Result<()> {
    let mut scene = TieredScene::new(options)?;
    let counts = scene.counts();
    log::info!(
        "scene ready: {} near, {} mid, {} far",
        counts.near,
        counts.mid,
        counts.far
    );

    let viewport = scene.viewport();
    let mut input = InputProcessor::new(viewport);
    let mut renderer = RecordingRenderer::new();
    let mut timing = FrameTiming::new(scene.options().display.target_fps);
    let events =
        scripted_events(viewport.width as f32, viewport.height as f32);

    let mut dt = 0.0;
    while scene.frame_count() < DEMO_FRAMES {
        if !timing.should_render() {
            std::thread::sleep(std::time::Duration::from_millis(1));
            continue;
        }
        let frame = scene.frame_count();
        for (_, event) in events.iter().filter(|(at, _)| *at == frame) {
            let Some(command) = input.handle_event(*event) else {
                continue;
            };
            if let Some(outcome) = scene.execute(command)? {
                log::info!("frame {frame}: {outcome:?}");
            }
        }
        scene.frame(dt, &mut renderer)?;
        dt = timing.end_frame();
    }

    log::info!(
        "{} frames, {} draw calls, {} color uploads ({} colors), {:.0} fps",
        renderer.frames(),
        renderer.draw_calls(),
        renderer.uploads(),
        renderer.uploaded_elements(),
        timing.fps()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let options = load_options(path.as_deref());
    if let Err(e) = run(options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
