/// Entry point and frame loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{error, info, trace, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{LogConfig, WizardConfig};
use error::AppError;
use sim::wizard::Wizard;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::{sfx_for, SoundEngine};

fn main() {
    let (config, mut problems) = WizardConfig::load();
    if let Err(e) = init_tracing(&config.log) {
        problems.push(e);
    }
    for problem in &problems {
        warn!("{problem}");
    }

    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = if config.audio.enabled { SoundEngine::new() } else { None };
    if config.audio.enabled && sound.is_none() {
        warn!("no audio output available, running silent");
    }

    let mut wizard = Wizard::new(config.timing.clone());
    let result = run(&mut wizard, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    for problem in &problems {
        eprintln!("warning: {problem}");
    }

    if let Err(e) = result {
        error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    info!("wizard closed");
    println!();
    println!("2026.exe installed. see you on the other side :-)");
}

/// Log to the configured file only; the terminal belongs to the TUI.
/// No file configured means no subscriber at all.
fn init_tracing(log: &LogConfig) -> Result<(), AppError> {
    let Some(path) = &log.file else {
        return Ok(());
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .map_err(|e| AppError::Logging(format!("invalid log level {:?}: {e}", log.level)))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::Logging(format!("{}: {e}", path.display())))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    info!(path = %path.display(), "logging initialized");
    Ok(())
}

fn run(
    wizard: &mut Wizard,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &WizardConfig,
) -> Result<(), AppError> {
    let mut input = InputState::new();
    let frame = Duration::from_millis(config.timing.frame_ms);
    let mut last_tick = Instant::now();

    loop {
        let inputs = input.drain_events(|col, row| renderer.to_desktop(col, row)).to_vec();
        for user_input in inputs {
            wizard.handle(user_input);
        }
        if wizard.should_quit() {
            info!(screen = wizard.current().tag(), "quit requested");
            break;
        }

        // Whole milliseconds only; the remainder carries into the next frame.
        let elapsed = last_tick.elapsed().as_millis() as u64;
        if elapsed > 0 {
            wizard.tick(elapsed);
            last_tick += Duration::from_millis(elapsed);
        }

        for event in wizard.drain_events() {
            trace!(?event, "wizard event");
            if let (Some(sfx), Some(effect)) = (sound, sfx_for(&event)) {
                sfx.play(effect);
            }
        }

        let (w, h) = renderer.size();
        wizard.set_viewport(w, h);
        renderer.render(wizard)?;

        std::thread::sleep(frame);
    }

    Ok(())
}
