mod shared;
mod tui;
mod haptic_api;
mod haptics;
mod audio;
mod config;
mod middle;
mod pipeline;

use std::fs::File;
use std::time::Duration;
use anyhow::Context;
use crossterm::terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use audio::CpalHapticEngine;
use config::Config;
use haptic_api::PlatformSemanticFeedback;
use haptics::HapticDevice;
use middle::{Controller, Notification};
use pipeline::Catalog;
use shared::InputEvent;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config_path = Config::resolve_path(std::env::args().nth(1));
    let config = Config::load(&config_path)?;
    init_logging(&config)?;
    log::info!("config from {}", config_path.display());

    // one-time capability check, picks which catalog the user sees
    let engine = CpalHapticEngine::new(&config);
    let feedback: Option<Box<dyn PlatformSemanticFeedback>> = if config.semantic_feedback {
        Some(Box::new(engine.semantic_feedback()))
    } else {
        None
    };
    let catalog = Catalog::detect(feedback.is_some());
    let device = HapticDevice::new(engine, feedback);
    log::info!("semantic feedback available: {}", device.has_semantic_feedback());
    let mut controller = Controller::new(device, catalog);
    log::info!("haptic device {}", controller.device_state());
    log::info!("starting with {:?}", controller.params());
    let notifications = controller.subscribe();

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let tick_rate = Duration::from_millis(config.tick_ms);
    let mut tui_state = tui::mode::TuiState::new(&config);

    loop {
        let ds = controller.display_state();
        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &ds, &tui_state);
        })?;

        let events = tui::input::poll_input(tick_rate, &mut tui_state)?;
        for event in events {
            if event == InputEvent::Quit {
                log::info!("quit");
                return Ok(());
            }
            controller.handle_input(event);
        }

        controller.tick();

        for n in notifications.try_iter() {
            match n {
                Notification::ParamsChanged(p) => log::debug!("params now {p:?}"),
                Notification::PresetSelected(i) => log::debug!("preset {i} selected"),
                Notification::DeviceState(s) => log::debug!("device {s}"),
                Notification::Diagnostic(msg) => log::debug!("status: {msg}"),
            }
        }
    }
}

// The terminal is in raw mode, so log lines go to a file instead of stderr.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {}", config.log_file.display()))?;
    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
