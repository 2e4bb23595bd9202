//! attendance-tui - A terminal attendance sheet manager
//!
//! This is the main entry point for the attendance-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::time::Duration;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    let (config, config_error) = Config::load_or_init();

    // Logging is best effort; the app still runs without a log file
    match logging::init(&config) {
        Ok(path) => info!(log = %path.display(), "attendance-tui starting"),
        Err(e) => eprintln!("Logging disabled: {:#}", e),
    }
    if let Some(e) = config_error {
        warn!(error = %e, "could not write default config");
    }

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(config.tick_rate_ms.max(10)));
    tui.enter()?;

    // Create app state
    let mut app = App::new(config);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        error!(error = ?err, "attendance-tui exited with an error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("attendance-tui stopped");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "draw failed");
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
