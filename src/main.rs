//! counselflow-ui - terminal preview of an enhanced CounselFlow page
//!
//! Builds the demo matters page, enhances it with the controller and
//! drives it from the keyboard. Logs go to a file in the config dir;
//! set `RUST_LOG` to change the level.

mod app;
mod component;
mod components;
mod focus;
mod tui;

use crate::app::App;
use crate::component::Component;
use crate::tui::Tui;
use anyhow::Result;
use counselflow_ui::page::matters_page;
use counselflow_ui::services::{JsonFileStore, KeyValueStore, MemoryStore};
use counselflow_ui::{Action, Config, UiController};
use crossterm::event::Event;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const TICK_RATE: Duration = Duration::from_millis(50);
const LOG_FILE: &str = "counselflow-ui.log";

fn main() -> Result<()> {
    init_logging();

    let config = match Config::config_path() {
        Some(path) => Config::load_or_create(&path).unwrap_or_else(|e| {
            warn!("Could not write the default config: {}", e);
            Config::default()
        }),
        None => Config::default(),
    };
    let roles = config.role_map();
    if let Err(e) = roles.validate() {
        warn!("Configured roles contain an invalid selector: {}", e);
    }

    let controller = UiController::new(matters_page(), open_store(&config))
        .with_roles(roles)
        .with_settings(config.settings());
    let mut app = App::new(controller);
    app.init()?;

    let mut tui = Tui::new()?.with_tick_rate(TICK_RATE);
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file so the alternate screen stays clean
fn init_logging() {
    let Some(dir) = Config::config_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

/// File-backed state when the config dir is usable, memory otherwise
fn open_store(config: &Config) -> Box<dyn KeyValueStore> {
    let Some(path) = config.state_path() else {
        return Box::new(MemoryStore::new());
    };
    match JsonFileStore::open(&path) {
        Ok(store) => {
            info!("UI state stored in {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            warn!("Falling back to in-memory state: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                warn!("Draw error: {}", e);
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // An action may produce a follow-up
        let mut current = action;
        while let Some(action) = current {
            current = app.update(action)?;
        }
    }

    Ok(())
}
