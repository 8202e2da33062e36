use std::env;
use std::path::PathBuf;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::backend::RodioBackend;
use crate::error::Result;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<()> {
    let (settings, warning) = settings::load_settings();
    let log_file = logging::init(&settings.logging);
    if let Some(msg) = &warning {
        eprintln!("tonearm: {msg}");
        log::warn!("{msg}");
    }
    log::info!("starting, logging to {:?}", log_file);

    let cli_paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let backend = RodioBackend::open_default()?;
    let player = startup::prepare_player(backend, &settings, &cli_paths);
    let mut app = App::new(player, &settings.playback, &settings.library);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    startup::save_session(&app.player, &settings.session);
    run_result
}
