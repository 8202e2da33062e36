use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::backend::AudioBackend;
use crate::config;
use crate::error::Result;
use crate::ui;

/// Main terminal event loop: draw, wait up to one poll interval for input,
/// then tick the app. Returns once the app asks to quit.
pub fn run<B: AudioBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App<B>,
) -> Result<()> {
    let poll_interval = Duration::from_millis(settings.playback.poll_interval_ms);
    let mut shown_caption = String::new();

    loop {
        let caption = &app.player.labels().caption;
        if *caption != shown_caption {
            shown_caption.clone_from(caption);
            execute!(terminal.backend_mut(), SetTitle(&shown_caption))?;
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(poll_interval)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }
        if app.should_quit {
            return Ok(());
        }

        app.tick();
    }
}
