use std::path::PathBuf;

use crate::backend::AudioBackend;
use crate::config;
use crate::player::Player;
use crate::playlist::{Playlist, files};
use crate::session::Session;

/// Build the player: configured defaults, then the saved session, then any
/// command-line paths, which replace the restored playlist but keep its
/// modes and volume. Nothing starts playing.
pub fn prepare_player<B: AudioBackend>(
    backend: B,
    settings: &config::Settings,
    cli_paths: &[PathBuf],
) -> Player<B> {
    let mut player = Player::new(
        backend,
        Playlist::new(),
        settings.playback.default_volume,
        settings.playback.title_flash_ticks,
    );

    if settings.session.restore_on_start {
        restore_session(&mut player, &settings.session);
    }

    if !cli_paths.is_empty() {
        let paths = files::expand_paths(cli_paths, &settings.library);
        if paths.is_empty() {
            log::warn!("no audio files found in {:?}", cli_paths);
        } else {
            let (shuffle, repeat, volume) = (player.shuffle(), player.repeat(), player.volume());
            player.restore(paths, 0, shuffle, repeat, volume);
        }
    }
    player
}

fn restore_session<B: AudioBackend>(player: &mut Player<B>, settings: &config::SessionSettings) {
    let Some(path) = settings.resolved_path() else {
        return;
    };
    match Session::load(&path) {
        Ok(Some(session)) => session.apply_to(player),
        Ok(None) => log::info!("no saved session at {:?}", path),
        Err(e) => log::warn!("ignoring unreadable session {:?}: {e}", path),
    }
}

/// Write the session back if configured. Failures are logged only.
pub fn save_session<B: AudioBackend>(player: &Player<B>, settings: &config::SessionSettings) {
    if !settings.save_on_quit {
        return;
    }
    let Some(path) = settings.resolved_path() else {
        return;
    };
    if let Err(e) = Session::capture(player).save(&path) {
        log::warn!("failed to save session to {:?}: {e}", path);
    }
}
