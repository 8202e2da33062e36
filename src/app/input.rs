//! Key and mouse bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::backend::AudioBackend;
use crate::player::PlayerState;

use super::model::{App, PromptKind};

impl<B: AudioBackend> App<B> {
    /// Apply one key press. Key releases and repeats are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.status = None;

        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        let adjusting = matches!(key.code, KeyCode::Char('h' | 'l' | '+' | '=' | '-'));
        if !adjusting {
            self.settle_adjustments();
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }

            KeyCode::Char('z') | KeyCode::Left => {
                self.player.prev();
                self.follow_current();
            }
            KeyCode::Char('x') => self.play(),
            KeyCode::Char('c') => self.player.pause(),
            KeyCode::Char('v') | KeyCode::Esc => {
                if self.player.state() != PlayerState::Stopped {
                    self.player.stop();
                }
            }
            KeyCode::Char('b') | KeyCode::Right => {
                self.player.next();
                self.follow_current();
            }
            KeyCode::Char(' ') => match self.player.state() {
                PlayerState::Playing | PlayerState::Paused => self.player.pause(),
                PlayerState::Stopped => self.play(),
            },

            KeyCode::Char('o') => self.enter_prompt(PromptKind::Open),
            KeyCode::Char('a') => self.enter_prompt(PromptKind::Add),
            KeyCode::Char('p') => self.toggle_playlist(),
            KeyCode::Char('r') => self.player.toggle_repeat(),
            KeyCode::Char('s') => self.player.toggle_shuffle(),

            KeyCode::Char('j') | KeyCode::Down => self.select_down(),
            KeyCode::Char('k') | KeyCode::Up => self.select_up(),
            KeyCode::Char('g') | KeyCode::Home => self.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.select_last(),
            KeyCode::Char('J') => self.move_selected_down(),
            KeyCode::Char('K') => self.move_selected_up(),
            KeyCode::Enter => self.play_selected(),
            KeyCode::Delete => self.delete_selected(),

            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.adjust_volume(i16::from(self.volume_step()));
            }
            KeyCode::Char('-') => {
                self.adjust_volume(-i16::from(self.volume_step()));
            }
            KeyCode::Char('l') => {
                let step = self.seek_step_secs().min(i64::MAX as u64) as i64;
                self.adjust_seek(step);
            }
            KeyCode::Char('h') => {
                let step = self.seek_step_secs().min(i64::MAX as u64) as i64;
                self.adjust_seek(-step);
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.cancel_prompt(),
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Backspace => self.pop_prompt_char(),
            KeyCode::Char(c) if !c.is_control() => self.push_prompt_char(c),
            _ => {}
        }
    }

    /// The wheel nudges the volume by one step.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let step = i16::from(self.volume_step());
        match mouse.kind {
            MouseEventKind::ScrollUp => self.player.nudge_volume(step),
            MouseEventKind::ScrollDown => self.player.nudge_volume(-step),
            _ => {}
        }
    }
}
