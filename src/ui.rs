//! UI rendering for the terminal front end.
//!
//! Everything drawn here is read from the published view state: the
//! player's `InfoLabels` and `PositionBar`, the playlist and the `App`
//! selection/prompt fields.

use std::{collections::BTreeMap, sync::LazyLock};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::backend::AudioBackend;
use crate::metadata::{format_duration, playlist_summary};
use crate::playlist::Track;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("z/x/c/v/b", "prev/play/pause/stop/next");
    map.insert("space", "play/pause");
    map.insert("j/k", "up/down");
    map.insert("J/K", "move track");
    map.insert("enter", "play selected");
    map.insert("h/l", "seek");
    map.insert("+/-", "volume");
    map.insert("o/a", "open/add");
    map.insert("del", "remove");
    map.insert("r/s", "repeat/shuffle");
    map.insert("p", "playlist");
    map.insert("q", "quit");
    map
});

/// Render the controls help text in a stable, human-friendly order.
fn controls_text(seek_step_secs: u64) -> String {
    let order = [
        "z/x/c/v/b", "space", "j/k", "J/K", "enter", "h/l", "+/-", "o/a", "del", "r/s", "p", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "h/l" {
                Some(format!("[h/l] seek -/+{seek_step_secs}s"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// One playlist row: number, display name and length.
fn playlist_row(index: usize, track: &Track) -> ListItem<'static> {
    let text = if track.duration_text.is_empty() {
        format!("{:>3}. {}", index + 1, track.display_name)
    } else {
        format!("{:>3}. {}  [{}]", index + 1, track.display_name, track.duration_text)
    };

    let mut style = Style::default();
    if !track.is_valid {
        style = style.fg(Color::DarkGray);
    }
    if track.is_current() {
        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }
    ListItem::new(text).style(style)
}

/// Render the entire UI into `frame`.
pub fn draw<B: AudioBackend>(frame: &mut Frame, app: &App<B>) {
    let list_constraint = if app.playlist_visible {
        Constraint::Min(3)
    } else {
        Constraint::Length(0)
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(3),
            list_constraint,
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    draw_now_playing(frame, app, chunks[0]);
    draw_position(frame, app, chunks[1]);
    if app.playlist_visible {
        draw_playlist(frame, app, chunks[2]);
    }

    let status_line = match (&app.status, app.selected_track()) {
        (Some(msg), _) => Paragraph::new(msg.as_str()).style(Style::default().fg(Color::Cyan)),
        (None, Some(track)) if app.playlist_visible => {
            Paragraph::new(track.path.display().to_string())
                .style(Style::default().fg(Color::DarkGray))
        }
        _ => Paragraph::new(""),
    };
    frame.render_widget(status_line, chunks[3]);

    let footer = Paragraph::new(controls_text(app.seek_step_secs()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    if let Some(kind) = app.prompt {
        let popup = centered_rect_sized(72, 3, frame.area());
        frame.render_widget(Clear, popup);
        let shown = app.prompt_input.replace('\0', " | ");
        let input = Paragraph::new(format!("{shown}_")).block(
            Block::bordered().title(format!(" {} file or directory (enter/esc) ", kind.label())),
        );
        frame.render_widget(input, popup);
    }
}

fn draw_now_playing<B: AudioBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let player = &app.player;
    let labels = player.labels();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(26)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            labels.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(labels.artist.clone()),
        Line::from(labels.album.clone()),
        Line::from(Span::styled(
            labels.file_info.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(art) = &labels.album_art {
        lines.push(Line::from(Span::styled(
            format!("Cover: {}, {} bytes", art.format.label(), art.data.len()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let info = Paragraph::new(lines)
        .block(
            Block::bordered()
                .title(format!(" {} ", labels.caption))
                .title_alignment(Alignment::Center)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(info, cols[0]);

    let modes = Paragraph::new(vec![
        Line::from(player.state().label()),
        Line::from(format!("Volume: {}%", player.volume())),
        Line::from(format!("Repeat: {}", on_off(player.repeat()))),
        Line::from(format!("Shuffle: {}", on_off(player.shuffle()))),
    ])
    .block(Block::bordered().title(" status ").padding(Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }));
    frame.render_widget(modes, cols[1]);
}

fn draw_position<B: AudioBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let labels = app.player.labels();
    let mut label = if labels.time_length.is_empty() {
        labels.time_position.clone()
    } else {
        format!("{} / {}", labels.time_position, labels.time_length)
    };
    if let Some(target) = app.pending_seek() {
        label.push_str(&format!("  -> {}", format_duration(target)));
    }
    let gauge = Gauge::default()
        .block(Block::bordered())
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(app.player.position_bar().ratio())
        .label(label);
    frame.render_widget(gauge, area);
}

fn draw_playlist<B: AudioBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let playlist = app.player.playlist();

    // Only build items for the visible window, keeping the selection centered.
    let total = playlist.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = app.selected.min(total.saturating_sub(1));
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let items: Vec<ListItem> = playlist
        .iter()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(i, track)| playlist_row(i, track))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" playlist ")
                .title_bottom(Line::from(format!(" {} ", playlist_summary(playlist))).right_aligned()),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
