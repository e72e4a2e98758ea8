use crate::core::PlayerCore;
use crate::model::{Category, Mode, Screen};
use crate::playback::PlaybackController;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph};
use std::time::Duration;

const APP_TITLE: &str = "medley";

/// Modal folder picker standing in for the OS directory chooser. At most
/// one exists at a time; the app holds it in an `Option` and refuses to
/// open a second.
#[derive(Debug)]
pub struct FolderPicker {
    pub category: Category,
    pub input: String,
}

impl FolderPicker {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            input: String::new(),
        }
    }
}

pub fn draw(
    frame: &mut Frame,
    core: &PlayerCore,
    playback: &PlaybackController,
    picker: Option<&FolderPicker>,
    fullscreen: bool,
) {
    let area = frame.area();

    if fullscreen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);
        draw_transport(frame, chunks[0], core, playback);
        draw_status(frame, chunks[1], core);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(5),
                Constraint::Length(3),
            ])
            .split(area);
        draw_tabs(frame, chunks[0], core);
        match core.screen {
            Screen::Settings => draw_settings(frame, chunks[1], core),
            _ => draw_entry_list(frame, chunks[1], core),
        }
        draw_transport(frame, chunks[2], core, playback);
        draw_status(frame, chunks[3], core);
    }

    if let Some(picker) = picker {
        draw_picker(frame, area, picker);
    }
}

fn draw_tabs(frame: &mut Frame, area: Rect, core: &PlayerCore) {
    let mut spans = vec![Span::styled(
        format!(" {APP_TITLE} "),
        Style::default().fg(Color::Cyan),
    )];
    for screen in [Screen::Music, Screen::Video, Screen::Settings] {
        let label = match screen {
            Screen::Music => "Music",
            Screen::Video => "Video",
            Screen::Settings => "Settings",
        };
        let style = if core.screen == screen {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(label, style));
    }

    let tabs = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Tab: switch"));
    frame.render_widget(tabs, area);
}

fn draw_entry_list(frame: &mut Frame, area: Rect, core: &PlayerCore) {
    let Some(state) = core.visible() else {
        return;
    };

    let items: Vec<ListItem> = state
        .entries
        .iter()
        .map(|entry| ListItem::new(entry.display_label()))
        .collect();

    let title = state.dir.display().to_string();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default();
    list_state.select(state.selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_settings(frame: &mut Frame, area: Rect, core: &PlayerCore) {
    let mut lines = Vec::with_capacity(Category::ALL.len() + 2);
    for (index, category) in Category::ALL.into_iter().enumerate() {
        let row = format!(
            "{} root: {}",
            category.label(),
            core.category_state(category).root.display()
        );
        let style = if index == core.settings_selected {
            Style::default().bg(Color::DarkGray).fg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(row, style)));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Enter: choose a new folder for the highlighted slot",
        Style::default().fg(Color::Gray),
    )));

    let settings = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Settings"));
    frame.render_widget(settings, area);
}

fn draw_transport(frame: &mut Frame, area: Rect, core: &PlayerCore, playback: &PlaybackController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
        .margin(1)
        .split(area);

    frame.render_widget(
        Block::default().borders(Borders::ALL).title("Player"),
        area,
    );

    let track_label = playback
        .current_path()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| String::from("No media selected."));
    frame.render_widget(Paragraph::new(track_label), chunks[0]);

    let (elapsed, total) = playback.progress().unwrap_or((Duration::ZERO, None));
    let ratio = total
        .filter(|total| !total.is_zero())
        .map(|total| (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0))
        .unwrap_or(0.0);
    let time_label = format!(
        "{} / {}",
        format_timestamp(elapsed.as_secs()),
        total
            .map(|total| format_timestamp(total.as_secs()))
            .unwrap_or_else(|| String::from("--:--:--")),
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(time_label);
    frame.render_widget(gauge, chunks[1]);

    let play_symbol = if playback.is_playing() { "▶" } else { "▮▮" };
    let mode_style = |active: bool| {
        if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let controls = Line::from(vec![
        Span::raw(format!(" {play_symbol}  ")),
        Span::styled("[Loop]", mode_style(core.mode == Mode::Looping)),
        Span::raw(" "),
        Span::styled("[Shuffle]", mode_style(core.mode == Mode::Randomizing)),
        Span::styled(
            "   Space play/pause  ←/→ back/skip  r restart  ,/. seek  l loop  s shuffle  f fullscreen",
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(Paragraph::new(controls), chunks[2]);
}

fn draw_status(frame: &mut Frame, area: Rect, core: &PlayerCore) {
    let status = Paragraph::new(core.status.as_str())
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, area);
}

fn draw_picker(frame: &mut Frame, area: Rect, picker: &FolderPicker) {
    let popup = centered_rect(60, 20, area);
    frame.render_widget(Clear, popup);

    let title = format!("Choose {} folder", picker.category.label());
    let body = vec![
        Line::raw(format!("> {}", picker.input)),
        Line::raw(""),
        Line::from(Span::styled(
            "Enter: confirm   Esc: cancel",
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// `HH:MM:SS`, hours shown modulo 24.
pub fn format_timestamp(total_seconds: u64) -> String {
    let hours = total_seconds / 3600 % 24;
    let minutes = total_seconds / 60 % 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
