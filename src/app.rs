use crate::audio::{MediaEngine, NullAudioEngine, RodioAudioEngine};
use crate::core::{Activation, PlayerCore};
use crate::model::{Direction, Screen};
use crate::playback::{PlaybackController, PlaybackEvent};
use crate::ui::{self, FolderPicker};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub struct AppOptions {
    pub no_audio: bool,
}

pub fn run(options: AppOptions) -> Result<()> {
    let mut core = PlayerCore::load()?;
    let mut playback = PlaybackController::new(open_engine(options.no_audio));

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut picker: Option<FolderPicker> = None;
    let mut fullscreen = false;
    let mut last_tick = Instant::now();

    let result: Result<()> = loop {
        dispatch_playback_events(&mut core, &mut playback);

        if core.dirty || last_tick.elapsed() > Duration::from_millis(250) {
            terminal.draw(|frame| {
                ui::draw(frame, &core, &playback, picker.as_ref(), fullscreen)
            })?;
            core.dirty = false;
            last_tick = Instant::now();
        }

        if !event::poll(Duration::from_millis(33))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if picker.is_some() {
            handle_picker_key(&mut core, &mut playback, &mut picker, key.code);
            continue;
        }

        match key.code {
            KeyCode::Char('q') => break Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break Ok(()),
            KeyCode::Esc if fullscreen => {
                fullscreen = false;
                core.dirty = true;
            }
            KeyCode::Char('f') => {
                fullscreen = !fullscreen;
                core.dirty = true;
            }
            KeyCode::Tab => core.cycle_screen(),
            KeyCode::Up => core.select_prev(),
            KeyCode::Down => core.select_next(),
            KeyCode::Enter => activate(&mut core, &mut playback, &mut picker),
            KeyCode::Backspace => core.ascend(),
            KeyCode::Char(' ') => {
                playback.play_pause();
                core.dirty = true;
            }
            KeyCode::Right => skip(&mut core, &mut playback, Direction::Forward),
            KeyCode::Left => skip(&mut core, &mut playback, Direction::Back),
            KeyCode::Char('r') => {
                if let Err(err) = playback.restart() {
                    core.status = format!("playback error: {err:#}");
                }
                core.dirty = true;
            }
            KeyCode::Char('l') => core.toggle_looping(),
            KeyCode::Char('s') => core.toggle_randomizing(),
            KeyCode::Char(',') => seek_by(&mut core, &mut playback, -5),
            KeyCode::Char('.') => seek_by(&mut core, &mut playback, 5),
            KeyCode::F(5) => {
                playback.stop();
                if let Err(err) = core.reload_roots() {
                    core.status = format!("refresh error: {err:#}");
                    core.dirty = true;
                }
            }
            _ => {}
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn open_engine(no_audio: bool) -> Box<dyn MediaEngine> {
    if no_audio {
        return Box::new(NullAudioEngine::new());
    }
    match RodioAudioEngine::new() {
        Ok(engine) => Box::new(engine),
        Err(_) => Box::new(NullAudioEngine::new()),
    }
}

/// End-of-media handling: the controller only reports completion; the
/// restart-or-advance decision is made here from the mode flag.
fn dispatch_playback_events(core: &mut PlayerCore, playback: &mut PlaybackController) {
    match playback.poll() {
        Some(PlaybackEvent::Completed) => {
            if core.mode.is_looping() {
                if let Err(err) = playback.restart() {
                    core.status = format!("playback error: {err:#}");
                }
            } else {
                match core.skip(Direction::Forward) {
                    Some(entry) if entry.is_file() => play_path(core, playback, &entry.path),
                    Some(_) => {}
                    None => {
                        playback.stop();
                        core.status = String::from("End of list");
                    }
                }
            }
            core.dirty = true;
        }
        // The periodic redraw picks position changes up from the
        // controller; nothing to cache here.
        Some(PlaybackEvent::Progress { .. }) | None => {}
    }
}

fn activate(core: &mut PlayerCore, playback: &mut PlaybackController, picker: &mut Option<FolderPicker>) {
    if core.screen == Screen::Settings {
        // Chooser is modally exclusive: ignore the request while one is open.
        if picker.is_none() {
            *picker = Some(FolderPicker::new(core.selected_settings_category()));
            core.dirty = true;
        }
        return;
    }

    match core.activate_selected() {
        Activation::Play(path) => play_path(core, playback, &path),
        Activation::Descended | Activation::None => {}
    }
}

fn handle_picker_key(
    core: &mut PlayerCore,
    playback: &mut PlaybackController,
    picker: &mut Option<FolderPicker>,
    code: KeyCode,
) {
    match code {
        KeyCode::Esc => {
            *picker = None;
            core.dirty = true;
        }
        KeyCode::Enter => {
            let Some(choice) = picker.take() else {
                return;
            };
            let path = PathBuf::from(choice.input.trim());
            if path.as_os_str().is_empty() {
                core.status = String::from("No folder entered");
                core.dirty = true;
                return;
            }
            playback.stop();
            if let Err(err) = core.set_root(choice.category, &path) {
                core.status = format!("root error: {err:#}");
            }
            core.dirty = true;
        }
        KeyCode::Backspace => {
            if let Some(active) = picker.as_mut() {
                active.input.pop();
            }
            core.dirty = true;
        }
        KeyCode::Char(ch) => {
            if let Some(active) = picker.as_mut() {
                active.input.push(ch);
            }
            core.dirty = true;
        }
        _ => {}
    }
}

/// User-driven skip/back: the selection moves first; playback follows only
/// if something was playing and the new selection is a file.
fn skip(core: &mut PlayerCore, playback: &mut PlaybackController, direction: Direction) {
    let was_playing = playback.is_playing();
    if let Some(entry) = core.skip(direction)
        && was_playing
        && entry.is_file()
    {
        play_path(core, playback, &entry.path);
    }
}

fn play_path(core: &mut PlayerCore, playback: &mut PlaybackController, path: &Path) {
    match playback.load(path) {
        Ok(()) => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            core.status = format!("Playing: {name}");
        }
        Err(err) => {
            core.status = format!("playback error: {err:#}");
        }
    }
    core.dirty = true;
}

fn seek_by(core: &mut PlayerCore, playback: &mut PlaybackController, delta_seconds: i64) {
    let Some((elapsed, _)) = playback.progress() else {
        return;
    };
    let target = if delta_seconds < 0 {
        elapsed.saturating_sub(Duration::from_secs(delta_seconds.unsigned_abs()))
    } else {
        elapsed.saturating_add(Duration::from_secs(delta_seconds.unsigned_abs()))
    };
    if let Err(err) = playback.seek(target) {
        core.status = format!("seek error: {err:#}");
    }
    core.dirty = true;
}
