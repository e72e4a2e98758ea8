use crate::audio::MediaEngine;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What the controller observed since the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Progress {
        elapsed: Duration,
        total: Option<Duration>,
    },
    Completed,
}

#[derive(Debug)]
struct Session {
    path: PathBuf,
    stopped: bool,
    completed: bool,
}

/// Owns the media engine and the single active session.
///
/// Replacement is teardown-first: [`load`](Self::load) stops the old binding
/// before the new one exists, so a progress reading can only ever describe
/// the live session. `Completed` is reported exactly once per playback;
/// [`restart`](Self::restart) and [`seek`](Self::seek) re-arm it. The
/// restart-or-advance decision at end of media belongs to the caller.
pub struct PlaybackController {
    engine: Box<dyn MediaEngine>,
    session: Option<Session>,
}

impl PlaybackController {
    pub fn new(engine: Box<dyn MediaEngine>) -> Self {
        Self {
            engine,
            session: None,
        }
    }

    /// Binds a new session to `path`, tearing down any predecessor first.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.engine.stop();
        self.session = None;
        self.engine.play(path)?;
        self.session = Some(Session {
            path: path.to_path_buf(),
            stopped: false,
            completed: false,
        });
        Ok(())
    }

    /// Toggles play/pause. Does nothing without a live session.
    pub fn play_pause(&mut self) {
        if !self.has_live_session() {
            return;
        }
        if self.engine.is_paused() {
            self.engine.resume();
        } else {
            self.engine.pause();
        }
    }

    /// Seeks the live session back to the start, keeping its play/pause
    /// state.
    pub fn restart(&mut self) -> Result<()> {
        let Some(session) = self.session.as_mut().filter(|session| !session.stopped) else {
            return Ok(());
        };
        session.completed = false;
        self.engine.seek_to(Duration::ZERO)
    }

    /// Halts playback and releases the decode resource. The session keeps
    /// its identity for display until the next `load`.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stopped = true;
        }
        self.engine.stop();
    }

    /// Seeks to `position`, silently clamped to `[0, duration]`.
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        let Some(session) = self.session.as_mut().filter(|session| !session.stopped) else {
            return Ok(());
        };
        let target = match self.engine.duration() {
            Some(duration) => position.min(duration),
            None => position,
        };
        session.completed = false;
        self.engine.seek_to(target)
    }

    pub fn is_playing(&self) -> bool {
        self.has_live_session() && !self.engine.is_paused()
    }

    /// Path of the current session, live or stopped, for display.
    pub fn current_path(&self) -> Option<&Path> {
        self.session.as_ref().map(|session| session.path.as_path())
    }

    /// Position/duration snapshot of the live session.
    pub fn progress(&self) -> Option<(Duration, Option<Duration>)> {
        if !self.has_live_session() {
            return None;
        }
        let elapsed = self.engine.position()?;
        Some((elapsed, self.engine.duration()))
    }

    /// Drives event reporting from the UI tick. `Completed` fires exactly
    /// once per playback; otherwise the live session's progress is reported.
    pub fn poll(&mut self) -> Option<PlaybackEvent> {
        let session = self.session.as_mut().filter(|session| !session.stopped)?;
        if !session.completed && self.engine.is_finished() {
            session.completed = true;
            return Some(PlaybackEvent::Completed);
        }
        let elapsed = self.engine.position()?;
        Some(PlaybackEvent::Progress {
            elapsed,
            total: self.engine.duration(),
        })
    }

    fn has_live_session(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| !session.stopped)
    }
}
