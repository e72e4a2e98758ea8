use crate::config;
use crate::library;
use crate::model::{Category, DirEntry, Direction, EntryKind, Mode, Screen};
use crate::shuffle::ShuffleSequencer;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// What double-activating the selected entry amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    None,
    Play(PathBuf),
    Descended,
}

/// Per-category browsing state: the resolved root, the directory currently
/// open beneath it, that directory's entries, the raw list selection, and
/// the shuffle walk over the entries.
#[derive(Debug)]
pub struct CategoryState {
    pub root: PathBuf,
    pub dir: PathBuf,
    pub entries: Vec<DirEntry>,
    pub selected: Option<usize>,
    shuffle: ShuffleSequencer,
}

impl CategoryState {
    fn new(root: PathBuf) -> Self {
        let mut state = Self {
            dir: root.clone(),
            root,
            entries: Vec::new(),
            selected: None,
            shuffle: ShuffleSequencer::new(),
        };
        state.refresh();
        state
    }

    /// Relists the open directory and replaces the shuffle permutation; a
    /// stale permutation must never outlive a refresh.
    fn refresh(&mut self) {
        self.entries = library::list_entries(&self.dir);
        self.selected = None;
        self.shuffle.reshuffle(self.entries.len());
    }

    pub fn selected_entry(&self) -> Option<&DirEntry> {
        self.entries.get(self.selected?)
    }
}

/// UI-free transport and selection state: which screen is active, what is
/// selected in each category, and whether looping or shuffling is engaged.
/// The event loop drives it and renders from it; nothing in here touches
/// the terminal.
#[derive(Debug)]
pub struct PlayerCore {
    pub screen: Screen,
    pub mode: Mode,
    pub music: CategoryState,
    pub video: CategoryState,
    pub settings_selected: usize,
    pub status: String,
    pub dirty: bool,
}

impl PlayerCore {
    /// Resolves both category roots from the persisted slots (creating the
    /// defaults if needed) and lists their top-level entries.
    pub fn load() -> Result<Self> {
        Ok(Self::with_roots(
            config::resolve_root(Category::Music)?,
            config::resolve_root(Category::Video)?,
        ))
    }

    pub fn with_roots(music_root: PathBuf, video_root: PathBuf) -> Self {
        Self {
            screen: Screen::default(),
            mode: Mode::default(),
            music: CategoryState::new(music_root),
            video: CategoryState::new(video_root),
            settings_selected: 0,
            status: String::from("Ready"),
            dirty: true,
        }
    }

    pub fn category_state(&self, category: Category) -> &CategoryState {
        match category {
            Category::Music => &self.music,
            Category::Video => &self.video,
        }
    }

    fn category_state_mut(&mut self, category: Category) -> &mut CategoryState {
        match category {
            Category::Music => &mut self.music,
            Category::Video => &mut self.video,
        }
    }

    /// Browsing state behind the active screen, absent on Settings.
    pub fn visible(&self) -> Option<&CategoryState> {
        self.screen.category().map(|category| self.category_state(category))
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
        if let Some(category) = screen.category() {
            self.category_state_mut(category).refresh();
        }
        self.dirty = true;
    }

    pub fn cycle_screen(&mut self) {
        self.set_screen(self.screen.next());
    }

    pub fn select_next(&mut self) {
        match self.screen.category() {
            Some(category) => {
                let state = self.category_state_mut(category);
                if state.entries.is_empty() {
                    return;
                }
                let next = match state.selected {
                    None => 0,
                    Some(current) => (current + 1).min(state.entries.len() - 1),
                };
                state.selected = Some(next);
            }
            None => {
                self.settings_selected =
                    (self.settings_selected + 1).min(Category::ALL.len() - 1);
            }
        }
        self.dirty = true;
    }

    pub fn select_prev(&mut self) {
        match self.screen.category() {
            Some(category) => {
                let state = self.category_state_mut(category);
                if let Some(current) = state.selected {
                    state.selected = Some(current.saturating_sub(1));
                }
            }
            None => {
                self.settings_selected = self.settings_selected.saturating_sub(1);
            }
        }
        self.dirty = true;
    }

    /// Root slot the Settings cursor is on.
    pub fn selected_settings_category(&self) -> Category {
        Category::ALL[self.settings_selected.min(Category::ALL.len() - 1)]
    }

    /// Moves the selection one step for a skip/back action and returns the
    /// newly selected entry. With shuffle engaged the step walks the
    /// permutation; otherwise the raw selection moves by one, saturating at
    /// both ends. `None` means nothing moved: the caller neither replays the
    /// current file nor advances.
    pub fn skip(&mut self, direction: Direction) -> Option<DirEntry> {
        let category = self.screen.category()?;
        let randomizing = self.mode.is_randomizing();
        let state = self.category_state_mut(category);
        if state.entries.is_empty() {
            return None;
        }

        let next = if randomizing {
            state.shuffle.advance(direction)?
        } else {
            let len = state.entries.len();
            match (state.selected, direction) {
                (None, Direction::Forward) => 0,
                (None, Direction::Back) => return None,
                (Some(current), Direction::Forward) => {
                    if current + 1 >= len {
                        return None;
                    }
                    current + 1
                }
                (Some(current), Direction::Back) => current.checked_sub(1)?,
            }
        };

        let entry = state.entries.get(next).cloned();
        state.selected = Some(next);
        self.dirty = true;
        entry
    }

    /// Double-activation of the selected entry: a file is handed back to be
    /// played, a folder is descended into (which relists and reshuffles).
    pub fn activate_selected(&mut self) -> Activation {
        let Some(category) = self.screen.category() else {
            return Activation::None;
        };

        let Some(entry) = self
            .category_state(category)
            .selected_entry()
            .cloned()
        else {
            self.set_status("Nothing selected");
            return Activation::None;
        };

        match entry.kind {
            EntryKind::File => Activation::Play(entry.path),
            EntryKind::Folder => {
                let state = self.category_state_mut(category);
                state.dir = entry.path;
                state.refresh();
                self.set_status("Opened folder");
                Activation::Descended
            }
        }
    }

    /// Moves the open directory up one level, never above the category root.
    pub fn ascend(&mut self) {
        let Some(category) = self.screen.category() else {
            return;
        };
        let state = self.category_state_mut(category);
        if state.dir == state.root {
            return;
        }
        let Some(parent) = state.dir.parent().map(Path::to_path_buf) else {
            return;
        };
        state.dir = parent;
        state.refresh();
        self.set_status("Went back");
    }

    pub fn toggle_looping(&mut self) {
        self.mode = self.mode.toggled_looping();
        self.set_status(if self.mode.is_looping() {
            "Looping on"
        } else {
            "Looping off"
        });
    }

    pub fn toggle_randomizing(&mut self) {
        self.mode = self.mode.toggled_randomizing();
        self.set_status(if self.mode.is_randomizing() {
            "Shuffle on"
        } else {
            "Shuffle off"
        });
    }

    /// Re-resolves both roots from the persisted slots and reopens each
    /// category at its root.
    pub fn reload_roots(&mut self) -> Result<()> {
        for category in Category::ALL {
            let root = config::resolve_root(category)?;
            *self.category_state_mut(category) = CategoryState::new(root);
        }
        self.set_status("File list refreshed.");
        Ok(())
    }

    /// Persists `root` as the category's new root and reopens the category
    /// there.
    pub fn set_root(&mut self, category: Category, root: &Path) -> Result<()> {
        config::set_root(category, root)?;
        let resolved = config::resolve_root(category)?;
        *self.category_state_mut(category) = CategoryState::new(resolved);
        self.set_status("Root directory updated");
        Ok(())
    }

    fn set_status(&mut self, message: &str) {
        self.status = message.to_string();
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn library_with_files(names: &[&str]) -> TempDir {
        let dir = tempdir().expect("tempdir");
        for name in names {
            fs::write(dir.path().join(name), b"x").expect("write file");
        }
        dir
    }

    fn core_over(dir: &TempDir) -> PlayerCore {
        let empty = tempdir().expect("tempdir");
        PlayerCore::with_roots(dir.path().to_path_buf(), empty.path().join("missing"))
    }

    #[test]
    fn selection_moves_and_saturates() {
        let dir = library_with_files(&["a.mp3", "b.mp3", "c.mp3"]);
        let mut core = core_over(&dir);

        assert_eq!(core.visible().expect("visible").selected, None);
        core.select_next();
        assert_eq!(core.visible().expect("visible").selected, Some(0));
        core.select_next();
        core.select_next();
        core.select_next();
        assert_eq!(core.visible().expect("visible").selected, Some(2));
        core.select_prev();
        core.select_prev();
        core.select_prev();
        assert_eq!(core.visible().expect("visible").selected, Some(0));
    }

    #[test]
    fn plain_skip_saturates_at_both_ends_without_replaying() {
        let dir = library_with_files(&["a.mp3", "b.mp3"]);
        let mut core = core_over(&dir);

        assert!(core.skip(Direction::Back).is_none());

        let first = core.skip(Direction::Forward).expect("first skip");
        assert_eq!(Some(first), core.visible().expect("visible").selected_entry().cloned());

        core.skip(Direction::Forward).expect("second skip");
        assert_eq!(core.visible().expect("visible").selected, Some(1));
        assert!(core.skip(Direction::Forward).is_none());
        assert_eq!(core.visible().expect("visible").selected, Some(1));
    }

    #[test]
    fn shuffled_skip_walks_the_permutation_without_repeats() {
        let dir = library_with_files(&["a.mp3", "b.mp3", "c.mp3", "d.mp3", "e.mp3"]);
        let mut core = core_over(&dir);
        core.toggle_randomizing();

        let mut visited = HashSet::new();
        while let Some(entry) = core.skip(Direction::Forward) {
            assert!(visited.insert(entry.path), "an index repeated mid-walk");
        }
        assert_eq!(visited.len(), 4);

        let at_end = core.visible().expect("visible").selected;
        assert!(core.skip(Direction::Forward).is_none());
        assert_eq!(core.visible().expect("visible").selected, at_end);
    }

    #[test]
    fn shuffled_back_retraces_the_walk() {
        let dir = library_with_files(&["a.mp3", "b.mp3", "c.mp3", "d.mp3"]);
        let mut core = core_over(&dir);
        core.toggle_randomizing();

        let first = core.skip(Direction::Forward).expect("forward");
        let _second = core.skip(Direction::Forward).expect("forward");
        let back = core.skip(Direction::Back).expect("back");
        assert_eq!(first, back);
    }

    #[test]
    fn activating_a_file_hands_it_back_to_play() {
        let dir = library_with_files(&["a.mp3"]);
        let mut core = core_over(&dir);
        core.select_next();

        match core.activate_selected() {
            Activation::Play(path) => assert_eq!(path, dir.path().join("a.mp3")),
            other => panic!("expected Play, got {other:?}"),
        }
    }

    #[test]
    fn activating_a_folder_descends_and_clears_the_selection() {
        let dir = library_with_files(&[]);
        fs::create_dir(dir.path().join("albums")).expect("create folder");
        fs::write(dir.path().join("albums").join("x.mp3"), b"x").expect("write nested");

        let mut core = core_over(&dir);
        core.select_next();
        assert_eq!(core.activate_selected(), Activation::Descended);

        let visible = core.visible().expect("visible");
        assert_eq!(visible.dir, dir.path().join("albums"));
        assert_eq!(visible.selected, None);
        assert_eq!(visible.entries.len(), 1);
    }

    #[test]
    fn descending_resets_the_shuffle_walk() {
        let dir = library_with_files(&["a.mp3", "b.mp3", "c.mp3"]);
        fs::create_dir(dir.path().join("sub")).expect("create folder");
        for name in ["x.mp3", "y.mp3"] {
            fs::write(dir.path().join("sub").join(name), b"x").expect("write nested");
        }

        let mut core = core_over(&dir);
        core.toggle_randomizing();
        core.skip(Direction::Forward).expect("walk a step");

        // Select the folder and descend; the fresh two-entry permutation
        // allows exactly one forward step from its start.
        let folder_index = core
            .visible()
            .expect("visible")
            .entries
            .iter()
            .position(|entry| !entry.is_file())
            .expect("folder entry");
        core.music.selected = Some(folder_index);
        assert_eq!(core.activate_selected(), Activation::Descended);

        assert!(core.skip(Direction::Forward).is_some());
        assert!(core.skip(Direction::Forward).is_none());
    }

    #[test]
    fn ascend_stops_at_the_category_root() {
        let dir = library_with_files(&[]);
        fs::create_dir(dir.path().join("inner")).expect("create folder");

        let mut core = core_over(&dir);
        core.select_next();
        assert_eq!(core.activate_selected(), Activation::Descended);
        assert_eq!(core.visible().expect("visible").dir, dir.path().join("inner"));

        core.ascend();
        assert_eq!(core.visible().expect("visible").dir, dir.path());

        core.ascend();
        assert_eq!(core.visible().expect("visible").dir, dir.path());
    }

    #[test]
    fn switching_screens_refreshes_the_entry_list() {
        let dir = library_with_files(&["a.mp3"]);
        let mut core = core_over(&dir);

        fs::write(dir.path().join("b.mp3"), b"x").expect("write file");
        assert_eq!(core.visible().expect("visible").entries.len(), 1);

        core.set_screen(Screen::Settings);
        assert!(core.visible().is_none());
        core.set_screen(Screen::Music);
        assert_eq!(core.visible().expect("visible").entries.len(), 2);
    }

    #[test]
    fn settings_cursor_walks_the_two_slots() {
        let dir = library_with_files(&[]);
        let mut core = core_over(&dir);
        core.set_screen(Screen::Settings);

        assert_eq!(core.selected_settings_category(), Category::Music);
        core.select_next();
        assert_eq!(core.selected_settings_category(), Category::Video);
        core.select_next();
        assert_eq!(core.selected_settings_category(), Category::Video);
        core.select_prev();
        assert_eq!(core.selected_settings_category(), Category::Music);
    }
}
