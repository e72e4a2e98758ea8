use std::path::PathBuf;

/// Media category backed by its own persisted root directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Music,
    Video,
}

impl Category {
    pub const ALL: [Self; 2] = [Self::Music, Self::Video];

    /// Name of the root slot; doubles as the default folder name under the
    /// user's home directory.
    pub fn slot_name(self) -> &'static str {
        match self {
            Self::Music => "Music",
            Self::Video => "Videos",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Music => "Music",
            Self::Video => "Video",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Music,
    Video,
    Settings,
}

impl Screen {
    pub fn category(self) -> Option<Category> {
        match self {
            Self::Music => Some(Category::Music),
            Self::Video => Some(Category::Video),
            Self::Settings => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Music => Self::Video,
            Self::Video => Self::Settings,
            Self::Settings => Self::Music,
        }
    }
}

/// Looping and shuffling are mutually exclusive; turning one on turns the
/// other off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Off,
    Looping,
    Randomizing,
}

impl Mode {
    pub fn toggled_looping(self) -> Self {
        if self == Self::Looping {
            Self::Off
        } else {
            Self::Looping
        }
    }

    pub fn toggled_randomizing(self) -> Self {
        if self == Self::Randomizing {
            Self::Off
        } else {
            Self::Randomizing
        }
    }

    pub fn is_looping(self) -> bool {
        self == Self::Looping
    }

    pub fn is_randomizing(self) -> bool {
        self == Self::Randomizing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// One immediate child of the currently open directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn display_label(&self) -> String {
        match self.kind {
            EntryKind::File => self.name.clone(),
            EntryKind::Folder => format!("Folder: {}", self.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}
