//! Snapshot types published to listeners

use serde::{Deserialize, Serialize};

/// Number of list entries the receiver transfers per page
pub const ITEMS_PER_PAGE: usize = 8;

/// Placeholder for values that are unknown after invalidation
pub const NOT_AVAILABLE: &str = "N/A";

/// Menu position of a navigable input
///
/// `items` only ever describes the page the receiver has currently loaded;
/// the full list is `max_line` entries long and has to be paged through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuState {
    pub name: String,
    /// Depth of the menu, 0 is the root, -1 unknown
    pub layer: i32,
    /// 1-based cursor line within the whole list, 0 if the list is empty
    pub current_line: u32,
    /// Number of entries in the whole list
    pub max_line: u32,
    pub items: [Option<String>; ITEMS_PER_PAGE],
}

impl MenuState {
    /// Number of pages of the list
    pub fn page_count(&self) -> u32 {
        self.max_line.div_ceil(ITEMS_PER_PAGE as u32)
    }

    /// 0-based page the cursor is on
    pub fn current_page(&self) -> u32 {
        self.current_line.saturating_sub(1) / ITEMS_PER_PAGE as u32
    }

    pub fn is_root(&self) -> bool {
        self.layer == 0
    }

    /// Label under the cursor, empty if there is none
    pub fn current_item_name(&self) -> &str {
        if self.current_line == 0 {
            return "";
        }
        let slot = (self.current_line as usize - 1) % ITEMS_PER_PAGE;
        self.items[slot].as_deref().unwrap_or("")
    }

    /// 1-based slot of the first entry on the loaded page labelled `name`
    pub fn find_item(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.as_deref() == Some(name))
            .map(|index| index + 1)
    }

    /// Labels of the loaded page, each followed by a comma
    pub fn item_labels(&self) -> String {
        self.items
            .iter()
            .flatten()
            .filter(|item| !item.is_empty())
            .fold(String::new(), |mut labels, item| {
                labels.push_str(item);
                labels.push(',');
                labels
            })
    }

    pub fn clear_items(&mut self) {
        self.items = Default::default();
    }

    pub fn invalidate(&mut self) {
        self.name = NOT_AVAILABLE.to_string();
        self.layer = 0;
        self.current_line = 0;
        self.max_line = 0;
        self.clear_items();
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            layer: -1,
            current_line: 0,
            max_line: 0,
            items: Default::default(),
        }
    }
}

/// Transport state reported in `Play_Info/Playback_Info`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackMode {
    Play,
    #[default]
    Stop,
    Pause,
    /// Anything else the receiver reports, kept verbatim
    Other(String),
}

impl PlaybackMode {
    pub fn from_device(value: &str) -> Self {
        match value {
            "Play" => PlaybackMode::Play,
            "Stop" => PlaybackMode::Stop,
            "Pause" => PlaybackMode::Pause,
            other => PlaybackMode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlaybackMode::Play => "Play",
            PlaybackMode::Stop => "Stop",
            PlaybackMode::Pause => "Pause",
            PlaybackMode::Other(value) => value,
        }
    }
}

/// What is currently playing on an input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Station name, for the tuner the RDS radio text
    pub station: String,
    pub artist: String,
    pub album: String,
    pub song: String,
    pub playback_mode: PlaybackMode,
}

impl PlaybackState {
    pub fn invalidate(&mut self) {
        self.playback_mode = PlaybackMode::Other(NOT_AVAILABLE.to_string());
        self.station = NOT_AVAILABLE.to_string();
        self.artist = NOT_AVAILABLE.to_string();
        self.album = NOT_AVAILABLE.to_string();
        self.song = NOT_AVAILABLE.to_string();
    }
}

/// Preset selected on an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetState {
    /// Preset number, -1 when the receiver does not report one
    pub preset_channel: i32,
}

impl PresetState {
    pub fn invalidate(&mut self) {
        self.preset_channel = -1;
    }
}

impl Default for PresetState {
    fn default() -> Self {
        Self { preset_channel: -1 }
    }
}
