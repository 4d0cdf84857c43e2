//! Callback contracts through which controllers publish snapshots
//!
//! Callbacks run synchronously on the thread that invoked the controller
//! operation. Snapshots are handed over by value, so a listener may keep or
//! modify them without touching the controller's own state.

use crate::state::{MenuState, PlaybackState, PresetState};

/// Receives menu snapshots and soft navigation failures
pub trait NavigationListener: Send + Sync {
    /// Called after every successful menu refresh
    fn navigation_updated(&self, state: MenuState);

    /// Called when an item or path cannot be reached, or returning to the
    /// root menu fails. The operation itself still returns `Ok`.
    fn navigation_error(&self, message: &str);
}

/// Receives playback and preset snapshots
pub trait PlaybackListener: Send + Sync {
    fn play_info_updated(&self, state: PlaybackState);

    fn play_control_updated(&self, state: PresetState);
}
