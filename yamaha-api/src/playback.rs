//! Playback and preset control for an input
//!
//! Unlike [`MenuNavigator`](crate::MenuNavigator) this controller keeps no
//! state: every query produces a fresh snapshot that is handed to the
//! listener, which decides what to retain.

use std::sync::Arc;

use tracing::debug;

use crate::command::{self, Playback};
use crate::input;
use crate::listener::PlaybackListener;
use crate::state::{PlaybackMode, PlaybackState, PresetState};
use crate::transport::{Transport, TransportHandle};
use crate::{ApiError, Result};

const PLAYBACK_INFO: &str = "Play_Info/Playback_Info";
const META_INFO: &str = "Play_Info/Meta_Info";
const PRESET: &str = "Play_Control/Preset/Preset_Sel";

/// Playback controller for one input
pub struct PlaybackController {
    input: String,
    transport: TransportHandle,
    listener: Option<Arc<dyn PlaybackListener>>,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("input", &self.input)
            .field("transport", &self.transport)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl PlaybackController {
    /// Create a controller without a listener. Queries are skipped until one
    /// is set with [`with_listener`](Self::with_listener).
    pub fn new(input: impl Into<String>, transport: &Arc<dyn Transport>) -> Self {
        Self {
            input: input.into(),
            transport: TransportHandle::new(transport),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn PlaybackListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Query what is playing and publish it. Does nothing without a listener.
    pub fn update_playback_information(&self) -> Result<()> {
        let transport = self.transport.get()?;
        self.publish_playback(transport.as_ref())
    }

    /// Query the selected preset and publish it. Does nothing without a listener.
    pub fn update_preset_information(&self) -> Result<()> {
        let transport = self.transport.get()?;
        self.publish_preset(transport.as_ref())
    }

    pub fn play(&self) -> Result<()> {
        self.playback_and_refresh(Playback::Play)
    }

    pub fn stop(&self) -> Result<()> {
        self.playback_and_refresh(Playback::Stop)
    }

    /// Not available for streams such as network radio
    pub fn pause(&self) -> Result<()> {
        self.playback_and_refresh(Playback::Pause)
    }

    pub fn next_track(&self) -> Result<()> {
        self.playback_and_refresh(Playback::NextTrack)
    }

    pub fn previous_track(&self) -> Result<()> {
        self.playback_and_refresh(Playback::PreviousTrack)
    }

    /// Seek forward. The receiver has no meaningful new snapshot right after
    /// a seek, so no playback query follows.
    pub fn skip_forward(&self) -> Result<()> {
        let transport = self.transport.get()?;
        self.send_playback(transport.as_ref(), Playback::SkipForward)
    }

    /// Seek backward, without a following playback query
    pub fn skip_reverse(&self) -> Result<()> {
        let transport = self.transport.get()?;
        self.send_playback(transport.as_ref(), Playback::SkipReverse)
    }

    /// Select a preset, usually in the range 1..=40, then publish the preset
    /// the receiver reports.
    pub fn select_item_by_preset_number(&self, preset: u32) -> Result<()> {
        let transport = self.transport.get()?;
        debug!(input = %self.input, preset, "Selecting preset");
        transport.send_only(&command::preset_select(&self.input, preset))?;
        self.publish_preset(transport.as_ref())
    }

    fn playback_and_refresh(&self, playback: Playback) -> Result<()> {
        let transport = self.transport.get()?;
        self.send_playback(transport.as_ref(), playback)?;
        self.publish_playback(transport.as_ref())
    }

    fn send_playback(&self, transport: &dyn Transport, playback: Playback) -> Result<()> {
        debug!(input = %self.input, command = playback.as_str(), "Sending playback command");
        transport.send_only(&command::playback(&self.input, playback))
    }

    fn publish_playback(&self, transport: &dyn Transport) -> Result<()> {
        let Some(listener) = &self.listener else {
            return Ok(());
        };

        let tree = command::query(transport, &command::play_info_query(&self.input))?;
        let field = |name: &str| {
            let path = format!("{}/{}", META_INFO, name);
            command::text_at(transport, &tree, &path).unwrap_or_default()
        };

        // The tuner carries its station name in the RDS radio text
        let station_field = if input::is_tuner(&self.input) {
            "Radio_Text_A"
        } else {
            "Station"
        };

        let state = PlaybackState {
            playback_mode: PlaybackMode::from_device(
                &command::text_at(transport, &tree, PLAYBACK_INFO).unwrap_or_default(),
            ),
            station: field(station_field),
            artist: field("Artist"),
            album: field("Album"),
            song: field("Song"),
        };

        debug!(input = %self.input, ?state, "Playback information updated");
        listener.play_info_updated(state);
        Ok(())
    }

    fn publish_preset(&self, transport: &dyn Transport) -> Result<()> {
        let Some(listener) = &self.listener else {
            return Ok(());
        };

        let tree = command::query(transport, &command::play_control_query(&self.input))?;
        let preset_channel = match command::text_at(transport, &tree, PRESET) {
            None => -1,
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ApiError::Protocol(format!("{} is not a number: '{}'", PRESET, raw)))?,
        };

        let state = PresetState { preset_channel };
        debug!(input = %self.input, preset_channel, "Preset information updated");
        listener.play_control_updated(state);
        Ok(())
    }
}
