//! Command bodies of the receiver protocol
//!
//! Every command is an XML fragment scoped to one input:
//! `<NET_RADIO><List_Control><Cursor>Up</Cursor></List_Control></NET_RADIO>`.
//! The functions here build those fragments; the transport adds the
//! `<YAMAHA_AV>` document frame.

use xml_client::Element;

use crate::transport::Transport;
use crate::{ApiError, Result};

/// Cursor commands of `<List_Control>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Up,
    Down,
    Left,
    Right,
    Back,
    Select,
    /// Return to the root menu, the wording most firmware understands
    BackToHome,
    /// Return to the root menu, the wording used by some other firmware
    ReturnToHome,
}

impl Cursor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cursor::Up => "Up",
            Cursor::Down => "Down",
            Cursor::Left => "Left",
            Cursor::Right => "Right",
            Cursor::Back => "Back",
            Cursor::Select => "Select",
            Cursor::BackToHome => "Back to Home",
            Cursor::ReturnToHome => "Return to Home",
        }
    }
}

/// Transport commands of `<Play_Control>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Play,
    Stop,
    Pause,
    SkipForward,
    SkipReverse,
    NextTrack,
    PreviousTrack,
}

impl Playback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Playback::Play => "Play",
            Playback::Stop => "Stop",
            Playback::Pause => "Pause",
            Playback::SkipForward => "Skip Fwd",
            Playback::SkipReverse => "Skip Rev",
            Playback::NextTrack => ">>|",
            Playback::PreviousTrack => "|<<",
        }
    }
}

/// Wrap `inner` in the element of the active input
pub fn wrap(input: &str, inner: &str) -> String {
    format!("<{input}>{inner}</{input}>", input = input, inner = inner)
}

pub fn cursor(input: &str, cursor: Cursor) -> String {
    wrap(
        input,
        &format!("<List_Control><Cursor>{}</Cursor></List_Control>", cursor.as_str()),
    )
}

/// Move the cursor to an absolute, 1-based line of the current list
pub fn jump_line(input: &str, line: u32) -> String {
    wrap(
        input,
        &format!("<List_Control><Jump_Line>{}</Jump_Line></List_Control>", line),
    )
}

/// Select a slot (1..=8) of the page currently loaded
pub fn direct_select(input: &str, slot: usize) -> String {
    wrap(
        input,
        &format!("<List_Control><Direct_Sel>Line_{}</Direct_Sel></List_Control>", slot),
    )
}

pub fn list_info_query(input: &str) -> String {
    wrap(input, "<List_Info>GetParam</List_Info>")
}

pub fn playback(input: &str, playback: Playback) -> String {
    wrap(
        input,
        &format!("<Play_Control><Playback>{}</Playback></Play_Control>", playback.as_str()),
    )
}

pub fn preset_select(input: &str, preset: u32) -> String {
    wrap(
        input,
        &format!(
            "<Play_Control><Preset><Preset_Sel>{}</Preset_Sel></Preset></Play_Control>",
            preset
        ),
    )
}

pub fn play_info_query(input: &str) -> String {
    wrap(input, "<Play_Info>GetParam</Play_Info>")
}

pub fn play_control_query(input: &str) -> String {
    wrap(input, "<Play_Control>GetParam</Play_Control>")
}

/// Send a query and parse the response tree
pub(crate) fn query(transport: &dyn Transport, body: &str) -> Result<Element> {
    let response = transport.send(body)?;
    if response.trim().is_empty() {
        return Err(ApiError::Protocol(format!("Empty response to {}", body)));
    }
    transport.parse(&response)
}

/// Text at `path`, `None` when the node is absent
pub(crate) fn text_at(transport: &dyn Transport, tree: &Element, path: &str) -> Option<String> {
    transport.lookup(tree, path).map(xml_client::text)
}

/// Text at `path`, a protocol error when the node is absent
pub(crate) fn required_text(
    transport: &dyn Transport,
    tree: &Element,
    path: &str,
) -> Result<String> {
    text_at(transport, tree, path).ok_or_else(|| ApiError::missing_field(path))
}

/// Integer at `path`, a protocol error when absent or not a number
pub(crate) fn required_int(transport: &dyn Transport, tree: &Element, path: &str) -> Result<i64> {
    let raw = required_text(transport, tree, path)?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::Protocol(format!("{} is not a number: '{}'", path, raw)))
}
