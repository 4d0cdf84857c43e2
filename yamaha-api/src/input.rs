//! Input identifiers
//!
//! Each command is scoped to an input by wrapping it in the input's element.
//! The controllers accept any identifier; checking that an input actually
//! supports menus or playback is left to the caller, using the sets below.

pub const TUNER: &str = "TUNER";
pub const NET_RADIO: &str = "NET_RADIO";
pub const USB: &str = "USB";
pub const DOCK: &str = "DOCK";
pub const IPOD_USB: &str = "iPOD_USB";
pub const PC: &str = "PC";
pub const NAPSTER: &str = "Napster";
pub const PANDORA: &str = "Pandora";
pub const SIRIUS: &str = "SIRIUS";
pub const RHAPSODY: &str = "Rhapsody";
pub const BLUETOOTH: &str = "Bluetooth";
pub const IPOD: &str = "iPod";
pub const HD_RADIO: &str = "HD_RADIO";

/// Inputs with a browsable `<List_Control>` menu
pub const NAVIGATION_INPUTS: &[&str] = &[
    NET_RADIO, USB, DOCK, IPOD_USB, PC, NAPSTER, PANDORA, SIRIUS, RHAPSODY, IPOD, HD_RADIO,
];

/// Inputs accepting `<Play_Control>` commands
pub const PLAYBACK_INPUTS: &[&str] = &[
    TUNER, NET_RADIO, USB, DOCK, IPOD_USB, PC, NAPSTER, PANDORA, SIRIUS, RHAPSODY, BLUETOOTH,
    IPOD, HD_RADIO,
];

pub fn supports_navigation(input: &str) -> bool {
    NAVIGATION_INPUTS.contains(&input)
}

pub fn supports_playback(input: &str) -> bool {
    PLAYBACK_INPUTS.contains(&input)
}

/// The tuner reports its station name in `Radio_Text_A` instead of `Station`
pub fn is_tuner(input: &str) -> bool {
    input == TUNER
}
