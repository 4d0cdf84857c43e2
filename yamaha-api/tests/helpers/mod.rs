//! In-memory receiver used by the integration tests
//!
//! `FakeReceiver` implements `Transport` and simulates one input of a
//! receiver: a menu tree paged in groups of eight, the cursor commands,
//! busy periods after commands, and the firmware-specific wording of the
//! return-to-root command. Every body sent is recorded for assertions.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use yamaha_api::{
    ApiError, MenuState, NavigationConfig, NavigationListener, PlaybackListener, PlaybackState,
    PresetState, Result, Transport,
};

/// A menu entry, optionally leading to a submenu
#[derive(Debug, Clone)]
pub struct Entry {
    pub label: String,
    pub submenu: Option<Menu>,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub name: String,
    pub entries: Vec<Entry>,
}

impl Menu {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Add leaf entries
    pub fn items(mut self, labels: &[&str]) -> Self {
        self.entries.extend(labels.iter().map(|label| Entry {
            label: label.to_string(),
            submenu: None,
        }));
        self
    }

    /// Add `count` leaf entries named `{prefix} {n}`, starting at 1
    pub fn numbered(mut self, prefix: &str, count: usize) -> Self {
        self.entries.extend((1..=count).map(|n| Entry {
            label: format!("{} {}", prefix, n),
            submenu: None,
        }));
        self
    }

    /// Add an entry leading to `submenu`, labelled with the submenu's name
    pub fn submenu(mut self, submenu: Menu) -> Self {
        self.entries.push(Entry {
            label: submenu.name.clone(),
            submenu: Some(submenu),
        });
        self
    }
}

/// Which return-to-root wording the simulated firmware understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Firmware {
    BackToHome,
    ReturnToHome,
    Neither,
}

struct Inner {
    root: Menu,
    /// Indices of the entries entered from the root
    path: Vec<usize>,
    /// Cursor line per level, the last one belongs to the current menu
    lines: Vec<u32>,
    busy_after_command: usize,
    pending_busy: usize,
    always_busy: bool,
    selected: Option<String>,
    preset: Option<String>,
    play_info: String,
    sent: Vec<String>,
}

pub struct FakeReceiver {
    input: String,
    firmware: Firmware,
    /// Return code for return-to-root wordings the firmware does not know
    reject_unknown_home: Option<u16>,
    inner: Mutex<Inner>,
}

impl FakeReceiver {
    pub fn new(input: &str, root: Menu) -> Self {
        Self {
            input: input.to_string(),
            firmware: Firmware::BackToHome,
            reject_unknown_home: None,
            inner: Mutex::new(Inner {
                root,
                path: Vec::new(),
                lines: vec![1],
                busy_after_command: 0,
                pending_busy: 0,
                always_busy: false,
                selected: None,
                preset: None,
                play_info: String::new(),
                sent: Vec::new(),
            }),
        }
    }

    pub fn firmware(mut self, firmware: Firmware) -> Self {
        self.firmware = firmware;
        self
    }

    /// Answer unknown return-to-root wordings with a non-zero return code
    /// instead of ignoring them
    pub fn rejects_unknown_home(mut self, code: u16) -> Self {
        self.reject_unknown_home = Some(code);
        self
    }

    /// Report "Busy" for this many status queries after every command
    pub fn busy_after_command(self, polls: usize) -> Self {
        self.inner.lock().unwrap().busy_after_command = polls;
        self
    }

    /// Never report the menu as ready
    pub fn always_busy(self) -> Self {
        self.inner.lock().unwrap().always_busy = true;
        self
    }

    /// Raw `<Play_Info>` content returned for playback queries
    pub fn play_info(self, xml: &str) -> Self {
        self.inner.lock().unwrap().play_info = xml.to_string();
        self
    }

    pub fn preset(self, preset: Option<&str>) -> Self {
        self.inner.lock().unwrap().preset = preset.map(str::to_string);
        self
    }

    /// Place the cursor by walking `labels` from the root and then jumping to `line`
    pub fn start_at(self, labels: &[&str], line: u32) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            for label in labels {
                let index = inner
                    .current()
                    .entries
                    .iter()
                    .position(|e| e.label == *label)
                    .expect("start_at path must exist");
                inner.path.push(index);
                inner.lines.push(1);
            }
            *inner.lines.last_mut().unwrap() = line;
        }
        self
    }

    pub fn into_transport(self: Arc<Self>) -> Arc<dyn Transport> {
        self
    }

    pub fn sent(&self) -> Vec<String> {
        self.inner.lock().unwrap().sent.clone()
    }

    pub fn clear_sent(&self) {
        self.inner.lock().unwrap().sent.clear();
    }

    /// Bodies sent containing `needle`
    pub fn count(&self, needle: &str) -> usize {
        self.sent().iter().filter(|body| body.contains(needle)).count()
    }

    /// Lines requested with `<Jump_Line>`, in order
    pub fn jumps(&self) -> Vec<u32> {
        self.sent()
            .iter()
            .filter_map(|body| between(body, "<Jump_Line>", "</Jump_Line>"))
            .filter_map(|line| line.parse().ok())
            .collect()
    }

    /// Label of the last leaf entry selected
    pub fn selected(&self) -> Option<String> {
        self.inner.lock().unwrap().selected.clone()
    }

    pub fn menu_name(&self) -> String {
        self.inner.lock().unwrap().current().name.clone()
    }

    pub fn depth(&self) -> usize {
        self.inner.lock().unwrap().path.len()
    }

    fn unwrap_input<'a>(&self, body: &'a str) -> Result<&'a str> {
        body.strip_prefix(&format!("<{}>", self.input))
            .and_then(|rest| rest.strip_suffix(&format!("</{}>", self.input)))
            .ok_or_else(|| {
                ApiError::Transport(format!("body not scoped to {}: {}", self.input, body))
            })
    }
}

impl Inner {
    fn current(&self) -> &Menu {
        self.path.iter().fold(&self.root, |menu, &index| {
            menu.entries[index]
                .submenu
                .as_ref()
                .expect("path only enters submenus")
        })
    }

    fn line(&self) -> u32 {
        *self.lines.last().unwrap()
    }

    fn set_line(&mut self, line: u32) {
        let max = self.current().entries.len() as u32;
        *self.lines.last_mut().unwrap() = line.clamp(1.min(max), max);
    }

    fn enter_current(&mut self) {
        let line = self.line();
        if line == 0 {
            return;
        }
        let index = line as usize - 1;
        let entry = self.current().entries[index].clone();
        match entry.submenu {
            Some(_) => {
                self.path.push(index);
                self.lines.push(1);
            }
            None => self.selected = Some(entry.label),
        }
    }

    fn go_home(&mut self) {
        self.path.clear();
        self.lines.truncate(1);
        self.lines[0] = 1;
    }

    fn list_info(&mut self) -> String {
        let status = if self.always_busy || self.pending_busy > 0 {
            self.pending_busy = self.pending_busy.saturating_sub(1);
            "Busy"
        } else {
            "Ready"
        };

        let menu = self.current();
        let line = self.line();
        let page_start = (line.saturating_sub(1) / 8 * 8) as usize;
        let lines: String = (0..8)
            .map(|slot| {
                let label = menu
                    .entries
                    .get(page_start + slot)
                    .map(|e| e.label.as_str())
                    .unwrap_or("");
                format!("<Line_{n}><Txt>{label}</Txt></Line_{n}>", n = slot + 1, label = label)
            })
            .collect();

        format!(
            "<List_Info><Menu_Status>{status}</Menu_Status><Menu_Layer>{layer}</Menu_Layer>\
             <Menu_Name>{name}</Menu_Name><Current_List>{lines}</Current_List>\
             <Cursor_Position><Current_Line>{line}</Current_Line><Max_Line>{max}</Max_Line>\
             </Cursor_Position></List_Info>",
            status = status,
            layer = self.path.len() + 1,
            name = menu.name,
            lines = lines,
            line = line,
            max = menu.entries.len()
        )
    }
}

impl Transport for FakeReceiver {
    fn send(&self, body: &str) -> Result<String> {
        let mut inner = self.inner.lock().unwrap();
        inner.sent.push(body.to_string());
        let query = self.unwrap_input(body)?;

        let content = match query {
            "<List_Info>GetParam</List_Info>" => inner.list_info(),
            "<Play_Info>GetParam</Play_Info>" => {
                format!("<Play_Info>{}</Play_Info>", inner.play_info)
            }
            "<Play_Control>GetParam</Play_Control>" => match &inner.preset {
                Some(preset) => format!(
                    "<Play_Control><Preset><Preset_Sel>{}</Preset_Sel></Preset></Play_Control>",
                    preset
                ),
                None => "<Play_Control><Playback>Stop</Playback></Play_Control>".to_string(),
            },
            other => return Err(ApiError::Transport(format!("unexpected query {}", other))),
        };

        Ok(format!(
            "<YAMAHA_AV rsp=\"GET\" RC=\"0\"><{input}>{content}</{input}></YAMAHA_AV>",
            input = self.input,
            content = content
        ))
    }

    fn send_only(&self, body: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.sent.push(body.to_string());
        let command = self.unwrap_input(body)?;
        inner.pending_busy = inner.busy_after_command;

        if let Some(cursor) = between(command, "<Cursor>", "</Cursor>") {
            let line = inner.line();
            match cursor {
                "Up" => inner.set_line(line.saturating_sub(1).max(1)),
                "Down" => inner.set_line(line + 1),
                "Select" => inner.enter_current(),
                "Back" => {
                    if inner.path.pop().is_some() {
                        inner.lines.pop();
                    }
                }
                "Back to Home" if self.firmware == Firmware::BackToHome => inner.go_home(),
                "Return to Home" if self.firmware == Firmware::ReturnToHome => inner.go_home(),
                "Back to Home" | "Return to Home" => {
                    if let Some(code) = self.reject_unknown_home {
                        inner.pending_busy = 0;
                        return Err(ApiError::Rejected(code));
                    }
                }
                _ => {}
            }
        } else if let Some(line) = between(command, "<Jump_Line>", "</Jump_Line>") {
            let line: i64 = line.parse().map_err(|_| ApiError::Transport("bad line".to_string()))?;
            inner.set_line(line.max(1) as u32);
        } else if let Some(slot) = between(command, "<Direct_Sel>Line_", "</Direct_Sel>") {
            let slot: u32 = slot.parse().map_err(|_| ApiError::Transport("bad slot".to_string()))?;
            let page_start = inner.line().saturating_sub(1) / 8 * 8;
            inner.set_line(page_start + slot);
            inner.enter_current();
        } else if let Some(preset) = between(command, "<Preset_Sel>", "</Preset_Sel>") {
            inner.preset = Some(preset.to_string());
        }
        Ok(())
    }
}

/// Text between the first `start` and the following `end`
pub fn between<'a>(haystack: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = haystack.find(start)? + start.len();
    let to = haystack[from..].find(end)? + from;
    Some(&haystack[from..to])
}

#[derive(Default)]
pub struct NavigationRecorder {
    pub updates: Mutex<Vec<MenuState>>,
    pub errors: Mutex<Vec<String>>,
    /// Interleaved log of "update" / "error" callbacks
    pub order: Mutex<Vec<&'static str>>,
}

impl NavigationRecorder {
    pub fn updates(&self) -> Vec<MenuState> {
        self.updates.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn last_update(&self) -> Option<MenuState> {
        self.updates.lock().unwrap().last().cloned()
    }
}

impl NavigationListener for NavigationRecorder {
    fn navigation_updated(&self, state: MenuState) {
        self.updates.lock().unwrap().push(state);
        self.order.lock().unwrap().push("update");
    }

    fn navigation_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
        self.order.lock().unwrap().push("error");
    }
}

#[derive(Default)]
pub struct PlaybackRecorder {
    pub play_info: Mutex<Vec<PlaybackState>>,
    pub presets: Mutex<Vec<PresetState>>,
}

impl PlaybackListener for PlaybackRecorder {
    fn play_info_updated(&self, state: PlaybackState) {
        self.play_info.lock().unwrap().push(state);
    }

    fn play_control_updated(&self, state: PresetState) {
        self.presets.lock().unwrap().push(state);
    }
}

/// Polling settings that keep the tests fast
pub fn fast_polling() -> NavigationConfig {
    NavigationConfig {
        poll_interval_ms: 1,
        max_wait_ms: 20,
    }
}

/// A network radio menu tree with a multi-page bookmark list
///
/// ```text
/// NET RADIO (root)
/// ├── Bookmarks
/// │   ├── Favorites: Radio 1 .. Radio 10
/// │   └── News
/// ├── Locations: Place 1 .. Place 20
/// └── Genres: Jazz, Rock, Pop
/// ```
pub fn radio_menu() -> Menu {
    Menu::new("NET RADIO")
        .submenu(
            Menu::new("Bookmarks")
                .submenu(Menu::new("Favorites").numbered("Radio", 10))
                .items(&["News"]),
        )
        .submenu(Menu::new("Locations").numbered("Place", 20))
        .submenu(Menu::new("Genres").items(&["Jazz", "Rock", "Pop"]))
}
