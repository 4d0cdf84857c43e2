//! Menu navigation for inputs with a browsable list
//!
//! Network radio, USB, PC servers and similar inputs share one way of
//! browsing: a hierarchical menu whose entries are transferred in pages of
//! eight. The receiver offers no random access by label, so finding an entry
//! means paging through the list and comparing labels on each loaded page.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use yamaha_api::{input, MenuNavigator, Transport};
//! use xml_client::XmlClient;
//!
//! let transport: Arc<dyn Transport> = Arc::new(XmlClient::new("192.168.1.20"));
//! let mut menu = MenuNavigator::new(input::NET_RADIO, &transport, listener);
//! menu.select_item_full_path("Bookmarks/Favorites/Radio One")?;
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, trace, warn};
use xml_client::Element;

use crate::command::{self, Cursor};
use crate::config::NavigationConfig;
use crate::listener::NavigationListener;
use crate::state::{MenuState, ITEMS_PER_PAGE};
use crate::transport::{Transport, TransportHandle};
use crate::{ApiError, Result};

const MENU_STATUS: &str = "List_Info/Menu_Status";
const MENU_NAME: &str = "List_Info/Menu_Name";
const MENU_LAYER: &str = "List_Info/Menu_Layer";
const CURRENT_LINE: &str = "List_Info/Cursor_Position/Current_Line";
const MAX_LINE: &str = "List_Info/Cursor_Position/Max_Line";

/// Stateful menu client for one input
///
/// The navigator caches the last menu snapshot it received; accessors and
/// [`select_item`](Self::select_item) work on that cache. All operations take
/// `&mut self`, so sharing a navigator between threads requires an external
/// lock. Navigators on the same receiver should share that lock as well,
/// since the receiver processes one request at a time.
pub struct MenuNavigator {
    input: String,
    transport: TransportHandle,
    listener: Arc<dyn NavigationListener>,
    config: NavigationConfig,
    cache: MenuState,
    use_alternate_home: bool,
}

impl std::fmt::Debug for MenuNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuNavigator")
            .field("input", &self.input)
            .field("transport", &self.transport)
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("use_alternate_home", &self.use_alternate_home)
            .finish_non_exhaustive()
    }
}

impl MenuNavigator {
    /// Create a navigator for `input` with the default polling configuration
    pub fn new(
        input: impl Into<String>,
        transport: &Arc<dyn Transport>,
        listener: Arc<dyn NavigationListener>,
    ) -> Self {
        Self::with_config(input, transport, listener, NavigationConfig::default())
    }

    pub fn with_config(
        input: impl Into<String>,
        transport: &Arc<dyn Transport>,
        listener: Arc<dyn NavigationListener>,
        config: NavigationConfig,
    ) -> Self {
        Self {
            input: input.into(),
            transport: TransportHandle::new(transport),
            listener,
            config,
            cache: MenuState::default(),
            use_alternate_home: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The cached snapshot of the last refresh
    pub fn state(&self) -> &MenuState {
        &self.cache
    }

    pub fn menu_name(&self) -> &str {
        &self.cache.name
    }

    /// Menu depth, 0 for the root, -1 if not known yet
    pub fn layer(&self) -> i32 {
        self.cache.layer
    }

    pub fn current_line(&self) -> u32 {
        self.cache.current_line
    }

    /// Number of entries in the current menu across all pages
    pub fn item_count(&self) -> u32 {
        self.cache.max_line
    }

    pub fn current_item_name(&self) -> &str {
        self.cache.current_item_name()
    }

    /// Whether this navigator switched to the alternate return-to-root wording
    pub fn uses_alternate_home_command(&self) -> bool {
        self.use_alternate_home
    }

    /// Reset the cached snapshot to its "not available" values
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn go_back(&mut self) -> Result<()> {
        self.cursor(Cursor::Back)
    }

    pub fn go_up(&mut self) -> Result<()> {
        self.cursor(Cursor::Up)
    }

    pub fn go_down(&mut self) -> Result<()> {
        self.cursor(Cursor::Down)
    }

    /// Not available on every input
    pub fn go_left(&mut self) -> Result<()> {
        self.cursor(Cursor::Left)
    }

    /// Not available on every input
    pub fn go_right(&mut self) -> Result<()> {
        self.cursor(Cursor::Right)
    }

    pub fn select_current_item(&mut self) -> Result<()> {
        self.cursor(Cursor::Select)
    }

    /// Load a page of the current list. `page` is 1-based; 0 is treated as 1.
    pub fn go_to_page(&mut self, page: u32) -> Result<()> {
        let transport = self.transport.get()?;
        self.jump_to_page(transport.as_ref(), page)
    }

    /// Return to the root menu.
    ///
    /// Firmware revisions disagree on the wording of this command. The
    /// navigator starts with "Back to Home"; if the menu is still below the
    /// root afterwards it switches to "Return to Home" for this and every
    /// later call. If that fails too, a navigation error is reported and
    /// `Ok(false)` returned.
    pub fn go_to_root(&mut self) -> Result<bool> {
        let transport = self.transport.get()?;
        self.return_to_root(transport.as_ref())
    }

    /// Query the menu until the receiver reports it ready, then cache and
    /// publish the snapshot.
    pub fn refresh(&mut self) -> Result<()> {
        let transport = self.transport.get()?;
        self.refresh_with(transport.as_ref())
    }

    /// Select the first entry labelled `name` in the current menu.
    ///
    /// Starts on the loaded page, then pages forward and wraps around until
    /// every page has been looked at. Returns `Ok(false)` if no page has the
    /// entry; reporting that is left to the caller.
    pub fn select_item(&mut self, name: &str) -> Result<bool> {
        let transport = self.transport.get()?;
        self.find_and_select(transport.as_ref(), name)
    }

    /// Navigate to an entry given as `Menu/Submenu/Entry`.
    ///
    /// The receiver has no breadcrumb, so the target menu is guessed from
    /// the last two segments: if the current menu is named like the
    /// second-to-last segment and sits at depth `segments - 1`, only the last
    /// entry is selected. Otherwise the navigator returns to the root and
    /// walks the whole path. Unreachable segments are reported through the
    /// listener and end the walk.
    pub fn select_item_full_path(&mut self, path: &str) -> Result<()> {
        let transport = self.transport.get()?;
        let transport = transport.as_ref();
        self.refresh_with(transport)?;

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (item_name, menu_name) = match segments.as_slice() {
            [] => {
                self.report_error(&format!("Empty menu path '{}'", path));
                return Ok(());
            }
            [item] => {
                if !self.find_and_select(transport, item)? {
                    self.report_error(&format!(
                        "Item '{}' doesn't exist in menu {}",
                        item, self.cache.name
                    ));
                }
                return Ok(());
            }
            [.., menu, item] => (*item, *menu),
        };

        let menu_layer = (segments.len() - 1) as i32;
        if self.cache.name == menu_name && self.cache.layer == menu_layer {
            if !self.find_and_select(transport, item_name)? {
                self.report_missing(item_name);
            }
            return Ok(());
        }

        if self.cache.layer > 0 && !self.return_to_root(transport)? {
            return Ok(());
        }

        for segment in segments {
            if !self.find_and_select(transport, segment)? {
                self.report_missing(segment);
                return Ok(());
            }
        }
        Ok(())
    }

    fn cursor(&mut self, cursor: Cursor) -> Result<()> {
        let transport = self.transport.get()?;
        self.send_cursor(transport.as_ref(), cursor)
    }

    fn send_cursor(&mut self, transport: &dyn Transport, cursor: Cursor) -> Result<()> {
        debug!(input = %self.input, cursor = cursor.as_str(), "Sending cursor command");
        transport.send_only(&command::cursor(&self.input, cursor))?;
        self.refresh_with(transport)
    }

    fn jump_to_page(&mut self, transport: &dyn Transport, page: u32) -> Result<()> {
        let line = (page.max(1) - 1)
            .saturating_mul(ITEMS_PER_PAGE as u32)
            .saturating_add(1);
        debug!(input = %self.input, page, line, "Jumping to page");
        transport.send_only(&command::jump_line(&self.input, line))?;
        self.refresh_with(transport)
    }

    fn return_to_root(&mut self, transport: &dyn Transport) -> Result<bool> {
        if !self.use_alternate_home {
            if self.send_home(transport, Cursor::BackToHome)? {
                return Ok(true);
            }
            warn!(
                input = %self.input,
                layer = self.cache.layer,
                "'Back to Home' did not reach the root menu, switching to 'Return to Home'"
            );
            self.use_alternate_home = true;
        }

        if self.send_home(transport, Cursor::ReturnToHome)? {
            return Ok(true);
        }
        self.report_error("Both commands for returning to the root menu failed for this receiver");
        Ok(false)
    }

    /// Send one return-to-root wording and report whether the root was reached.
    /// A wording the firmware rejects counts as not reaching it.
    fn send_home(&mut self, transport: &dyn Transport, cursor: Cursor) -> Result<bool> {
        match self.send_cursor(transport, cursor) {
            Ok(()) => {}
            Err(ApiError::Rejected(code)) => {
                debug!(
                    input = %self.input,
                    cursor = cursor.as_str(),
                    code,
                    "Return-to-root wording rejected"
                );
                self.refresh_with(transport)?;
            }
            Err(e) => return Err(e),
        }
        Ok(self.cache.layer <= 0)
    }

    fn find_and_select(&mut self, transport: &dyn Transport, name: &str) -> Result<bool> {
        let page_count = self.cache.page_count();
        let start_page = self.cache.current_page();
        let mut loaded_page = start_page;

        for offset in 0..page_count {
            let page = (start_page + offset) % page_count;
            if page != loaded_page {
                self.jump_to_page(transport, page + 1)?;
                loaded_page = page;
            }

            if let Some(slot) = self.cache.find_item(name) {
                debug!(input = %self.input, item = name, page, slot, "Selecting item");
                transport.send_only(&command::direct_select(&self.input, slot))?;
                self.refresh_with(transport)?;
                return Ok(true);
            }
        }

        debug!(input = %self.input, item = name, pages = page_count, "Item not found");
        Ok(false)
    }

    fn refresh_with(&mut self, transport: &dyn Transport) -> Result<()> {
        let tree = self.wait_until_ready(transport)?;
        self.cache = parse_menu_state(transport, &tree)?;
        trace!(input = %self.input, state = ?self.cache, "Menu state updated");
        self.listener.navigation_updated(self.cache.clone());
        Ok(())
    }

    fn wait_until_ready(&self, transport: &dyn Transport) -> Result<Element> {
        let body = command::list_info_query(&self.input);
        let interval = self.config.poll_interval();
        let mut waited = Duration::ZERO;

        loop {
            let tree = command::query(transport, &body)?;
            if transport.lookup(&tree, "List_Info").is_none() {
                return Err(ApiError::missing_field("List_Info"));
            }

            match command::text_at(transport, &tree, MENU_STATUS) {
                None => return Ok(tree),
                Some(status) if status == "Ready" => return Ok(tree),
                Some(status) => {
                    waited += interval;
                    if waited > self.config.max_wait() {
                        return Err(ApiError::Timeout {
                            waited_ms: waited.as_millis() as u64,
                        });
                    }
                    trace!(input = %self.input, %status, ?waited, "Menu not ready yet");
                    thread::sleep(interval);
                }
            }
        }
    }

    fn report_missing(&self, item: &str) {
        self.report_error(&format!(
            "Item '{}' doesn't exist in menu {} at level {}. Available options are: {}",
            item,
            self.cache.name,
            self.cache.layer,
            self.cache.item_labels()
        ));
    }

    fn report_error(&self, message: &str) {
        warn!(input = %self.input, "{}", message);
        self.listener.navigation_error(message);
    }
}

/// Build a menu snapshot from a ready `List_Info` response
fn parse_menu_state(transport: &dyn Transport, tree: &Element) -> Result<MenuState> {
    let name = command::required_text(transport, tree, MENU_NAME)?;
    let layer = command::required_int(transport, tree, MENU_LAYER)?;
    let current_line = command::required_int(transport, tree, CURRENT_LINE)?;
    let max_line = command::required_int(transport, tree, MAX_LINE)?;

    let layer = i32::try_from(layer)
        .map_err(|_| ApiError::Protocol(format!("{} out of range: {}", MENU_LAYER, layer)))?
        .saturating_sub(1);
    let max_line = u32::try_from(max_line)
        .map_err(|_| ApiError::Protocol(format!("{} out of range: {}", MAX_LINE, max_line)))?;
    let clamped = if max_line == 0 {
        0
    } else {
        current_line.clamp(1, max_line as i64) as u32
    };
    if i64::from(clamped) != current_line && max_line > 0 {
        debug!(current_line, max_line, clamped, "Current line outside the list");
    }
    let current_line = clamped;

    let mut state = MenuState {
        name,
        layer,
        current_line,
        max_line,
        items: Default::default(),
    };

    let on_page = max_line
        .saturating_sub(state.current_page() * ITEMS_PER_PAGE as u32)
        .min(ITEMS_PER_PAGE as u32) as usize;
    for (slot, item) in state.items.iter_mut().enumerate().take(on_page) {
        let path = format!("List_Info/Current_List/Line_{}/Txt", slot + 1);
        *item = command::text_at(transport, tree, &path).filter(|label| !label.is_empty());
    }

    Ok(state)
}
