//! Menu navigation and playback control for Yamaha AV receivers
//!
//! The receiver exposes an XML protocol over HTTP. Commands are scoped to an
//! input (network radio, USB, tuner, ...) and fall into two groups:
//!
//! - `<List_Control>` / `<List_Info>`: browsing the input's menu, handled by
//!   [`MenuNavigator`]
//! - `<Play_Control>` / `<Play_Info>`: transport commands, presets and now
//!   playing information, handled by [`PlaybackController`]
//!
//! Both controllers talk to the receiver through a [`Transport`], normally an
//! [`xml_client::XmlClient`], and publish snapshots through listener traits.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use yamaha_api::{input, PlaybackController, Transport};
//! use xml_client::XmlClient;
//!
//! let transport: Arc<dyn Transport> = Arc::new(XmlClient::new("192.168.1.20"));
//! let playback = PlaybackController::new(input::USB, &transport).with_listener(listener);
//! playback.play()?;
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod listener;
pub mod logging;
pub mod navigation;
pub mod playback;
pub mod state;
pub mod transport;

pub use config::NavigationConfig;
pub use error::{ApiError, Result};
pub use listener::{NavigationListener, PlaybackListener};
pub use navigation::MenuNavigator;
pub use playback::PlaybackController;
pub use state::{MenuState, PlaybackMode, PlaybackState, PresetState, ITEMS_PER_PAGE, NOT_AVAILABLE};
pub use transport::Transport;
