//! Browse a receiver menu from the command line
//!
//! Usage: `cargo run --example browse -- <host> <input> [path]`
//!
//! Without a path the current menu page is printed. With a path such as
//! `Bookmarks/Favorites/Radio One` the entry is selected and the playback
//! information of the input is printed afterwards.

use std::sync::Arc;

use xml_client::XmlClient;
use yamaha_api::logging::init_logging_from_env;
use yamaha_api::{
    MenuNavigator, MenuState, NavigationListener, PlaybackController, PlaybackListener,
    PlaybackState, PresetState, Transport,
};

struct Printer;

impl NavigationListener for Printer {
    fn navigation_updated(&self, state: MenuState) {
        println!(
            "[{}] {} (line {}/{})",
            state.layer, state.name, state.current_line, state.max_line
        );
        for (slot, item) in state.items.iter().enumerate() {
            if let Some(label) = item {
                println!("  {}. {}", slot + 1, label);
            }
        }
    }

    fn navigation_error(&self, message: &str) {
        eprintln!("navigation error: {}", message);
    }
}

impl PlaybackListener for Printer {
    fn play_info_updated(&self, state: PlaybackState) {
        println!(
            "{}: {} - {} - {} ({})",
            state.playback_mode.as_str(),
            state.station,
            state.artist,
            state.song,
            state.album
        );
    }

    fn play_control_updated(&self, state: PresetState) {
        println!("preset: {}", state.preset_channel);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_from_env()?;

    let mut args = std::env::args().skip(1);
    let (Some(host), Some(input)) = (args.next(), args.next()) else {
        eprintln!("usage: browse <host> <input> [path]");
        std::process::exit(2);
    };

    let transport: Arc<dyn Transport> = Arc::new(XmlClient::new(&host));
    let printer = Arc::new(Printer);
    let mut menu = MenuNavigator::new(input.as_str(), &transport, printer.clone());

    match args.next() {
        None => menu.refresh()?,
        Some(path) => {
            menu.select_item_full_path(&path)?;
            PlaybackController::new(input.as_str(), &transport)
                .with_listener(printer)
                .update_playback_information()?;
        }
    }

    Ok(())
}
