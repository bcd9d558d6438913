//! Room content loading.
//!
//! The catalog ships inside the binary as `assets/rooms.json`. Each entry is a
//! room definition plus the hotspots shown for it; loading splits the two so the
//! session only ever sees the definitions.

use serde::Deserialize;

use super::catalog::{CatalogError, Hotspot, HotspotTable, RoomCatalog, RoomDefinition};
use crate::console;

const EMBEDDED_ROOMS: &str = include_str!("../../../assets/rooms.json");

#[derive(Deserialize)]
struct ContentFile {
    rooms: Vec<RoomEntry>,
}

#[derive(Deserialize)]
struct RoomEntry {
    #[serde(flatten)]
    definition: RoomDefinition,
    #[serde(default)]
    hotspots: Vec<Hotspot>,
}

/// Validated room content, ready to start a session with.
pub struct Content {
    pub rooms: RoomCatalog,
    pub hotspots: HotspotTable,
}

/// Load the rooms bundled with the game.
pub fn load() -> Result<Content, CatalogError> {
    parse(EMBEDDED_ROOMS)
}

/// Parse and validate a content document.
pub fn parse(json: &str) -> Result<Content, CatalogError> {
    let file: ContentFile = serde_json::from_str(json)?;

    let (definitions, hotspots): (Vec<_>, Vec<_>) = file
        .rooms
        .into_iter()
        .map(|entry| (entry.definition, entry.hotspots))
        .unzip();

    let rooms = RoomCatalog::new(definitions)?;
    let hotspots = HotspotTable::new(hotspots);
    hotspots.validate_against(&rooms)?;

    let names: Vec<&str> = rooms.iter().map(|r| r.name.as_str()).collect();
    console::info(&format!("escape: loaded {} rooms ({})", rooms.len(), names.join(", ")));

    Ok(Content { rooms, hotspots })
}
