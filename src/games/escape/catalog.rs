//! Escape room static data: rooms, items, clues, hotspots. No logic beyond
//! authoring checks.
//!
//! Everything here is built once at start-up and never mutated afterwards.

use serde::Deserialize;
use thiserror::Error;

use super::actions::MAX_HOTSPOTS;

// ── Items & clues ─────────────────────────────────────────────

/// Something the player can pick up. `id` is unique within one room.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// A piece of information found in a room. Distinct by `id`, not by text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Clue {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub found: bool,
}

// ── Rooms ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RoomDefinition {
    /// 0-based position in the catalog.
    pub id: usize,
    pub name: String,
    pub description: String,
    /// Countdown for this room, in seconds.
    pub time_limit: u32,
    /// Item ids that must be in the inventory before the code prompt opens.
    pub required_items: Vec<String>,
    /// Unlock code, compared case-insensitively.
    pub code: String,
}

impl RoomDefinition {
    /// Case-insensitive exact comparison against the unlock code.
    pub fn code_matches(&self, input: &str) -> bool {
        input.to_uppercase() == self.code.to_uppercase()
    }
}

/// Authoring mistakes caught while loading room content.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("room catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("room catalog has no rooms")]
    Empty,

    #[error("room at position {position} has id {id}")]
    IdOutOfOrder { position: usize, id: usize },

    #[error("room {room} has a zero time limit")]
    ZeroTimeLimit { room: usize },

    #[error("room {room} has an empty unlock code")]
    EmptyCode { room: usize },

    #[error("room {room} lists required item '{item}' more than once")]
    DuplicateRequirement { room: usize, item: String },

    #[error("room {room} has two hotspots giving item '{item}'")]
    DuplicateItem { room: usize, item: String },

    #[error("room {room} has two hotspots revealing clue '{clue}'")]
    DuplicateClue { room: usize, clue: String },

    #[error("room {room} requires '{item}' but no hotspot gives it")]
    UnobtainableItem { room: usize, item: String },

    #[error("room {room} has {count} hotspots, at most {max} are reachable")]
    TooManyHotspots { room: usize, count: usize, max: usize },

    #[error("hotspot table covers {hotspot_rooms} rooms, catalog has {rooms}")]
    HotspotRoomCount { rooms: usize, hotspot_rooms: usize },
}

/// Ordered, non-empty list of rooms. Room `i` has `id == i`.
#[derive(Clone, Debug)]
pub struct RoomCatalog {
    rooms: Vec<RoomDefinition>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<RoomDefinition>) -> Result<Self, CatalogError> {
        if rooms.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (position, room) in rooms.iter().enumerate() {
            if room.id != position {
                return Err(CatalogError::IdOutOfOrder { position, id: room.id });
            }
            if room.time_limit == 0 {
                return Err(CatalogError::ZeroTimeLimit { room: position });
            }
            if room.code.is_empty() {
                return Err(CatalogError::EmptyCode { room: position });
            }
            for (i, item) in room.required_items.iter().enumerate() {
                if room.required_items[..i].contains(item) {
                    return Err(CatalogError::DuplicateRequirement {
                        room: position,
                        item: item.clone(),
                    });
                }
            }
        }
        Ok(Self { rooms })
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn get(&self, index: usize) -> Option<&RoomDefinition> {
        self.rooms.get(index)
    }

    /// The first room. Always present.
    pub fn first(&self) -> &RoomDefinition {
        &self.rooms[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomDefinition> {
        self.rooms.iter()
    }
}

impl std::ops::Index<usize> for RoomCatalog {
    type Output = RoomDefinition;

    fn index(&self, index: usize) -> &RoomDefinition {
        &self.rooms[index]
    }
}

// ── Hotspots ──────────────────────────────────────────────────

/// What activating a hotspot does.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HotspotAction {
    Collect { item: Item },
    Discover { clue: Clue },
}

/// A clickable spot in a room.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Hotspot {
    pub label: String,
    pub action: HotspotAction,
}

/// Room index → hotspots. Presentation data; the session never reads it.
#[derive(Clone, Debug, Default)]
pub struct HotspotTable {
    rooms: Vec<Vec<Hotspot>>,
}

impl HotspotTable {
    pub fn new(rooms: Vec<Vec<Hotspot>>) -> Self {
        Self { rooms }
    }

    /// Hotspots of a room; empty for an unknown index.
    pub fn for_room(&self, room: usize) -> &[Hotspot] {
        self.rooms.get(room).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Check the table against the catalog it will be shown with.
    pub fn validate_against(&self, catalog: &RoomCatalog) -> Result<(), CatalogError> {
        if self.rooms.len() != catalog.len() {
            return Err(CatalogError::HotspotRoomCount {
                rooms: catalog.len(),
                hotspot_rooms: self.rooms.len(),
            });
        }

        for (room, hotspots) in self.rooms.iter().enumerate() {
            if hotspots.len() > MAX_HOTSPOTS as usize {
                return Err(CatalogError::TooManyHotspots {
                    room,
                    count: hotspots.len(),
                    max: MAX_HOTSPOTS as usize,
                });
            }

            let mut item_ids: Vec<&str> = Vec::new();
            let mut clue_ids: Vec<&str> = Vec::new();
            for spot in hotspots {
                match &spot.action {
                    HotspotAction::Collect { item } => {
                        if item_ids.contains(&item.id.as_str()) {
                            return Err(CatalogError::DuplicateItem {
                                room,
                                item: item.id.clone(),
                            });
                        }
                        item_ids.push(&item.id);
                    }
                    HotspotAction::Discover { clue } => {
                        if clue_ids.contains(&clue.id.as_str()) {
                            return Err(CatalogError::DuplicateClue {
                                room,
                                clue: clue.id.clone(),
                            });
                        }
                        clue_ids.push(&clue.id);
                    }
                }
            }

            if let Some(missing) = catalog[room]
                .required_items
                .iter()
                .find(|id| !item_ids.contains(&id.as_str()))
            {
                return Err(CatalogError::UnobtainableItem {
                    room,
                    item: missing.clone(),
                });
            }
        }
        Ok(())
    }
}
