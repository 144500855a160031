use std::collections::HashMap;

use crate::models::event::Room;
use crate::service::booking_service::BookingApi;

pub const STREET_SUFFIX: &str = "Laguna St";
pub const PLACEHOLDER_LABEL: &str = "Choose a space";
pub const FALLBACK_ROOM: &str = "Hogwarts Hall";
const UNGROUPED_LABEL: &str = "Spaces";

#[derive(Debug, Clone, PartialEq)]
pub struct RoomGroup {
    pub label: String,
    pub rooms: Vec<Room>,
}

/// One selectable entry, flattened out of its group for the terminal
/// select prompt. `help` carries the room description the way the form
/// used a hover tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomOption {
    pub name: String,
    pub label: String,
    pub help: String,
}

impl std::fmt::Display for RoomOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[derive(Debug, Clone)]
pub struct LocationCatalog {
    groups: Vec<RoomGroup>,
    fallback: bool,
}

impl LocationCatalog {
    /// Groups rooms by building in first-seen order, sorts each group's
    /// rooms alphabetically, and labels groups with the fixed street
    /// suffix. Rooms without a building share one plain group.
    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        let mut order: Vec<String> = Vec::new();
        let mut by_building: HashMap<String, Vec<Room>> = HashMap::new();
        for room in rooms {
            if !by_building.contains_key(&room.building) {
                order.push(room.building.clone());
            }
            by_building.entry(room.building.clone()).or_default().push(room);
        }

        let groups = order
            .into_iter()
            .map(|building| {
                let mut rooms = by_building.remove(&building).unwrap_or_default();
                rooms.sort_by(|a, b| a.name.cmp(&b.name));
                let label = if building.is_empty() {
                    UNGROUPED_LABEL.to_string()
                } else {
                    format!("{} {}", building, STREET_SUFFIX)
                };
                RoomGroup { label, rooms }
            })
            .collect();

        Self {
            groups,
            fallback: false,
        }
    }

    /// The single hardcoded room shown when the catalog cannot be loaded,
    /// so the form stays submittable.
    pub fn fallback() -> Self {
        Self {
            groups: vec![RoomGroup {
                label: UNGROUPED_LABEL.to_string(),
                rooms: vec![Room {
                    name: FALLBACK_ROOM.to_string(),
                    building: String::new(),
                    description: String::new(),
                }],
            }],
            fallback: true,
        }
    }

    pub async fn load(api: &dyn BookingApi) -> Self {
        match api.locations().await {
            Ok(rooms) if !rooms.is_empty() => Self::from_rooms(rooms),
            Ok(_) => {
                // An empty catalog would leave nothing to select; keep the
                // form submittable the same way a failed load does.
                eprintln!("Location catalog is empty; using the fallback room");
                Self::fallback()
            }
            Err(err) => {
                eprintln!("Failed to load locations: {}", err);
                Self::fallback()
            }
        }
    }

    pub fn groups(&self) -> &[RoomGroup] {
        &self.groups
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Flattened selectable entries. With `inline_descriptions` the room
    /// description joins the visible label; it is always kept as help text.
    pub fn options(&self, inline_descriptions: bool) -> Vec<RoomOption> {
        self.groups
            .iter()
            .flat_map(|group| {
                group.rooms.iter().map(move |room| {
                    let mut label = room.name.clone();
                    if inline_descriptions && !room.description.is_empty() {
                        label.push_str(&format!(" - {}", room.description));
                    }
                    label.push_str(&format!(" [{}]", group.label));
                    RoomOption {
                        name: room.name.clone(),
                        label,
                        help: room.description.clone(),
                    }
                })
            })
            .collect()
    }
}
