//! Spaceship definitions.

use serde::{Deserialize, Serialize};

use super::{EntityId, Inventory};

/// The closed set of spaceship variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceshipKind {
    /// Player controlled; drills, mines and builds.
    Settler,
    /// Automated; survives explosions by relocating.
    Robot,
    /// Automated thief.
    Ufo,
}

impl SpaceshipKind {
    /// Whether the ship escapes an exploding asteroid instead of being destroyed.
    pub fn survives_explosion(&self) -> bool {
        matches!(self, SpaceshipKind::Robot)
    }

    /// Whether the ship acts on its own when the automata are stepped.
    pub fn is_automated(&self) -> bool {
        matches!(self, SpaceshipKind::Robot | SpaceshipKind::Ufo)
    }
}

impl std::fmt::Display for SpaceshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpaceshipKind::Settler => "settler",
            SpaceshipKind::Robot => "robot",
            SpaceshipKind::Ufo => "ufo",
        };
        f.write_str(name)
    }
}

/// A spaceship residing on an asteroid.
///
/// `asteroid` and the asteroid's resident list always agree; both sides are
/// updated together by the [`Game`](crate::Game).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spaceship {
    pub id: EntityId,
    pub kind: SpaceshipKind,
    pub(crate) asteroid: Option<EntityId>,
    pub(crate) inventory: Inventory,
    /// Built but not yet deployed teleport endpoints.
    pub(crate) carried_teleports: Vec<EntityId>,
}

impl Spaceship {
    pub fn new(id: EntityId, kind: SpaceshipKind, asteroid: EntityId, capacity: usize) -> Self {
        Self {
            id,
            kind,
            asteroid: Some(asteroid),
            inventory: Inventory::new(capacity),
            carried_teleports: Vec::new(),
        }
    }

    pub fn current_asteroid(&self) -> Option<EntityId> {
        self.asteroid
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn carried_teleports(&self) -> &[EntityId] {
        &self.carried_teleports
    }
}
