//! Entity definitions for the simulation field.

mod celestial;
mod components;
mod location;
mod spaceship;
mod teleport;

pub use celestial::*;
pub use components::*;
pub use location::*;
pub use spaceship::*;
pub use teleport::*;

use serde::{Deserialize, Serialize};

use crate::mechanics::Material;

/// Unique identifier for all entities in the game.
///
/// Issued by the [`Game`](crate::Game) registry in strictly increasing order
/// and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Types of entities in the game world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Location,
    Asteroid,
    Sun,
    Spaceship,
    Material,
    Teleport,
}

/// Anything the registry can hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Location(Location),
    Body(CelestialBody),
    Spaceship(Spaceship),
    Material(Material),
    Teleport(Teleport),
}

impl Entity {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Entity::Location(_) => EntityType::Location,
            Entity::Body(CelestialBody::Asteroid(_)) => EntityType::Asteroid,
            Entity::Body(CelestialBody::Sun(_)) => EntityType::Sun,
            Entity::Spaceship(_) => EntityType::Spaceship,
            Entity::Material(_) => EntityType::Material,
            Entity::Teleport(_) => EntityType::Teleport,
        }
    }
}

impl From<Location> for Entity {
    fn from(location: Location) -> Self {
        Entity::Location(location)
    }
}

impl From<CelestialBody> for Entity {
    fn from(body: CelestialBody) -> Self {
        Entity::Body(body)
    }
}

impl From<Spaceship> for Entity {
    fn from(ship: Spaceship) -> Self {
        Entity::Spaceship(ship)
    }
}

impl From<Material> for Entity {
    fn from(material: Material) -> Self {
        Entity::Material(material)
    }
}

impl From<Teleport> for Entity {
    fn from(teleport: Teleport) -> Self {
        Entity::Teleport(teleport)
    }
}
