//! Read-only views of the game for presentation layers.

use serde::{Deserialize, Serialize};

use super::Game;
use crate::entities::{CelestialBody, EntityId, Location, Spaceship, SpaceshipKind};
use crate::mechanics::MaterialKind;

/// A celestial body as seen from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BodyView {
    Asteroid {
        id: EntityId,
        surface_thickness: u32,
        substance: Option<MaterialKind>,
        residents: Vec<EntityId>,
        stored: Vec<MaterialKind>,
        has_base: bool,
    },
    Sun {
        id: EntityId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationView {
    pub id: EntityId,
    pub coordinates: (f64, f64),
    pub neighbors: Vec<EntityId>,
    pub body: Option<BodyView>,
    pub teleport: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceshipView {
    pub id: EntityId,
    pub kind: SpaceshipKind,
    pub asteroid: Option<EntityId>,
    pub inventory: Vec<MaterialKind>,
    pub carried_teleports: Vec<EntityId>,
}

/// Everything a front end needs to draw the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub locations: Vec<LocationView>,
    pub spaceships: Vec<SpaceshipView>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Game {
    /// Capture the current state of the field.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            locations: self.locations().map(|l| self.location_view(l)).collect(),
            spaceships: self.settlers().map(spaceship_view).collect(),
        }
    }

    fn location_view(&self, location: &Location) -> LocationView {
        let body = location
            .celestial_body()
            .and_then(|id| self.celestial_body(id).ok())
            .map(|body| match body {
                CelestialBody::Asteroid(asteroid) => BodyView::Asteroid {
                    id: asteroid.id,
                    surface_thickness: asteroid.surface_thickness(),
                    substance: asteroid.substance().map(|m| m.kind),
                    residents: asteroid.residents().to_vec(),
                    stored: asteroid.inventory().items().iter().map(|m| m.kind).collect(),
                    has_base: asteroid.has_base(),
                },
                CelestialBody::Sun(sun) => BodyView::Sun { id: sun.id },
            });

        LocationView {
            id: location.id,
            coordinates: location.coordinates,
            neighbors: location.neighbors().collect(),
            body,
            teleport: location.teleport(),
        }
    }
}

fn spaceship_view(ship: &Spaceship) -> SpaceshipView {
    SpaceshipView {
        id: ship.id,
        kind: ship.kind,
        asteroid: ship.current_asteroid(),
        inventory: ship.inventory().items().iter().map(|m| m.kind).collect(),
        carried_teleports: ship.carried_teleports().to_vec(),
    }
}
