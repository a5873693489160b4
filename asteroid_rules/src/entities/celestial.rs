//! Celestial bodies: asteroids and suns.

use serde::{Deserialize, Serialize};

use super::{EntityId, Inventory};
use crate::error::{GameError, GameResult};
use crate::mechanics::{HeatReaction, Material};

/// Anything that can occupy a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CelestialBody {
    Asteroid(Asteroid),
    Sun(Sun),
}

impl CelestialBody {
    pub fn id(&self) -> EntityId {
        match self {
            CelestialBody::Asteroid(asteroid) => asteroid.id,
            CelestialBody::Sun(sun) => sun.id,
        }
    }

    /// The hosting location; `None` once the body has been destroyed.
    pub fn location(&self) -> Option<EntityId> {
        match self {
            CelestialBody::Asteroid(asteroid) => asteroid.location,
            CelestialBody::Sun(sun) => sun.location,
        }
    }

    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match self {
            CelestialBody::Asteroid(asteroid) => Some(asteroid),
            CelestialBody::Sun(_) => None,
        }
    }
}

/// A sun. Purely positional; its flares heat the asteroids around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sun {
    pub id: EntityId,
    pub(crate) location: Option<EntityId>,
}

impl Sun {
    pub fn new(id: EntityId, location: EntityId) -> Self {
        Self {
            id,
            location: Some(location),
        }
    }
}

/// What an extreme heat event did to an asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatResponse {
    Unaffected,
    /// The waterice deposit evaporated.
    Sublimated,
    /// The uranium deposit absorbed the heat but holds, for now.
    Critical { exposures: u32 },
    /// The uranium deposit went over the threshold; the asteroid must explode.
    Detonate,
}

/// A minable asteroid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: EntityId,
    pub(crate) location: Option<EntityId>,
    surface_thickness: u32,
    substance: Option<Material>,
    pub(crate) residents: Vec<EntityId>,
    pub(crate) inventory: Inventory,
    heat_exposures: u32,
    pub(crate) has_base: bool,
}

impl Asteroid {
    pub fn new(
        id: EntityId,
        location: EntityId,
        surface_thickness: u32,
        substance: Option<Material>,
        capacity: usize,
    ) -> Self {
        Self {
            id,
            location: Some(location),
            surface_thickness,
            substance,
            residents: Vec::new(),
            inventory: Inventory::new(capacity),
            heat_exposures: 0,
            has_base: false,
        }
    }

    pub fn location(&self) -> Option<EntityId> {
        self.location
    }

    /// False once the asteroid has exploded.
    pub fn is_attached(&self) -> bool {
        self.location.is_some()
    }

    pub fn surface_thickness(&self) -> u32 {
        self.surface_thickness
    }

    pub fn is_drilled(&self) -> bool {
        self.surface_thickness == 0
    }

    pub fn substance(&self) -> Option<&Material> {
        self.substance.as_ref()
    }

    /// Spaceships on the asteroid, in arrival order.
    pub fn residents(&self) -> &[EntityId] {
        &self.residents
    }

    /// Stored cargo.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn has_base(&self) -> bool {
        self.has_base
    }

    /// Heat events absorbed by a uranium deposit so far.
    pub fn heat_exposures(&self) -> u32 {
        self.heat_exposures
    }

    /// Drill one layer of the surface.
    pub fn drill(&mut self) -> GameResult<u32> {
        if self.surface_thickness == 0 {
            return Err(GameError::SurfaceThicknessIsZero);
        }
        self.surface_thickness -= 1;
        Ok(self.surface_thickness)
    }

    /// Fail unless the deposit can be extracted right now.
    pub fn ensure_mineable(&self) -> GameResult<()> {
        if !self.is_drilled() {
            return Err(GameError::AsteroidIsNotMineable);
        }
        if self.substance.is_none() {
            return Err(GameError::AsteroidAlreadyMined);
        }
        Ok(())
    }

    /// Extract the deposit. The asteroid is hollow afterwards.
    pub fn mine(&mut self) -> GameResult<Material> {
        self.ensure_mineable()?;
        self.substance.take().ok_or(GameError::AsteroidAlreadyMined)
    }

    /// Fail unless cargo can be stored: surface cleared, deposit gone, room left.
    pub fn ensure_storable(&self) -> GameResult<()> {
        if !self.is_drilled() || self.substance.is_some() {
            return Err(GameError::AsteroidNotMined);
        }
        self.inventory.ensure_room()
    }

    pub fn insert_material(&mut self, material: Material) -> GameResult<()> {
        self.ensure_storable()?;
        self.inventory.insert(material)
    }

    pub fn remove_material(&mut self, material: EntityId) -> GameResult<Material> {
        self.inventory.remove(material)
    }

    pub(crate) fn add_resident(&mut self, ship: EntityId) {
        if !self.residents.contains(&ship) {
            self.residents.push(ship);
        }
    }

    /// Remove a resident. Removing a non-resident is a no-op.
    pub(crate) fn remove_resident(&mut self, ship: EntityId) -> bool {
        match self.residents.iter().position(|s| *s == ship) {
            Some(index) => {
                self.residents.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_residents(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.residents)
    }

    pub(crate) fn detach(&mut self) -> Option<EntityId> {
        self.location.take()
    }

    /// React to extreme heat according to the deposit.
    ///
    /// Only the asteroid's own state changes here; an explosion is reported
    /// back as [`HeatResponse::Detonate`] for the game to carry out.
    pub fn experience_extreme_heat(&mut self, uranium_threshold: u32) -> HeatResponse {
        let Some(substance) = self.substance else {
            return HeatResponse::Unaffected;
        };

        match substance.kind.heat_reaction() {
            HeatReaction::Inert => HeatResponse::Unaffected,
            HeatReaction::Sublimates => {
                self.substance = None;
                HeatResponse::Sublimated
            }
            HeatReaction::Radioactive => {
                self.heat_exposures += 1;
                if self.heat_exposures >= uranium_threshold {
                    HeatResponse::Detonate
                } else {
                    HeatResponse::Critical {
                        exposures: self.heat_exposures,
                    }
                }
            }
        }
    }
}
