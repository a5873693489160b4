//! World state management - the registry holding every entity of a game.

mod actions;
mod hazards;
mod snapshot;

pub use actions::*;
pub use hazards::*;
pub use snapshot::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::SimulationConfig;
use crate::entities::{
    Asteroid, CelestialBody, Entity, EntityId, Location, Spaceship, SpaceshipKind, Sun, Teleport,
};
use crate::error::{GameError, GameResult};
use crate::mechanics::{Material, MaterialKind};

/// The complete state of one simulation.
///
/// Entities live in an arena keyed by [`EntityId`]; cross references between
/// them (location to body, asteroid to residents, teleport to partner) are
/// stored as ids, and every operation that changes one side of a reference
/// updates the other side before returning.
#[derive(Debug, Clone)]
pub struct Game {
    config: SimulationConfig,

    /// All entities by id. Ids are issued in increasing order, so iteration
    /// follows registration order.
    entities: BTreeMap<EntityId, Entity>,

    /// Locations in registration order.
    locations: Vec<EntityId>,

    /// Materials created but not yet placed in a deposit or an inventory.
    loose_materials: BTreeSet<EntityId>,

    next_id: u64,
    rng: StdRng,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Game {
    /// Create an empty game.
    pub fn new(config: SimulationConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            entities: BTreeMap::new(),
            locations: Vec::new(),
            loose_materials: BTreeSet::new(),
            next_id: 0,
            rng,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Empty the field and reseed the random source.
    ///
    /// The id counter keeps running, so ids issued before the reset are never
    /// handed out again.
    pub fn reset(&mut self) {
        self.entities.clear();
        self.locations.clear();
        self.loose_materials.clear();
        self.rng = StdRng::seed_from_u64(self.config.seed);
        tracing::info!(next_id = self.next_id, "game reset");
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, id: EntityId, entity: Entity) {
        if matches!(entity, Entity::Location(_)) {
            self.locations.push(id);
        }
        self.entities.insert(id, entity);
    }

    /// Store an entity under a fresh id and return the id.
    ///
    /// The id is stamped into the entity. A body that names a location takes
    /// that location's body slot, and a spaceship that names an asteroid joins
    /// its residents. Any other reference must be added afterwards through the
    /// graph operations; entities arriving with one are rejected with
    /// `UnmanagedReference`. Registered materials are loose.
    pub fn register_entity(&mut self, entity: impl Into<Entity>) -> GameResult<EntityId> {
        let mut entity = entity.into();
        self.ensure_registrable(&entity)?;

        let id = self.allocate_id();
        match &mut entity {
            Entity::Location(location) => location.id = id,
            Entity::Body(CelestialBody::Asteroid(asteroid)) => asteroid.id = id,
            Entity::Body(CelestialBody::Sun(sun)) => sun.id = id,
            Entity::Spaceship(ship) => ship.id = id,
            Entity::Material(material) => material.id = id,
            Entity::Teleport(teleport) => teleport.id = id,
        }

        let body_location = match &entity {
            Entity::Body(body) => body.location(),
            _ => None,
        };
        let home_asteroid = match &entity {
            Entity::Spaceship(ship) => ship.asteroid,
            _ => None,
        };
        if matches!(entity, Entity::Material(_)) {
            self.loose_materials.insert(id);
        }
        self.insert(id, entity);

        if let Some(location) = body_location {
            self.location_mut(location)?.celestial_body = Some(id);
        }
        if let Some(asteroid) = home_asteroid {
            self.asteroid_mut(asteroid)?.add_resident(id);
        }
        tracing::debug!(%id, "entity registered");
        Ok(id)
    }

    fn ensure_registrable(&self, entity: &Entity) -> GameResult<()> {
        let unmanaged = match entity {
            Entity::Location(location) => location
                .celestial_body
                .or(location.teleport)
                .or_else(|| location.neighbors().next()),
            Entity::Body(CelestialBody::Asteroid(asteroid)) => {
                if let Some(location) = asteroid.location {
                    self.ensure_vacant(location)?;
                }
                asteroid.residents.first().copied()
            }
            Entity::Body(CelestialBody::Sun(sun)) => {
                if let Some(location) = sun.location {
                    self.ensure_vacant(location)?;
                }
                None
            }
            Entity::Spaceship(ship) => {
                if let Some(asteroid) = ship.asteroid {
                    if !self.asteroid(asteroid)?.is_attached() {
                        return Err(GameError::AsteroidDestroyed(asteroid));
                    }
                }
                ship.carried_teleports.first().copied()
            }
            Entity::Teleport(teleport) => teleport.location.or(teleport.partner),
            Entity::Material(_) => None,
        };
        match unmanaged {
            Some(reference) => Err(GameError::UnmanagedReference(reference)),
            None => Ok(()),
        }
    }

    /// Get any entity by id.
    pub fn lookup(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Number of registered entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All locations in registration order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter_map(|id| match self.entities.get(id) {
            Some(Entity::Location(location)) => Some(location),
            _ => None,
        })
    }

    /// All active spaceships in registration order.
    pub fn settlers(&self) -> impl Iterator<Item = &Spaceship> {
        self.entities.values().filter_map(|entity| match entity {
            Entity::Spaceship(ship) => Some(ship),
            _ => None,
        })
    }

    /// Active spaceships of one kind, in registration order.
    pub fn spaceships_of_kind(&self, kind: SpaceshipKind) -> impl Iterator<Item = &Spaceship> {
        self.settlers().filter(move |ship| ship.kind == kind)
    }

    pub fn location(&self, id: EntityId) -> GameResult<&Location> {
        match self.entities.get(&id) {
            Some(Entity::Location(location)) => Ok(location),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    pub(crate) fn location_mut(&mut self, id: EntityId) -> GameResult<&mut Location> {
        match self.entities.get_mut(&id) {
            Some(Entity::Location(location)) => Ok(location),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    pub fn celestial_body(&self, id: EntityId) -> GameResult<&CelestialBody> {
        match self.entities.get(&id) {
            Some(Entity::Body(body)) => Ok(body),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    pub fn asteroid(&self, id: EntityId) -> GameResult<&Asteroid> {
        match self.entities.get(&id) {
            Some(Entity::Body(CelestialBody::Asteroid(asteroid))) => Ok(asteroid),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    pub(crate) fn asteroid_mut(&mut self, id: EntityId) -> GameResult<&mut Asteroid> {
        match self.entities.get_mut(&id) {
            Some(Entity::Body(CelestialBody::Asteroid(asteroid))) => Ok(asteroid),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    pub fn sun(&self, id: EntityId) -> GameResult<&Sun> {
        match self.entities.get(&id) {
            Some(Entity::Body(CelestialBody::Sun(sun))) => Ok(sun),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    pub fn spaceship(&self, id: EntityId) -> GameResult<&Spaceship> {
        match self.entities.get(&id) {
            Some(Entity::Spaceship(ship)) => Ok(ship),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    pub(crate) fn spaceship_mut(&mut self, id: EntityId) -> GameResult<&mut Spaceship> {
        match self.entities.get_mut(&id) {
            Some(Entity::Spaceship(ship)) => Ok(ship),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    pub fn teleport(&self, id: EntityId) -> GameResult<&Teleport> {
        match self.entities.get(&id) {
            Some(Entity::Teleport(teleport)) => Ok(teleport),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    pub(crate) fn teleport_mut(&mut self, id: EntityId) -> GameResult<&mut Teleport> {
        match self.entities.get_mut(&id) {
            Some(Entity::Teleport(teleport)) => Ok(teleport),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    pub fn material(&self, id: EntityId) -> GameResult<&Material> {
        match self.entities.get(&id) {
            Some(Entity::Material(material)) => Ok(material),
            _ => Err(GameError::InvalidReference(id)),
        }
    }

    /// The asteroid hosted by a location.
    pub fn asteroid_at(&self, location: EntityId) -> GameResult<EntityId> {
        let body = self
            .location(location)?
            .celestial_body
            .ok_or(GameError::NoAsteroidAt(location))?;
        match self.celestial_body(body)? {
            CelestialBody::Asteroid(asteroid) => Ok(asteroid.id),
            CelestialBody::Sun(_) => Err(GameError::NoAsteroidAt(location)),
        }
    }

    /// Create an empty, isolated location.
    pub fn create_location(&mut self, x: f64, y: f64) -> EntityId {
        let id = self.allocate_id();
        self.insert(id, Location::new(id, x, y).into());
        tracing::debug!(%id, x, y, "location created");
        id
    }

    /// Connect two locations. Connecting already-neighboring locations is a no-op.
    ///
    /// Returns whether a new edge was added.
    pub fn add_neighbor(&mut self, a: EntityId, b: EntityId) -> GameResult<bool> {
        if a == b {
            return Err(GameError::SelfConnection(a));
        }
        self.location(a)?;
        self.location(b)?;

        let added = self.location_mut(a)?.add_neighbor(b);
        self.location_mut(b)?.add_neighbor(a);
        if added {
            tracing::debug!(%a, %b, "neighbors connected");
        }
        Ok(added)
    }

    /// Pick a neighbor of a location uniformly at random.
    pub fn random_neighbor(&mut self, location: EntityId) -> GameResult<EntityId> {
        let location = match self.entities.get(&location) {
            Some(Entity::Location(location)) => location,
            _ => return Err(GameError::InvalidReference(location)),
        };
        location.random_neighbor(&mut self.rng)
    }

    /// Asteroids on the neighboring locations, in neighbor order.
    pub fn neighboring_asteroids(&self, location: EntityId) -> GameResult<Vec<EntityId>> {
        Ok(self
            .location(location)?
            .neighbors()
            .filter_map(|neighbor| self.asteroid_at(neighbor).ok())
            .collect())
    }

    /// Pick one of the neighboring asteroids uniformly at random.
    pub(crate) fn random_neighboring_asteroid(&mut self, location: EntityId) -> Option<EntityId> {
        let candidates = self.neighboring_asteroids(location).ok()?;
        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..candidates.len());
        Some(candidates[index])
    }

    /// Create an unlinked, undeployed teleport endpoint.
    pub fn create_teleport(&mut self) -> EntityId {
        let id = self.allocate_id();
        self.insert(id, Teleport::new(id).into());
        tracing::debug!(%id, "teleport created");
        id
    }

    /// Deploy a teleport endpoint on a location.
    pub fn set_teleport(&mut self, location: EntityId, teleport: EntityId) -> GameResult<()> {
        if self.location(location)?.teleport.is_some() {
            return Err(GameError::TeleportSlotOccupied(location));
        }
        if self.teleport(teleport)?.is_deployed() {
            return Err(GameError::TeleportAlreadyDeployed(teleport));
        }

        self.location_mut(location)?.teleport = Some(teleport);
        self.teleport_mut(teleport)?.location = Some(location);
        tracing::debug!(%location, %teleport, "teleport deployed");
        Ok(())
    }

    /// Detach the teleport endpoint deployed on a location, if any.
    ///
    /// The endpoint loses its link too, so its former partner can be linked
    /// again.
    pub fn clear_teleport(&mut self, location: EntityId) -> GameResult<Option<EntityId>> {
        let removed = self.location_mut(location)?.teleport.take();
        if let Some(teleport) = removed {
            let partner = match self.teleport_mut(teleport) {
                Ok(endpoint) => {
                    endpoint.location = None;
                    endpoint.partner.take()
                }
                Err(_) => None,
            };
            if let Some(partner) = partner {
                if let Ok(survivor) = self.teleport_mut(partner) {
                    survivor.partner = None;
                }
            }
            tracing::debug!(%location, %teleport, "teleport cleared");
        }
        Ok(removed)
    }

    /// Pair the endpoints deployed on two locations.
    pub fn link_teleports(&mut self, a: EntityId, b: EntityId) -> GameResult<()> {
        if a == b {
            return Err(GameError::SelfConnection(a));
        }
        let teleport_a = self
            .location(a)?
            .teleport
            .ok_or(GameError::NoTeleportAvailable(a))?;
        let teleport_b = self
            .location(b)?
            .teleport
            .ok_or(GameError::NoTeleportAvailable(b))?;
        for endpoint in [teleport_a, teleport_b] {
            if self.teleport(endpoint)?.is_linked() {
                return Err(GameError::TeleportAlreadyLinked(endpoint));
            }
        }

        self.pair_teleports(teleport_a, teleport_b)?;
        tracing::debug!(%a, %b, "teleports linked");
        Ok(())
    }

    fn pair_teleports(&mut self, a: EntityId, b: EntityId) -> GameResult<()> {
        self.teleport_mut(a)?.partner = Some(b);
        self.teleport_mut(b)?.partner = Some(a);
        Ok(())
    }

    /// The location reached through the teleport deployed on `from`.
    pub fn use_teleport(&self, from: EntityId) -> GameResult<EntityId> {
        let endpoint = self
            .location(from)?
            .teleport
            .ok_or(GameError::NoTeleportAvailable(from))?;
        self.teleport(endpoint)?
            .partner
            .and_then(|partner| self.teleport(partner).ok())
            .and_then(|partner| partner.location)
            .ok_or(GameError::NoTeleportAvailable(from))
    }

    /// Create a loose material, ready to become a deposit or inventory item.
    pub fn create_material(&mut self, kind: MaterialKind) -> EntityId {
        let id = self.allocate_id();
        self.insert(id, Material::new(id, kind).into());
        self.loose_materials.insert(id);
        tracing::debug!(%id, %kind, "material created");
        id
    }

    pub fn is_loose_material(&self, id: EntityId) -> bool {
        self.loose_materials.contains(&id)
    }

    fn ensure_loose_material(&self, id: EntityId) -> GameResult<Material> {
        let material = *self.material(id)?;
        if !self.loose_materials.contains(&id) {
            return Err(GameError::MaterialUnavailable(id));
        }
        Ok(material)
    }

    /// Claim a loose material; it is no longer available for placement.
    pub(crate) fn take_loose_material(&mut self, id: EntityId) -> GameResult<Material> {
        let material = self.ensure_loose_material(id)?;
        self.loose_materials.remove(&id);
        Ok(material)
    }

    fn ensure_vacant(&self, location: EntityId) -> GameResult<()> {
        if self.location(location)?.celestial_body.is_some() {
            return Err(GameError::LocationOccupied(location));
        }
        Ok(())
    }

    /// Put a new asteroid on an empty location.
    ///
    /// `substance` must be a loose material; it becomes the deposit.
    pub fn place_asteroid(
        &mut self,
        location: EntityId,
        surface_thickness: u32,
        substance: Option<EntityId>,
    ) -> GameResult<EntityId> {
        self.ensure_vacant(location)?;
        if let Some(material) = substance {
            self.ensure_loose_material(material)?;
        }

        let substance = match substance {
            Some(material) => Some(self.take_loose_material(material)?),
            None => None,
        };
        let id = self.allocate_id();
        let asteroid = Asteroid::new(
            id,
            location,
            surface_thickness,
            substance,
            self.config.asteroid_capacity,
        );
        self.insert(id, CelestialBody::Asteroid(asteroid).into());
        self.location_mut(location)?.celestial_body = Some(id);
        tracing::info!(%id, %location, surface_thickness, "asteroid placed");
        Ok(id)
    }

    /// Put a new sun on an empty location.
    pub fn place_sun(&mut self, location: EntityId) -> GameResult<EntityId> {
        self.ensure_vacant(location)?;

        let id = self.allocate_id();
        self.insert(id, CelestialBody::Sun(Sun::new(id, location)).into());
        self.location_mut(location)?.celestial_body = Some(id);
        tracing::info!(%id, %location, "sun placed");
        Ok(id)
    }

    /// Create a spaceship resident on an asteroid.
    pub fn spawn_spaceship(&mut self, kind: SpaceshipKind, asteroid: EntityId) -> GameResult<EntityId> {
        if !self.asteroid(asteroid)?.is_attached() {
            return Err(GameError::AsteroidDestroyed(asteroid));
        }

        let capacity = match kind {
            SpaceshipKind::Settler => self.config.settler_capacity,
            SpaceshipKind::Robot => self.config.robot_capacity,
            SpaceshipKind::Ufo => self.config.ufo_capacity,
        };
        let id = self.allocate_id();
        self.insert(id, Spaceship::new(id, kind, asteroid, capacity).into());
        self.asteroid_mut(asteroid)?.add_resident(id);
        tracing::info!(%id, %kind, %asteroid, "spaceship created");
        Ok(id)
    }

    /// Move a ship to another asteroid, keeping both resident lists in sync.
    pub(crate) fn transfer_resident(&mut self, ship: EntityId, to: EntityId) {
        let from = self.spaceship(ship).ok().and_then(|s| s.asteroid);
        if let Some(from) = from {
            if let Ok(asteroid) = self.asteroid_mut(from) {
                asteroid.remove_resident(ship);
            }
        }
        if let Ok(asteroid) = self.asteroid_mut(to) {
            asteroid.add_resident(ship);
        }
        if let Ok(spaceship) = self.spaceship_mut(ship) {
            spaceship.asteroid = Some(to);
        }
    }

    /// Remove a ship from the simulation.
    pub(crate) fn destroy_spaceship(&mut self, ship: EntityId) {
        let from = self.spaceship(ship).ok().and_then(|s| s.asteroid);
        if let Some(from) = from {
            if let Ok(asteroid) = self.asteroid_mut(from) {
                asteroid.remove_resident(ship);
            }
        }
        if self.entities.remove(&ship).is_some() {
            tracing::info!(%ship, "spaceship destroyed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two neighboring locations, each with an asteroid of the given thickness.
    pub(crate) fn two_asteroid_field(game: &mut Game, thickness: u32) -> [EntityId; 4] {
        let loc_a = game.create_location(1.1, 2.2);
        let loc_b = game.create_location(1.6, 2.8);
        game.add_neighbor(loc_a, loc_b).unwrap();
        let ast_a = game.place_asteroid(loc_a, thickness, None).unwrap();
        let ast_b = game.place_asteroid(loc_b, thickness, None).unwrap();
        [loc_a, loc_b, ast_a, ast_b]
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut game = Game::default();
        let loc = game.create_location(0.0, 0.0);
        let material = game.create_material(MaterialKind::Iron);
        let asteroid = game.place_asteroid(loc, 1, Some(material)).unwrap();
        let ship = game.spawn_spaceship(SpaceshipKind::Settler, asteroid).unwrap();
        let teleport = game.create_teleport();

        let ids = [loc, material, asteroid, ship, teleport];
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_ids_survive_reset() {
        let mut game = Game::default();
        let before = game.create_location(0.0, 0.0);
        game.reset();

        assert!(game.lookup(before).is_none());
        let after = game.create_location(0.0, 0.0);
        assert!(after > before);
    }

    #[test]
    fn test_register_entity_stamps_id() {
        let mut game = Game::default();
        game.create_location(0.0, 0.0);

        let id = game.register_entity(Teleport::new(EntityId(999))).unwrap();

        assert_eq!(id, EntityId(1));
        assert_eq!(game.teleport(id).unwrap().id, id);
    }

    #[test]
    fn test_large_configured_capacity_is_usable() {
        let config =
            SimulationConfig::from_toml_str("asteroid_capacity = 1000000000000000000").unwrap();
        let mut game = Game::new(config);
        let location = game.create_location(0.0, 0.0);

        let asteroid = game.place_asteroid(location, 0, None).unwrap();

        assert_eq!(
            game.asteroid(asteroid).unwrap().inventory().capacity(),
            1_000_000_000_000_000_000
        );
    }

    #[test]
    fn test_registered_spaceship_joins_residents() {
        let mut game = Game::default();
        let location = game.create_location(0.0, 0.0);
        let asteroid = game.place_asteroid(location, 2, None).unwrap();

        let ship = game
            .register_entity(Spaceship::new(EntityId(0), SpaceshipKind::Settler, asteroid, 10))
            .unwrap();

        assert_eq!(game.asteroid(asteroid).unwrap().residents(), &[ship]);
        assert_eq!(game.experience_solar_storm(asteroid), Ok(vec![ship]));
        assert!(game.spaceship(ship).is_err());
    }

    #[test]
    fn test_registered_body_takes_location_slot() {
        let mut game = Game::default();
        let location = game.create_location(0.0, 0.0);

        let body = CelestialBody::Asteroid(Asteroid::new(EntityId(0), location, 3, None, 10));
        let asteroid = game.register_entity(body).unwrap();

        assert_eq!(game.asteroid_at(location), Ok(asteroid));
        let sun = CelestialBody::Sun(Sun::new(EntityId(0), location));
        assert_eq!(
            game.register_entity(sun),
            Err(GameError::LocationOccupied(location))
        );
    }

    #[test]
    fn test_register_rejects_unmanaged_references() {
        let mut game = Game::default();
        let mut teleport = Teleport::new(EntityId(0));
        teleport.partner = Some(EntityId(40));
        let count = game.entity_count();

        assert_eq!(
            game.register_entity(teleport),
            Err(GameError::UnmanagedReference(EntityId(40)))
        );
        assert_eq!(
            game.register_entity(Spaceship::new(
                EntityId(0),
                SpaceshipKind::Robot,
                EntityId(41),
                1
            )),
            Err(GameError::InvalidReference(EntityId(41)))
        );
        assert_eq!(game.entity_count(), count);

        let material = game
            .register_entity(Material::new(EntityId(0), MaterialKind::Coal))
            .unwrap();
        assert!(game.is_loose_material(material));
    }

    #[test]
    fn test_lookup_checks_kind() {
        let mut game = Game::default();
        let loc = game.create_location(0.0, 0.0);

        assert!(game.lookup(loc).is_some());
        assert!(game.location(loc).is_ok());
        assert_eq!(game.asteroid(loc).unwrap_err(), GameError::InvalidReference(loc));
        assert_eq!(
            game.location(EntityId(42)).unwrap_err(),
            GameError::InvalidReference(EntityId(42))
        );
    }

    #[test]
    fn test_neighbors_are_symmetric_and_idempotent() {
        let mut game = Game::default();
        let a = game.create_location(0.0, 0.0);
        let b = game.create_location(1.0, 0.0);

        assert_eq!(game.add_neighbor(a, b), Ok(true));
        assert_eq!(game.add_neighbor(b, a), Ok(false));

        assert!(game.location(a).unwrap().is_neighbor(b));
        assert!(game.location(b).unwrap().is_neighbor(a));
        assert_eq!(game.location(a).unwrap().neighbors().count(), 1);
    }

    #[test]
    fn test_self_neighbor_is_rejected() {
        let mut game = Game::default();
        let a = game.create_location(0.0, 0.0);
        assert_eq!(game.add_neighbor(a, a), Err(GameError::SelfConnection(a)));
    }

    #[test]
    fn test_random_neighbor() {
        let mut game = Game::default();
        let a = game.create_location(0.0, 0.0);
        assert_eq!(game.random_neighbor(a), Err(GameError::NoNeighbor(a)));

        let b = game.create_location(1.0, 0.0);
        game.add_neighbor(a, b).unwrap();
        assert_eq!(game.random_neighbor(a), Ok(b));
    }

    #[test]
    fn test_location_holds_one_body() {
        let mut game = Game::default();
        let loc = game.create_location(0.0, 0.0);
        game.place_sun(loc).unwrap();

        assert_eq!(
            game.place_asteroid(loc, 3, None),
            Err(GameError::LocationOccupied(loc))
        );
        assert_eq!(game.asteroid_at(loc), Err(GameError::NoAsteroidAt(loc)));
    }

    #[test]
    fn test_substance_must_be_loose() {
        let mut game = Game::default();
        let loc_a = game.create_location(0.0, 0.0);
        let loc_b = game.create_location(1.0, 0.0);
        let uranium = game.create_material(MaterialKind::Uranium);

        let asteroid = game.place_asteroid(loc_a, 0, Some(uranium)).unwrap();
        assert!(!game.is_loose_material(uranium));
        assert_eq!(
            game.asteroid(asteroid).unwrap().substance().map(|m| m.id),
            Some(uranium)
        );

        assert_eq!(
            game.place_asteroid(loc_b, 0, Some(uranium)),
            Err(GameError::MaterialUnavailable(uranium))
        );
        assert!(game.location(loc_b).unwrap().celestial_body().is_none());
    }

    #[test]
    fn test_spawn_registers_resident() {
        let mut game = Game::default();
        let loc = game.create_location(2.2, 2.5);
        let asteroid = game.place_asteroid(loc, 2, None).unwrap();

        let settler = game.spawn_spaceship(SpaceshipKind::Settler, asteroid).unwrap();
        let robot = game.spawn_spaceship(SpaceshipKind::Robot, asteroid).unwrap();

        assert_eq!(game.asteroid(asteroid).unwrap().residents(), &[settler, robot]);
        assert_eq!(
            game.spaceship(settler).unwrap().current_asteroid(),
            Some(asteroid)
        );

        game.destroy_spaceship(settler);
        assert_eq!(game.asteroid(asteroid).unwrap().residents(), &[robot]);
        assert!(game.spaceship(settler).is_err());
    }

    #[test]
    fn test_settlers_in_registration_order() {
        let mut game = Game::default();
        let [_, _, ast_a, ast_b] = two_asteroid_field(&mut game, 1);
        let first = game.spawn_spaceship(SpaceshipKind::Settler, ast_b).unwrap();
        let second = game.spawn_spaceship(SpaceshipKind::Robot, ast_a).unwrap();
        let third = game.spawn_spaceship(SpaceshipKind::Settler, ast_a).unwrap();

        let ids: Vec<_> = game.settlers().map(|s| s.id).collect();
        assert_eq!(ids, vec![first, second, third]);

        let settlers: Vec<_> = game
            .spaceships_of_kind(SpaceshipKind::Settler)
            .map(|s| s.id)
            .collect();
        assert_eq!(settlers, vec![first, third]);
    }

    #[test]
    fn test_teleport_link_and_use() {
        let mut game = Game::default();
        let a = game.create_location(0.0, 0.0);
        let b = game.create_location(5.0, 5.0);
        let ta = game.create_teleport();
        let tb = game.create_teleport();

        assert_eq!(game.use_teleport(a), Err(GameError::NoTeleportAvailable(a)));

        game.set_teleport(a, ta).unwrap();
        game.set_teleport(b, tb).unwrap();
        assert_eq!(game.use_teleport(a), Err(GameError::NoTeleportAvailable(a)));

        game.link_teleports(a, b).unwrap();
        assert_eq!(game.use_teleport(a), Ok(b));
        assert_eq!(game.use_teleport(b), Ok(a));
    }

    #[test]
    fn test_linked_teleport_cannot_be_relinked() {
        let mut game = Game::default();
        let locations: Vec<_> = (0..3).map(|i| game.create_location(i as f64, 0.0)).collect();
        let teleports: Vec<_> = (0..3).map(|_| game.create_teleport()).collect();
        for (location, teleport) in locations.iter().zip(&teleports) {
            game.set_teleport(*location, *teleport).unwrap();
        }

        game.link_teleports(locations[0], locations[1]).unwrap();

        assert_eq!(
            game.link_teleports(locations[1], locations[2]),
            Err(GameError::TeleportAlreadyLinked(teleports[1]))
        );
        assert!(game.teleport(teleports[2]).unwrap().partner().is_none());
    }

    #[test]
    fn test_teleport_slot_is_exclusive() {
        let mut game = Game::default();
        let a = game.create_location(0.0, 0.0);
        let b = game.create_location(1.0, 0.0);
        let first = game.create_teleport();
        let second = game.create_teleport();
        game.set_teleport(a, first).unwrap();

        assert_eq!(game.set_teleport(a, second), Err(GameError::TeleportSlotOccupied(a)));
        assert_eq!(
            game.set_teleport(b, first),
            Err(GameError::TeleportAlreadyDeployed(first))
        );
    }

    #[test]
    fn test_clear_teleport_detaches_endpoint() {
        let mut game = Game::default();
        let a = game.create_location(0.0, 0.0);
        let teleport = game.create_teleport();
        game.set_teleport(a, teleport).unwrap();

        assert_eq!(game.clear_teleport(a), Ok(Some(teleport)));
        assert!(game.location(a).unwrap().teleport().is_none());
        assert!(!game.teleport(teleport).unwrap().is_deployed());
        assert_eq!(game.clear_teleport(a), Ok(None));
    }
}
