//! Spaceship actions: movement, mining, cargo, construction, theft and automaton steps.

use serde::{Deserialize, Serialize};

use super::Game;
use crate::entities::{Entity, EntityId, Spaceship, SpaceshipKind};
use crate::error::{GameError, GameResult};
use crate::mechanics::Material;

/// What an automated ship did on its step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAction {
    Drilled { surface_thickness: u32 },
    Mined(Material),
    Moved { asteroid: EntityId },
    Idle,
}

impl Game {
    /// A settler, or `InvalidReference` for any other entity.
    pub fn settler(&self, id: EntityId) -> GameResult<&Spaceship> {
        self.spaceship_of_kind(id, SpaceshipKind::Settler)
    }

    /// A ufo, or `InvalidReference` for any other entity.
    pub fn ufo(&self, id: EntityId) -> GameResult<&Spaceship> {
        self.spaceship_of_kind(id, SpaceshipKind::Ufo)
    }

    fn spaceship_of_kind(&self, id: EntityId, kind: SpaceshipKind) -> GameResult<&Spaceship> {
        let ship = self.spaceship(id)?;
        if ship.kind != kind {
            return Err(GameError::InvalidReference(id));
        }
        Ok(ship)
    }

    /// The asteroid and location a ship is on.
    pub fn ship_position(&self, ship: EntityId) -> GameResult<(EntityId, EntityId)> {
        let asteroid = self
            .spaceship(ship)?
            .asteroid
            .ok_or(GameError::NotPlaced(ship))?;
        let location = self
            .asteroid(asteroid)?
            .location()
            .ok_or(GameError::AsteroidDestroyed(asteroid))?;
        Ok((asteroid, location))
    }

    /// Fly a ship to the asteroid on a neighboring location.
    pub fn move_spaceship(&mut self, ship: EntityId, target: EntityId) -> GameResult<EntityId> {
        let (_, from) = self.ship_position(ship)?;
        self.location(target)?;
        if !self.location(from)?.is_neighbor(target) {
            return Err(GameError::NotANeighbor { from, to: target });
        }
        let destination = self.asteroid_at(target)?;

        self.transfer_resident(ship, destination);
        tracing::debug!(%ship, %destination, "spaceship moved");
        Ok(destination)
    }

    /// Travel through the teleport deployed on the ship's location.
    pub fn teleport_spaceship(&mut self, ship: EntityId) -> GameResult<EntityId> {
        let (_, from) = self.ship_position(ship)?;
        let target = self.use_teleport(from)?;
        let destination = self.asteroid_at(target)?;

        self.transfer_resident(ship, destination);
        tracing::debug!(%ship, %from, %target, "spaceship teleported");
        Ok(destination)
    }

    /// Travel through a specific teleport, which must be the one at the settler's location.
    pub fn settler_use_teleport(&mut self, settler: EntityId, teleport: EntityId) -> GameResult<EntityId> {
        self.settler(settler)?;
        self.teleport(teleport)?;
        let (_, location) = self.ship_position(settler)?;
        if self.location(location)?.teleport() != Some(teleport) {
            return Err(GameError::NoTeleportAvailable(location));
        }
        self.teleport_spaceship(settler)
    }

    /// Drill the surface of the settler's asteroid. Returns the remaining thickness.
    pub fn settler_drill(&mut self, settler: EntityId) -> GameResult<u32> {
        self.settler(settler)?;
        let (asteroid, _) = self.ship_position(settler)?;
        let remaining = self.asteroid_mut(asteroid)?.drill()?;
        tracing::debug!(%settler, %asteroid, remaining, "drilled");
        Ok(remaining)
    }

    /// Extract the deposit of the settler's asteroid into the settler's inventory.
    pub fn settler_mine(&mut self, settler: EntityId) -> GameResult<Material> {
        let (asteroid, _) = self.ship_position(settler)?;
        self.settler(settler)?.inventory.ensure_room()?;
        self.mine_into(settler, asteroid)
    }

    fn mine_into(&mut self, ship: EntityId, asteroid: EntityId) -> GameResult<Material> {
        self.asteroid(asteroid)?.ensure_mineable()?;
        let material = self.asteroid_mut(asteroid)?.mine()?;
        self.spaceship_mut(ship)?.inventory.insert(material)?;
        tracing::debug!(%ship, %asteroid, kind = %material.kind, "mined");
        Ok(material)
    }

    /// Hand a loose material to a settler.
    pub fn settler_add_material(&mut self, settler: EntityId, material: EntityId) -> GameResult<()> {
        self.settler(settler)?.inventory.ensure_room()?;
        let material = self.take_loose_material(material)?;
        self.spaceship_mut(settler)?.inventory.insert(material)?;
        tracing::debug!(%settler, material = %material.id, "material handed over");
        Ok(())
    }

    /// Store a material from the settler's inventory in its asteroid.
    pub fn settler_insert_material(&mut self, settler: EntityId, material: EntityId) -> GameResult<()> {
        let (asteroid, _) = self.ship_position(settler)?;
        if !self.settler(settler)?.inventory.contains(material) {
            return Err(GameError::NotEnoughMaterial);
        }
        self.asteroid(asteroid)?.ensure_storable()?;

        let material = self.spaceship_mut(settler)?.inventory.remove(material)?;
        self.asteroid_mut(asteroid)?.insert_material(material)?;
        tracing::debug!(%settler, %asteroid, material = %material.id, "material stored");
        Ok(())
    }

    /// Take a material stored in the settler's asteroid.
    pub fn settler_remove_material(&mut self, settler: EntityId, material: EntityId) -> GameResult<()> {
        let (asteroid, _) = self.ship_position(settler)?;
        if !self.asteroid(asteroid)?.inventory().contains(material) {
            return Err(GameError::NotEnoughMaterial);
        }
        self.settler(settler)?.inventory.ensure_room()?;

        let material = self.asteroid_mut(asteroid)?.remove_material(material)?;
        self.spaceship_mut(settler)?.inventory.insert(material)?;
        tracing::debug!(%settler, %asteroid, material = %material.id, "material retrieved");
        Ok(())
    }

    /// Build a base on the settler's asteroid.
    ///
    /// An asteroid holds one base; building a second fails with `InventoryIsFull`.
    pub fn build_base(&mut self, settler: EntityId) -> GameResult<()> {
        let (asteroid, _) = self.ship_position(settler)?;
        let recipe = self.config().recipes.base.clone();
        if !self.settler(settler)?.inventory.satisfies(&recipe) {
            return Err(GameError::NotEnoughMaterial);
        }
        if self.asteroid(asteroid)?.has_base() {
            return Err(GameError::InventoryIsFull);
        }

        self.spaceship_mut(settler)?.inventory.consume(&recipe)?;
        self.asteroid_mut(asteroid)?.has_base = true;
        tracing::info!(%settler, %asteroid, "base built");
        Ok(())
    }

    /// Build a robot on the settler's asteroid.
    pub fn build_robot(&mut self, settler: EntityId) -> GameResult<EntityId> {
        let (asteroid, _) = self.ship_position(settler)?;
        let recipe = self.config().recipes.robot.clone();
        if !self.settler(settler)?.inventory.satisfies(&recipe) {
            return Err(GameError::NotEnoughMaterial);
        }

        self.spaceship_mut(settler)?.inventory.consume(&recipe)?;
        let robot = self.spawn_spaceship(SpaceshipKind::Robot, asteroid)?;
        tracing::info!(%settler, %robot, "robot built");
        Ok(robot)
    }

    /// Build a teleport pair.
    ///
    /// The first endpoint is deployed on the settler's location; the second is
    /// carried until [`Game::deploy_teleport`] places it elsewhere. Both start
    /// unlinked; [`Game::link_teleports`] pairs them once they are deployed.
    pub fn build_teleport_pair(&mut self, settler: EntityId) -> GameResult<(EntityId, EntityId)> {
        let (_, location) = self.ship_position(settler)?;
        let recipe = self.config().recipes.teleport_pair.clone();
        let max_carried = self.config().max_carried_teleports;
        let builder = self.settler(settler)?;
        if builder.carried_teleports.len() >= max_carried {
            return Err(GameError::InventoryIsFull);
        }
        if !builder.inventory.satisfies(&recipe) {
            return Err(GameError::NotEnoughMaterial);
        }
        if self.location(location)?.teleport().is_some() {
            return Err(GameError::TeleportSlotOccupied(location));
        }

        self.spaceship_mut(settler)?.inventory.consume(&recipe)?;
        let deployed = self.create_teleport();
        let carried = self.create_teleport();
        self.set_teleport(location, deployed)?;
        self.spaceship_mut(settler)?.carried_teleports.push(carried);
        tracing::info!(%settler, %deployed, %carried, "teleport pair built");
        Ok((deployed, carried))
    }

    /// Place the most recently built carried endpoint on the settler's location.
    pub fn deploy_teleport(&mut self, settler: EntityId) -> GameResult<EntityId> {
        let (_, location) = self.ship_position(settler)?;
        let teleport = self
            .settler(settler)?
            .carried_teleports
            .last()
            .copied()
            .ok_or(GameError::NoTeleportToDeploy(settler))?;
        if self.location(location)?.teleport().is_some() {
            return Err(GameError::TeleportSlotOccupied(location));
        }

        self.set_teleport(location, teleport)?;
        self.spaceship_mut(settler)?.carried_teleports.pop();
        Ok(teleport)
    }

    /// Take the oldest material from an asteroid's storage or a settler's inventory.
    ///
    /// The target must be the ufo's asteroid or a settler on it.
    pub fn ufo_steal(&mut self, ufo: EntityId, target: EntityId) -> GameResult<Material> {
        let (asteroid, _) = self.ship_position(ufo)?;
        self.ufo(ufo)?.inventory.ensure_room()?;

        let victim = match self.lookup(target) {
            Some(Entity::Spaceship(ship)) if ship.kind == SpaceshipKind::Settler => {
                if ship.asteroid != Some(asteroid) {
                    return Err(GameError::OutOfReach(target));
                }
                ship.inventory.items().first().copied()
            }
            Some(Entity::Body(body)) if body.as_asteroid().is_some() => {
                if target != asteroid {
                    return Err(GameError::OutOfReach(target));
                }
                self.asteroid(target)?.inventory().items().first().copied()
            }
            _ => return Err(GameError::InvalidReference(target)),
        };
        let material = victim.ok_or(GameError::NotEnoughMaterial)?;

        if target == asteroid {
            self.asteroid_mut(asteroid)?.remove_material(material.id)?;
        } else {
            self.spaceship_mut(target)?.inventory.remove(material.id)?;
        }
        self.spaceship_mut(ufo)?.inventory.insert(material)?;
        tracing::info!(%ufo, %target, material = %material.id, "material stolen");
        Ok(material)
    }

    /// Let one automated ship act.
    ///
    /// A robot drills until the surface is cleared, then wanders to a random
    /// neighboring asteroid. A ufo mines whatever deposit is exposed and
    /// wanders otherwise. Settlers wait for orders.
    pub fn step_spaceship(&mut self, ship: EntityId) -> GameResult<StepAction> {
        let kind = self.spaceship(ship)?.kind;
        let (asteroid, location) = self.ship_position(ship)?;

        let action = match kind {
            SpaceshipKind::Settler => StepAction::Idle,
            SpaceshipKind::Robot => {
                let target = self.asteroid_mut(asteroid)?;
                if target.is_drilled() {
                    self.wander(ship, location)
                } else {
                    let surface_thickness = target.drill()?;
                    StepAction::Drilled { surface_thickness }
                }
            }
            SpaceshipKind::Ufo => {
                let can_mine = self.asteroid(asteroid)?.ensure_mineable().is_ok()
                    && !self.spaceship(ship)?.inventory.is_full();
                if can_mine {
                    StepAction::Mined(self.mine_into(ship, asteroid)?)
                } else {
                    self.wander(ship, location)
                }
            }
        };
        tracing::debug!(%ship, ?action, "stepped");
        Ok(action)
    }

    fn wander(&mut self, ship: EntityId, location: EntityId) -> StepAction {
        match self.random_neighboring_asteroid(location) {
            Some(destination) => {
                self.transfer_resident(ship, destination);
                StepAction::Moved {
                    asteroid: destination,
                }
            }
            None => StepAction::Idle,
        }
    }

    /// Step every robot and ufo, in registration order.
    pub fn step_automata(&mut self) -> GameResult<Vec<(EntityId, StepAction)>> {
        let automata: Vec<EntityId> = self
            .settlers()
            .filter(|ship| ship.kind.is_automated())
            .map(|ship| ship.id)
            .collect();

        let mut actions = Vec::with_capacity(automata.len());
        for ship in automata {
            actions.push((ship, self.step_spaceship(ship)?));
        }
        Ok(actions)
    }
}
