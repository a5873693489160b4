//! Locations: the nodes of the field graph.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::EntityId;
use crate::error::{GameError, GameResult};

/// A node of the undirected field graph.
///
/// Holds at most one celestial body and at most one teleport endpoint. The
/// neighbor relation is kept symmetric by [`Game::add_neighbor`](crate::Game::add_neighbor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    pub coordinates: (f64, f64),
    pub(crate) celestial_body: Option<EntityId>,
    pub(crate) neighbors: BTreeSet<EntityId>,
    pub(crate) teleport: Option<EntityId>,
}

impl Location {
    /// Create an empty, isolated location.
    pub fn new(id: EntityId, x: f64, y: f64) -> Self {
        Self {
            id,
            coordinates: (x, y),
            celestial_body: None,
            neighbors: BTreeSet::new(),
            teleport: None,
        }
    }

    pub fn celestial_body(&self) -> Option<EntityId> {
        self.celestial_body
    }

    pub fn teleport(&self) -> Option<EntityId> {
        self.teleport
    }

    pub fn neighbors(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.neighbors.iter().copied()
    }

    pub fn is_neighbor(&self, other: EntityId) -> bool {
        self.neighbors.contains(&other)
    }

    /// Insert one side of an edge. Returns false if it was already present.
    pub(crate) fn add_neighbor(&mut self, other: EntityId) -> bool {
        self.neighbors.insert(other)
    }

    /// Pick a neighbor uniformly at random.
    pub fn random_neighbor<R: Rng + ?Sized>(&self, rng: &mut R) -> GameResult<EntityId> {
        if self.neighbors.is_empty() {
            return Err(GameError::NoNeighbor(self.id));
        }
        let index = rng.random_range(0..self.neighbors.len());
        self.neighbors
            .iter()
            .nth(index)
            .copied()
            .ok_or(GameError::NoNeighbor(self.id))
    }
}
