//! Component definitions shared by several entities.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::config::Recipe;
use crate::error::{GameError, GameResult};
use crate::mechanics::{Material, MaterialKind};

/// Capacity-bounded, ordered container of materials.
///
/// Held by asteroids (stored cargo) and spaceships. `items.len() <= capacity`
/// always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Material>,
    capacity: usize,
}

impl Inventory {
    /// Create an empty inventory with room for `capacity` materials.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Materials in insertion order.
    pub fn items(&self) -> &[Material] {
        &self.items
    }

    pub fn contains(&self, material: EntityId) -> bool {
        self.items.iter().any(|m| m.id == material)
    }

    /// Number of materials of the given kind.
    pub fn count(&self, kind: MaterialKind) -> usize {
        self.items.iter().filter(|m| m.kind == kind).count()
    }

    /// Fail with `InventoryIsFull` if another material would not fit.
    pub fn ensure_room(&self) -> GameResult<()> {
        if self.is_full() {
            Err(GameError::InventoryIsFull)
        } else {
            Ok(())
        }
    }

    /// Append a material at the end.
    pub fn insert(&mut self, material: Material) -> GameResult<()> {
        self.ensure_room()?;
        self.items.push(material);
        Ok(())
    }

    /// Remove a specific material, keeping the order of the rest.
    pub fn remove(&mut self, material: EntityId) -> GameResult<Material> {
        let index = self
            .items
            .iter()
            .position(|m| m.id == material)
            .ok_or(GameError::NotEnoughMaterial)?;
        Ok(self.items.remove(index))
    }

    /// Remove the oldest material, if any.
    pub fn take_first(&mut self) -> Option<Material> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Check whether every ingredient of the recipe is present.
    pub fn satisfies(&self, recipe: &Recipe) -> bool {
        recipe
            .requirements()
            .all(|(kind, amount)| self.count(kind) >= amount)
    }

    /// Remove the materials a recipe asks for, oldest first.
    ///
    /// Nothing is removed unless the whole recipe is available.
    pub fn consume(&mut self, recipe: &Recipe) -> GameResult<Vec<Material>> {
        if !self.satisfies(recipe) {
            return Err(GameError::NotEnoughMaterial);
        }

        let mut consumed = Vec::new();
        for (kind, amount) in recipe.requirements() {
            for _ in 0..amount {
                if let Some(index) = self.items.iter().position(|m| m.kind == kind) {
                    consumed.push(self.items.remove(index));
                }
            }
        }
        Ok(consumed)
    }
}
