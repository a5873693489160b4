//! Simulation configuration, loaded from TOML.
//!
//! Every field has a default, so a partial file only overrides what it names:
//!
//! ```toml
//! seed = 7
//! uranium_heat_threshold = 2
//!
//! [[recipes.base]]
//! material = "Iron"
//! amount = 3
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::mechanics::MaterialKind;

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// One line of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub material: MaterialKind,
    pub amount: u32,
}

impl Ingredient {
    pub fn new(material: MaterialKind, amount: u32) -> Self {
        Self { material, amount }
    }
}

/// Materials consumed by a construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe {
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        Self { ingredients }
    }

    /// Total amount needed per kind, with repeated kinds merged.
    pub fn requirements(&self) -> impl Iterator<Item = (MaterialKind, usize)> {
        let mut totals: BTreeMap<MaterialKind, usize> = BTreeMap::new();
        for ingredient in &self.ingredients {
            *totals.entry(ingredient.material).or_default() += ingredient.amount as usize;
        }
        totals.into_iter().filter(|(_, amount)| *amount > 0)
    }

    /// Number of material units consumed in total.
    pub fn total(&self) -> usize {
        self.requirements().map(|(_, amount)| amount).sum()
    }
}

/// Recipes for everything a settler can build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipes {
    pub base: Recipe,
    pub robot: Recipe,
    pub teleport_pair: Recipe,
}

impl Default for Recipes {
    fn default() -> Self {
        Self {
            base: Recipe::new(
                MaterialKind::ALL
                    .iter()
                    .map(|kind| Ingredient::new(*kind, 1))
                    .collect(),
            ),
            robot: Recipe::new(vec![
                Ingredient::new(MaterialKind::Iron, 1),
                Ingredient::new(MaterialKind::Coal, 1),
                Ingredient::new(MaterialKind::Uranium, 1),
            ]),
            teleport_pair: Recipe::new(vec![
                Ingredient::new(MaterialKind::Iron, 2),
                Ingredient::new(MaterialKind::Waterice, 1),
                Ingredient::new(MaterialKind::Uranium, 1),
            ]),
        }
    }
}

/// Tunable parameters of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the random neighbor picks.
    pub seed: u64,
    pub settler_capacity: usize,
    pub robot_capacity: usize,
    pub ufo_capacity: usize,
    /// Room for stored cargo in a cleared asteroid.
    pub asteroid_capacity: usize,
    /// Unplaced teleport endpoints a settler may carry.
    pub max_carried_teleports: usize,
    /// Heat events a uranium deposit survives before the asteroid explodes.
    pub uranium_heat_threshold: u32,
    pub recipes: Recipes,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            settler_capacity: 10,
            robot_capacity: 1,
            ufo_capacity: 10,
            asteroid_capacity: 10,
            max_carried_teleports: 3,
            uranium_heat_threshold: 2,
            recipes: Recipes::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacities = [
            ("settler_capacity", self.settler_capacity),
            ("robot_capacity", self.robot_capacity),
            ("ufo_capacity", self.ufo_capacity),
            ("asteroid_capacity", self.asteroid_capacity),
        ];
        for (name, value) in capacities {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        if self.uranium_heat_threshold == 0 {
            return Err(ConfigError::Invalid(
                "uranium_heat_threshold must be at least 1".to_string(),
            ));
        }
        if self.recipes.base.total() > self.settler_capacity {
            return Err(ConfigError::Invalid(
                "base recipe does not fit in a settler inventory".to_string(),
            ));
        }
        Ok(())
    }
}
