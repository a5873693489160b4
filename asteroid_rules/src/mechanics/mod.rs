//! Game mechanics: material kinds and how they react to extreme heat.

use serde::{Deserialize, Serialize};

use crate::entities::EntityId;

/// All minable material kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialKind {
    Coal,
    Iron,
    Uranium,
    Waterice,
}

impl MaterialKind {
    /// Every kind, in declaration order.
    pub const ALL: [MaterialKind; 4] = [
        MaterialKind::Coal,
        MaterialKind::Iron,
        MaterialKind::Uranium,
        MaterialKind::Waterice,
    ];

    /// How a deposit of this kind behaves when its asteroid is exposed to extreme heat.
    pub fn heat_reaction(&self) -> HeatReaction {
        match self {
            MaterialKind::Uranium => HeatReaction::Radioactive,
            MaterialKind::Waterice => HeatReaction::Sublimates,
            MaterialKind::Coal | MaterialKind::Iron => HeatReaction::Inert,
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MaterialKind::Coal => "coal",
            MaterialKind::Iron => "iron",
            MaterialKind::Uranium => "uranium",
            MaterialKind::Waterice => "waterice",
        };
        f.write_str(name)
    }
}

/// Reaction categories for extreme heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatReaction {
    /// Nothing happens.
    Inert,
    /// The deposit evaporates.
    Sublimates,
    /// Accumulates exposure until the asteroid explodes.
    Radioactive,
}

/// A single unit of material.
///
/// Materials are values: they move between inventories and deposits and are
/// never shared. The id is their identity across moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Material {
    pub id: EntityId,
    pub kind: MaterialKind,
}

impl Material {
    pub fn new(id: EntityId, kind: MaterialKind) -> Self {
        Self { id, kind }
    }
}
