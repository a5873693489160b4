//! Error kinds raised by simulation operations.

use crate::entities::EntityId;

/// Result alias used by every fallible simulation operation.
pub type GameResult<T> = Result<T, GameError>;

/// Everything that can go wrong while mutating the simulation.
///
/// Each variant is raised at the point of violation; the operation that
/// raised it leaves the game unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no entity of the expected kind with id {0}")]
    InvalidReference(EntityId),
    #[error("surface thickness is already zero")]
    SurfaceThicknessIsZero,
    #[error("asteroid is not mineable until fully drilled")]
    AsteroidIsNotMineable,
    #[error("asteroid has already been mined")]
    AsteroidAlreadyMined,
    #[error("asteroid must be drilled and mined before storing material")]
    AsteroidNotMined,
    #[error("inventory is full")]
    InventoryIsFull,
    #[error("not enough material")]
    NotEnoughMaterial,
    #[error("location {0} has no neighbors")]
    NoNeighbor(EntityId),
    #[error("no teleport available at location {0}")]
    NoTeleportAvailable(EntityId),
    #[error("spaceship {0} carries no teleport to deploy")]
    NoTeleportToDeploy(EntityId),
    #[error("teleport {0} is already linked")]
    TeleportAlreadyLinked(EntityId),
    #[error("location {0} already has a teleport")]
    TeleportSlotOccupied(EntityId),
    #[error("teleport {0} is already deployed")]
    TeleportAlreadyDeployed(EntityId),
    #[error("location {to} is not a neighbor of location {from}")]
    NotANeighbor { from: EntityId, to: EntityId },
    #[error("location {0} cannot be connected to itself")]
    SelfConnection(EntityId),
    #[error("no asteroid at location {0}")]
    NoAsteroidAt(EntityId),
    #[error("location {0} already hosts a celestial body")]
    LocationOccupied(EntityId),
    #[error("asteroid {0} has exploded")]
    AsteroidDestroyed(EntityId),
    #[error("spaceship {0} is not placed on an asteroid")]
    NotPlaced(EntityId),
    #[error("target {0} is out of reach")]
    OutOfReach(EntityId),
    #[error("material {0} is not available for placement")]
    MaterialUnavailable(EntityId),
    #[error("reference to {0} must be made through the game")]
    UnmanagedReference(EntityId),
}

impl GameError {
    /// Short, stable name of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::InvalidReference(_) => "InvalidReference",
            GameError::SurfaceThicknessIsZero => "SurfaceThicknessIsZero",
            GameError::AsteroidIsNotMineable => "AsteroidIsNotMineable",
            GameError::AsteroidAlreadyMined => "AsteroidAlreadyMined",
            GameError::AsteroidNotMined => "AsteroidNotMined",
            GameError::InventoryIsFull => "InventoryIsFull",
            GameError::NotEnoughMaterial => "NotEnoughMaterial",
            GameError::NoNeighbor(_) => "NoNeighbor",
            GameError::NoTeleportAvailable(_) => "NoTeleportAvailable",
            GameError::NoTeleportToDeploy(_) => "NoTeleportToDeploy",
            GameError::TeleportAlreadyLinked(_) => "TeleportAlreadyLinked",
            GameError::TeleportSlotOccupied(_) => "TeleportSlotOccupied",
            GameError::TeleportAlreadyDeployed(_) => "TeleportAlreadyDeployed",
            GameError::NotANeighbor { .. } => "NotANeighbor",
            GameError::SelfConnection(_) => "SelfConnection",
            GameError::NoAsteroidAt(_) => "NoAsteroidAt",
            GameError::LocationOccupied(_) => "LocationOccupied",
            GameError::AsteroidDestroyed(_) => "AsteroidDestroyed",
            GameError::NotPlaced(_) => "NotPlaced",
            GameError::OutOfReach(_) => "OutOfReach",
            GameError::MaterialUnavailable(_) => "MaterialUnavailable",
            GameError::UnmanagedReference(_) => "UnmanagedReference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_entity() {
        let err = GameError::InvalidReference(EntityId(7));
        assert_eq!(err.to_string(), "no entity of the expected kind with id #7");

        let err = GameError::NotANeighbor {
            from: EntityId(1),
            to: EntityId(2),
        };
        assert_eq!(err.to_string(), "location #2 is not a neighbor of location #1");
    }

    #[test]
    fn test_error_kind_names() {
        assert_eq!(GameError::InventoryIsFull.kind(), "InventoryIsFull");
        assert_eq!(GameError::NoNeighbor(EntityId(3)).kind(), "NoNeighbor");
    }
}
