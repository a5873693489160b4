//! Teleport endpoints.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// One endpoint of a teleport pair.
///
/// Endpoints are created unlinked and undeployed. Linking makes two endpoints
/// reference each other exclusively; deploying places an endpoint on a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teleport {
    pub id: EntityId,
    pub(crate) location: Option<EntityId>,
    pub(crate) partner: Option<EntityId>,
}

impl Teleport {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            location: None,
            partner: None,
        }
    }

    /// Where the endpoint is deployed, if anywhere.
    pub fn location(&self) -> Option<EntityId> {
        self.location
    }

    /// The other endpoint of the pair, if linked.
    pub fn partner(&self) -> Option<EntityId> {
        self.partner
    }

    pub fn is_linked(&self) -> bool {
        self.partner.is_some()
    }

    pub fn is_deployed(&self) -> bool {
        self.location.is_some()
    }
}
