//! Hazards: solar storms, extreme heat and explosions.

use serde::{Deserialize, Serialize};

use super::Game;
use crate::entities::{EntityId, HeatResponse};
use crate::error::{GameError, GameResult};

/// What happened to the residents of an exploded asteroid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosionReport {
    /// Ships that escaped, with the asteroid they landed on.
    pub relocated: Vec<(EntityId, EntityId)>,
    pub destroyed: Vec<EntityId>,
}

impl Game {
    /// Destroy every ship on the asteroid. Thickness and deposit are untouched.
    ///
    /// Returns the destroyed ships.
    pub fn experience_solar_storm(&mut self, asteroid: EntityId) -> GameResult<Vec<EntityId>> {
        let residents = self.asteroid_mut(asteroid)?.take_residents();
        for ship in &residents {
            self.destroy_spaceship(*ship);
        }
        tracing::info!(%asteroid, destroyed = residents.len(), "solar storm");
        Ok(residents)
    }

    /// Expose an asteroid to extreme heat.
    ///
    /// A uranium deposit that reaches the configured threshold makes the
    /// asteroid explode. Heating an asteroid that already exploded does nothing.
    pub fn experience_extreme_heat(&mut self, asteroid: EntityId) -> GameResult<HeatResponse> {
        let threshold = self.config().uranium_heat_threshold;
        let target = self.asteroid_mut(asteroid)?;
        if !target.is_attached() {
            tracing::debug!(%asteroid, "heat on exploded asteroid ignored");
            return Ok(HeatResponse::Unaffected);
        }

        let response = target.experience_extreme_heat(threshold);
        match response {
            HeatResponse::Unaffected => {}
            HeatResponse::Sublimated => tracing::info!(%asteroid, "waterice sublimated"),
            HeatResponse::Critical { exposures } => {
                tracing::info!(%asteroid, exposures, "uranium went critical")
            }
            HeatResponse::Detonate => {
                self.explode(asteroid)?;
            }
        }
        Ok(response)
    }

    /// Blow an asteroid up.
    ///
    /// The location loses its body and its teleport endpoint. Robots escape to
    /// a random neighboring asteroid when there is one; every other resident
    /// is destroyed.
    pub fn explode(&mut self, asteroid: EntityId) -> GameResult<ExplosionReport> {
        let location = self
            .asteroid(asteroid)?
            .location()
            .ok_or(GameError::AsteroidDestroyed(asteroid))?;
        self.location(location)?;

        let residents = {
            let target = self.asteroid_mut(asteroid)?;
            target.detach();
            target.take_residents()
        };
        self.location_mut(location)?.celestial_body = None;
        self.clear_teleport(location)?;

        let mut report = ExplosionReport::default();
        for ship in residents {
            let survives = self
                .spaceship(ship)
                .map(|s| s.kind.survives_explosion())
                .unwrap_or(false);
            let haven = if survives {
                self.random_neighboring_asteroid(location)
            } else {
                None
            };

            match haven {
                Some(haven) => {
                    self.transfer_resident(ship, haven);
                    report.relocated.push((ship, haven));
                }
                None => {
                    self.destroy_spaceship(ship);
                    report.destroyed.push(ship);
                }
            }
        }

        tracing::info!(
            %asteroid,
            %location,
            relocated = report.relocated.len(),
            destroyed = report.destroyed.len(),
            "asteroid exploded"
        );
        Ok(report)
    }

    /// Heat every asteroid on the locations around a sun.
    pub fn sun_flare(&mut self, sun: EntityId) -> GameResult<Vec<(EntityId, HeatResponse)>> {
        let location = self
            .sun(sun)?
            .location
            .ok_or(GameError::InvalidReference(sun))?;
        let targets = self.neighboring_asteroids(location)?;

        let mut responses = Vec::with_capacity(targets.len());
        for asteroid in targets {
            let response = self.experience_extreme_heat(asteroid)?;
            responses.push((asteroid, response));
        }
        tracing::info!(%sun, heated = responses.len(), "sun flare");
        Ok(responses)
    }
}
