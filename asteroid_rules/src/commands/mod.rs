//! Commands: the units of mutation external drivers apply to a game.
//!
//! Every player or environment action is one [`Command`] variant carrying the
//! ids and parameters it needs. Front ends (a text console, a GUI, a network
//! listener) only translate their input into these values.

mod executor;

pub use executor::*;

use serde::{Deserialize, Serialize};

use crate::entities::{EntityId, HeatResponse, SpaceshipKind};
use crate::error::{GameError, GameResult};
use crate::mechanics::{Material, MaterialKind};
use crate::world_state::{ExplosionReport, Game, GameSnapshot, StepAction};

/// One simulation action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Empty the field and start over.
    Start,
    /// Create a location holding a new asteroid.
    CreateAsteroid {
        x: f64,
        y: f64,
        surface_thickness: u32,
        /// A loose material that becomes the deposit.
        substance: Option<EntityId>,
    },
    /// Create a location holding a new sun.
    CreateSun { x: f64, y: f64 },
    CreateMaterial { kind: MaterialKind },
    CreateSettler { asteroid: EntityId },
    CreateRobot { asteroid: EntityId },
    CreateUfo { asteroid: EntityId },
    /// Create an unlinked, undeployed teleport endpoint.
    CreateTeleport,
    AddNeighbor { a: EntityId, b: EntityId },
    LinkTeleports { a: EntityId, b: EntityId },
    /// Deploy an endpoint on a location; a fresh one when `teleport` is `None`.
    AddTeleport {
        location: EntityId,
        teleport: Option<EntityId>,
    },
    SettlerAddMaterial { settler: EntityId, material: EntityId },
    SettlerDrill { settler: EntityId },
    SettlerMine { settler: EntityId },
    SettlerInsertMaterial { settler: EntityId, material: EntityId },
    SettlerRemoveMaterial { settler: EntityId, material: EntityId },
    SettlerBuildBase { settler: EntityId },
    SettlerBuildRobot { settler: EntityId },
    SettlerBuildTeleport { settler: EntityId },
    SettlerDeployTeleport { settler: EntityId },
    SettlerUseTeleport { settler: EntityId, teleport: EntityId },
    SpaceshipMove { ship: EntityId, target: EntityId },
    StartSolarStorm { asteroid: EntityId },
    ExtremeHeat { asteroid: EntityId },
    SunFlare { sun: EntityId },
    AsteroidExplode { asteroid: EntityId },
    UfoSteal { ufo: EntityId, target: EntityId },
    StepAutomata,
    ShowGameState,
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandOutput {
    Done,
    /// Newly registered entities, in creation order.
    Created(Vec<EntityId>),
    Drilled { surface_thickness: u32 },
    Material(Material),
    Moved { asteroid: EntityId },
    Destroyed(Vec<EntityId>),
    Heat(Vec<(EntityId, HeatResponse)>),
    Explosion(ExplosionReport),
    Steps(Vec<(EntityId, StepAction)>),
    State(GameSnapshot),
}

impl Command {
    /// Variant name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "Start",
            Command::CreateAsteroid { .. } => "CreateAsteroid",
            Command::CreateSun { .. } => "CreateSun",
            Command::CreateMaterial { .. } => "CreateMaterial",
            Command::CreateSettler { .. } => "CreateSettler",
            Command::CreateRobot { .. } => "CreateRobot",
            Command::CreateUfo { .. } => "CreateUfo",
            Command::CreateTeleport => "CreateTeleport",
            Command::AddNeighbor { .. } => "AddNeighbor",
            Command::LinkTeleports { .. } => "LinkTeleports",
            Command::AddTeleport { .. } => "AddTeleport",
            Command::SettlerAddMaterial { .. } => "SettlerAddMaterial",
            Command::SettlerDrill { .. } => "SettlerDrill",
            Command::SettlerMine { .. } => "SettlerMine",
            Command::SettlerInsertMaterial { .. } => "SettlerInsertMaterial",
            Command::SettlerRemoveMaterial { .. } => "SettlerRemoveMaterial",
            Command::SettlerBuildBase { .. } => "SettlerBuildBase",
            Command::SettlerBuildRobot { .. } => "SettlerBuildRobot",
            Command::SettlerBuildTeleport { .. } => "SettlerBuildTeleport",
            Command::SettlerDeployTeleport { .. } => "SettlerDeployTeleport",
            Command::SettlerUseTeleport { .. } => "SettlerUseTeleport",
            Command::SpaceshipMove { .. } => "SpaceshipMove",
            Command::StartSolarStorm { .. } => "StartSolarStorm",
            Command::ExtremeHeat { .. } => "ExtremeHeat",
            Command::SunFlare { .. } => "SunFlare",
            Command::AsteroidExplode { .. } => "AsteroidExplode",
            Command::UfoSteal { .. } => "UfoSteal",
            Command::StepAutomata => "StepAutomata",
            Command::ShowGameState => "ShowGameState",
        }
    }

    /// Validate and perform the action.
    ///
    /// On error the game is left exactly as it was.
    pub fn apply(&self, game: &mut Game) -> GameResult<CommandOutput> {
        let output = match *self {
            Command::Start => {
                game.reset();
                CommandOutput::Done
            }
            Command::CreateAsteroid {
                x,
                y,
                surface_thickness,
                substance,
            } => {
                if let Some(material) = substance {
                    game.material(material)?;
                    if !game.is_loose_material(material) {
                        return Err(GameError::MaterialUnavailable(material));
                    }
                }
                let location = game.create_location(x, y);
                let asteroid = game.place_asteroid(location, surface_thickness, substance)?;
                CommandOutput::Created(vec![location, asteroid])
            }
            Command::CreateSun { x, y } => {
                let location = game.create_location(x, y);
                let sun = game.place_sun(location)?;
                CommandOutput::Created(vec![location, sun])
            }
            Command::CreateMaterial { kind } => {
                CommandOutput::Created(vec![game.create_material(kind)])
            }
            Command::CreateSettler { asteroid } => {
                spawn(game, SpaceshipKind::Settler, asteroid)?
            }
            Command::CreateRobot { asteroid } => spawn(game, SpaceshipKind::Robot, asteroid)?,
            Command::CreateUfo { asteroid } => spawn(game, SpaceshipKind::Ufo, asteroid)?,
            Command::CreateTeleport => CommandOutput::Created(vec![game.create_teleport()]),
            Command::AddNeighbor { a, b } => {
                game.add_neighbor(a, b)?;
                CommandOutput::Done
            }
            Command::LinkTeleports { a, b } => {
                game.link_teleports(a, b)?;
                CommandOutput::Done
            }
            Command::AddTeleport { location, teleport } => match teleport {
                Some(teleport) => {
                    game.set_teleport(location, teleport)?;
                    CommandOutput::Done
                }
                None => {
                    if game.location(location)?.teleport().is_some() {
                        return Err(GameError::TeleportSlotOccupied(location));
                    }
                    let teleport = game.create_teleport();
                    game.set_teleport(location, teleport)?;
                    CommandOutput::Created(vec![teleport])
                }
            },
            Command::SettlerAddMaterial { settler, material } => {
                game.settler_add_material(settler, material)?;
                CommandOutput::Done
            }
            Command::SettlerDrill { settler } => CommandOutput::Drilled {
                surface_thickness: game.settler_drill(settler)?,
            },
            Command::SettlerMine { settler } => CommandOutput::Material(game.settler_mine(settler)?),
            Command::SettlerInsertMaterial { settler, material } => {
                game.settler_insert_material(settler, material)?;
                CommandOutput::Done
            }
            Command::SettlerRemoveMaterial { settler, material } => {
                game.settler_remove_material(settler, material)?;
                CommandOutput::Done
            }
            Command::SettlerBuildBase { settler } => {
                game.build_base(settler)?;
                CommandOutput::Done
            }
            Command::SettlerBuildRobot { settler } => {
                CommandOutput::Created(vec![game.build_robot(settler)?])
            }
            Command::SettlerBuildTeleport { settler } => {
                let (deployed, carried) = game.build_teleport_pair(settler)?;
                CommandOutput::Created(vec![deployed, carried])
            }
            Command::SettlerDeployTeleport { settler } => {
                game.deploy_teleport(settler)?;
                CommandOutput::Done
            }
            Command::SettlerUseTeleport { settler, teleport } => CommandOutput::Moved {
                asteroid: game.settler_use_teleport(settler, teleport)?,
            },
            Command::SpaceshipMove { ship, target } => CommandOutput::Moved {
                asteroid: game.move_spaceship(ship, target)?,
            },
            Command::StartSolarStorm { asteroid } => {
                CommandOutput::Destroyed(game.experience_solar_storm(asteroid)?)
            }
            Command::ExtremeHeat { asteroid } => {
                let response = game.experience_extreme_heat(asteroid)?;
                CommandOutput::Heat(vec![(asteroid, response)])
            }
            Command::SunFlare { sun } => CommandOutput::Heat(game.sun_flare(sun)?),
            Command::AsteroidExplode { asteroid } => {
                CommandOutput::Explosion(game.explode(asteroid)?)
            }
            Command::UfoSteal { ufo, target } => {
                CommandOutput::Material(game.ufo_steal(ufo, target)?)
            }
            Command::StepAutomata => CommandOutput::Steps(game.step_automata()?),
            Command::ShowGameState => CommandOutput::State(game.snapshot()),
        };
        Ok(output)
    }
}

fn spawn(game: &mut Game, kind: SpaceshipKind, asteroid: EntityId) -> GameResult<CommandOutput> {
    Ok(CommandOutput::Created(vec![game.spawn_spaceship(kind, asteroid)?]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(output: GameResult<CommandOutput>) -> Vec<EntityId> {
        match output {
            Ok(CommandOutput::Created(ids)) => ids,
            other => panic!("expected created ids, got {other:?}"),
        }
    }

    #[test]
    fn test_build_field_through_commands() {
        let mut game = Game::default();

        let uranium = created(Command::CreateMaterial { kind: MaterialKind::Uranium }.apply(&mut game))[0];
        let first = created(
            Command::CreateAsteroid {
                x: 1.1,
                y: 2.2,
                surface_thickness: 0,
                substance: Some(uranium),
            }
            .apply(&mut game),
        );
        let second = created(
            Command::CreateAsteroid {
                x: 1.6,
                y: 2.8,
                surface_thickness: 4,
                substance: None,
            }
            .apply(&mut game),
        );
        Command::AddNeighbor { a: first[0], b: second[0] }
            .apply(&mut game)
            .unwrap();
        let robot = created(Command::CreateRobot { asteroid: first[1] }.apply(&mut game))[0];

        Command::ExtremeHeat { asteroid: first[1] }.apply(&mut game).unwrap();
        let output = Command::ExtremeHeat { asteroid: first[1] }.apply(&mut game);

        assert_eq!(
            output,
            Ok(CommandOutput::Heat(vec![(first[1], HeatResponse::Detonate)]))
        );
        assert_eq!(game.asteroid(second[1]).unwrap().residents(), &[robot]);
    }

    #[test]
    fn test_invalid_reference_is_reported() {
        let mut game = Game::default();
        let location = game.create_location(0.0, 0.0);

        assert_eq!(
            Command::CreateSettler { asteroid: location }.apply(&mut game),
            Err(GameError::InvalidReference(location))
        );
        assert_eq!(
            Command::SettlerDrill { settler: EntityId(50) }.apply(&mut game),
            Err(GameError::InvalidReference(EntityId(50)))
        );
    }

    #[test]
    fn test_failed_create_asteroid_registers_nothing() {
        let mut game = Game::default();
        let iron = created(Command::CreateMaterial { kind: MaterialKind::Iron }.apply(&mut game))[0];
        Command::CreateAsteroid {
            x: 0.0,
            y: 0.0,
            surface_thickness: 1,
            substance: Some(iron),
        }
        .apply(&mut game)
        .unwrap();
        let count = game.entity_count();

        let result = Command::CreateAsteroid {
            x: 1.0,
            y: 0.0,
            surface_thickness: 1,
            substance: Some(iron),
        }
        .apply(&mut game);

        assert_eq!(result, Err(GameError::MaterialUnavailable(iron)));
        assert_eq!(game.entity_count(), count);
    }

    #[test]
    fn test_add_teleport_and_link() {
        let mut game = Game::default();
        let a = game.create_location(0.0, 0.0);
        let b = game.create_location(1.0, 1.0);
        let spare = created(Command::CreateTeleport.apply(&mut game))[0];

        let fresh = created(Command::AddTeleport { location: a, teleport: None }.apply(&mut game))[0];
        Command::AddTeleport { location: b, teleport: Some(spare) }
            .apply(&mut game)
            .unwrap();
        Command::LinkTeleports { a, b }.apply(&mut game).unwrap();

        assert_eq!(game.teleport(fresh).unwrap().partner(), Some(spare));
        assert_eq!(
            Command::AddTeleport { location: a, teleport: None }.apply(&mut game),
            Err(GameError::TeleportSlotOccupied(a))
        );
    }

    #[test]
    fn test_built_teleports_are_linked_after_deployment() {
        let mut game = Game::default();
        let first = created(
            Command::CreateAsteroid {
                x: 0.0,
                y: 0.0,
                surface_thickness: 0,
                substance: None,
            }
            .apply(&mut game),
        );
        let second = created(
            Command::CreateAsteroid {
                x: 2.0,
                y: 0.0,
                surface_thickness: 0,
                substance: None,
            }
            .apply(&mut game),
        );
        Command::AddNeighbor { a: first[0], b: second[0] }
            .apply(&mut game)
            .unwrap();
        let settler = created(Command::CreateSettler { asteroid: first[1] }.apply(&mut game))[0];
        for kind in [
            MaterialKind::Iron,
            MaterialKind::Iron,
            MaterialKind::Waterice,
            MaterialKind::Uranium,
        ] {
            let material = created(Command::CreateMaterial { kind }.apply(&mut game))[0];
            Command::SettlerAddMaterial { settler, material }
                .apply(&mut game)
                .unwrap();
        }

        let pair = created(Command::SettlerBuildTeleport { settler }.apply(&mut game));
        Command::SpaceshipMove { ship: settler, target: second[0] }
            .apply(&mut game)
            .unwrap();
        Command::SettlerDeployTeleport { settler }.apply(&mut game).unwrap();
        Command::LinkTeleports { a: first[0], b: second[0] }
            .apply(&mut game)
            .unwrap();

        assert_eq!(game.teleport(pair[0]).unwrap().partner(), Some(pair[1]));
        assert_eq!(
            Command::SettlerUseTeleport { settler, teleport: pair[1] }.apply(&mut game),
            Ok(CommandOutput::Moved { asteroid: first[1] })
        );
    }

    #[test]
    fn test_start_resets_field() {
        let mut game = Game::default();
        Command::CreateSun { x: 0.0, y: 0.0 }.apply(&mut game).unwrap();

        Command::Start.apply(&mut game).unwrap();

        assert_eq!(game.entity_count(), 0);
        let after = created(Command::CreateTeleport.apply(&mut game))[0];
        assert_eq!(after, EntityId(2));
    }

    #[test]
    fn test_show_game_state() {
        let mut game = Game::default();
        Command::CreateSun { x: 0.0, y: 0.0 }.apply(&mut game).unwrap();

        match Command::ShowGameState.apply(&mut game) {
            Ok(CommandOutput::State(snapshot)) => assert_eq!(snapshot.locations.len(), 1),
            other => panic!("expected a snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_commands_serialize() {
        let command = Command::SpaceshipMove {
            ship: EntityId(3),
            target: EntityId(1),
        };
        let json = serde_json::to_string(&command).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
        assert_eq!(back.name(), "SpaceshipMove");
    }
}
