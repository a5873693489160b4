//! Sequential command execution with failure logging.

use crate::config::SimulationConfig;
use crate::error::GameError;
use crate::world_state::Game;

use super::{Command, CommandOutput};

/// Outcome of one executed command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionRecord {
    pub command: Command,
    pub outcome: Result<CommandOutput, GameError>,
}

/// Drives a game with a stream of commands.
///
/// A failed command is logged and recorded, and execution carries on with
/// the next one.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    game: Game,
    history: Vec<ExecutionRecord>,
}

impl CommandExecutor {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            game: Game::new(config),
            history: Vec::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn history(&self) -> &[ExecutionRecord] {
        &self.history
    }

    /// Apply one command and remember how it went.
    pub fn execute(&mut self, command: Command) -> &ExecutionRecord {
        let outcome = command.apply(&mut self.game);
        match &outcome {
            Ok(_) => tracing::debug!(command = command.name(), "command applied"),
            Err(error) => tracing::warn!(
                command = command.name(),
                kind = error.kind(),
                %error,
                "command rejected"
            ),
        }

        let index = self.history.len();
        self.history.push(ExecutionRecord { command, outcome });
        &self.history[index]
    }

    /// Apply a batch in order. Returns how many commands failed.
    pub fn execute_all(&mut self, commands: impl IntoIterator<Item = Command>) -> usize {
        commands
            .into_iter()
            .map(|command| self.execute(command).outcome.is_err())
            .filter(|failed| *failed)
            .count()
    }

    pub fn into_game(self) -> Game {
        self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EntityId;
    use crate::mechanics::MaterialKind;

    #[test]
    fn test_failures_do_not_stop_execution() {
        let mut executor = CommandExecutor::default();

        let failed = executor.execute_all([
            Command::CreateAsteroid {
                x: 0.0,
                y: 0.0,
                surface_thickness: 1,
                substance: None,
            },
            Command::SettlerDrill {
                settler: EntityId(42),
            },
            Command::CreateSettler {
                asteroid: EntityId(1),
            },
            Command::SettlerDrill {
                settler: EntityId(2),
            },
            Command::SettlerDrill {
                settler: EntityId(2),
            },
        ]);

        assert_eq!(failed, 2);
        let history = executor.history();
        assert_eq!(history.len(), 5);
        assert_eq!(
            history[1].outcome,
            Err(GameError::InvalidReference(EntityId(42)))
        );
        assert_eq!(
            history[3].outcome,
            Ok(CommandOutput::Drilled {
                surface_thickness: 0
            })
        );
        assert_eq!(history[4].outcome, Err(GameError::SurfaceThicknessIsZero));
        assert_eq!(
            executor.game().asteroid(EntityId(1)).unwrap().surface_thickness(),
            0
        );
    }

    #[test]
    fn test_execute_returns_record() {
        let mut executor = CommandExecutor::new(SimulationConfig::default());

        let record = executor.execute(Command::CreateMaterial {
            kind: MaterialKind::Coal,
        });

        assert_eq!(record.outcome, Ok(CommandOutput::Created(vec![EntityId(0)])));
        assert!(executor.into_game().is_loose_material(EntityId(0)));
    }
}
