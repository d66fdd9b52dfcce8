//! Mapping from input edges to game commands

use super::GameState;
use crate::input::InputAction;

/// A command issued in response to an input edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    Pause,
    Resume,
    Attack,
}

/// Command an edge of `action` issues while the game is in `state`.
///
/// Pause only applies while playing. Pausing hands input to the UI context,
/// where cancel backs out of the pause. Attacks are only meaningful while
/// playing.
#[must_use]
pub fn command_for(action: InputAction, state: GameState) -> Option<GameCommand> {
    match (action, state) {
        (InputAction::Pause, GameState::Playing) => Some(GameCommand::Pause),
        (InputAction::Cancel, GameState::Paused) => Some(GameCommand::Resume),
        (InputAction::Attack, GameState::Playing) => Some(GameCommand::Attack),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_only_while_playing() {
        assert_eq!(
            command_for(InputAction::Pause, GameState::Playing),
            Some(GameCommand::Pause)
        );
        assert_eq!(command_for(InputAction::Pause, GameState::Paused), None);
        assert_eq!(command_for(InputAction::Pause, GameState::Menu), None);
    }

    #[test]
    fn test_cancel_resumes_only_when_paused() {
        assert_eq!(
            command_for(InputAction::Cancel, GameState::Paused),
            Some(GameCommand::Resume)
        );
        assert_eq!(command_for(InputAction::Cancel, GameState::Playing), None);
        assert_eq!(command_for(InputAction::Cancel, GameState::Menu), None);
    }

    #[test]
    fn test_attack_only_while_playing() {
        assert_eq!(
            command_for(InputAction::Attack, GameState::Playing),
            Some(GameCommand::Attack)
        );
        assert_eq!(command_for(InputAction::Attack, GameState::Paused), None);
    }

    #[test]
    fn test_other_edges_issue_nothing() {
        for state in [GameState::Menu, GameState::Playing, GameState::Paused] {
            assert_eq!(command_for(InputAction::Jump, state), None);
            assert_eq!(command_for(InputAction::Interact, state), None);
        }
    }
}
