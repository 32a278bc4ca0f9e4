//! Activation key routing
//!
//! One key drives the whole game: it starts a session from the menu or the
//! game-over screen and fires the entangled action while playing.

use crate::sim::GamePhase;

/// `KeyboardEvent.code` of the activation key
pub const ACTIVATION_KEY: &str = "Space";

/// What a key press means in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Activate,
}

/// Map the activation edge onto an engine command for `phase`
pub fn route_activation(phase: GamePhase) -> Command {
    match phase {
        GamePhase::Menu | GamePhase::GameOver => Command::Start,
        GamePhase::Playing => Command::Activate,
    }
}

/// Route a key code. `None` for keys the game does not use; the host should
/// leave those to the browser.
pub fn route_key(code: &str, phase: GamePhase) -> Option<Command> {
    (code == ACTIVATION_KEY).then(|| route_activation(phase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_routes_by_phase() {
        assert_eq!(route_key("Space", GamePhase::Menu), Some(Command::Start));
        assert_eq!(route_key("Space", GamePhase::Playing), Some(Command::Activate));
        assert_eq!(route_key("Space", GamePhase::GameOver), Some(Command::Start));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(route_key("Enter", GamePhase::Menu), None);
        assert_eq!(route_key("KeyA", GamePhase::Playing), None);
    }
}
