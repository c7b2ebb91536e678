//! Device input mapping
//!
//! Every device collapses to a handful of actions; the simulation only ever
//! sees [`Action::Jump`] through `sim::jump`.

/// What a key, click or tap means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start, flap, or dismiss the game-over screen
    Jump,
    /// Toggle idle/demo mode
    ToggleAutopilot,
    // Settings toggles, saved as soon as they change
    CycleQuality,
    ToggleBubbles,
    ToggleFps,
    ToggleReducedMotion,
    ToggleHighContrast,
}

/// Map a `KeyboardEvent.code` to an action
pub fn key_action(code: &str) -> Option<Action> {
    match code {
        "Space" | "ArrowUp" => Some(Action::Jump),
        "KeyI" => Some(Action::ToggleAutopilot),
        "KeyQ" => Some(Action::CycleQuality),
        "KeyB" => Some(Action::ToggleBubbles),
        "KeyF" => Some(Action::ToggleFps),
        "KeyM" => Some(Action::ToggleReducedMotion),
        "KeyC" => Some(Action::ToggleHighContrast),
        _ => None,
    }
}

/// Pointer presses and touches always jump
pub fn pointer_action() -> Action {
    Action::Jump
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_keys() {
        assert_eq!(key_action("Space"), Some(Action::Jump));
        assert_eq!(key_action("ArrowUp"), Some(Action::Jump));
        assert_eq!(pointer_action(), Action::Jump);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(key_action("ArrowDown"), None);
        assert_eq!(key_action("Enter"), None);
        assert_eq!(key_action("KeyI"), Some(Action::ToggleAutopilot));
    }

    #[test]
    fn test_settings_keys() {
        assert_eq!(key_action("KeyQ"), Some(Action::CycleQuality));
        assert_eq!(key_action("KeyB"), Some(Action::ToggleBubbles));
        assert_eq!(key_action("KeyF"), Some(Action::ToggleFps));
        assert_eq!(key_action("KeyM"), Some(Action::ToggleReducedMotion));
        assert_eq!(key_action("KeyC"), Some(Action::ToggleHighContrast));
    }
}
