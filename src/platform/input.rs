//! Input events and key mapping
//!
//! Browser listeners translate raw events into `InputEvent`s and post them
//! to the engine; nothing else happens inside a listener.

/// Control input posted by a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Rise key or pointer went down
    RisePressed,
    /// Rise key or pointer went up
    RiseReleased,
    PauseToggled,
    Restart,
    /// Pointer click on the surface
    Click,
}

/// Map a `KeyboardEvent.code` to an input event
///
/// Returns the event and whether the browser default should be suppressed.
pub fn key_event(code: &str, pressed: bool) -> Option<(InputEvent, bool)> {
    match (code, pressed) {
        ("Space" | "ArrowUp", true) => Some((InputEvent::RisePressed, true)),
        ("Space" | "ArrowUp", false) => Some((InputEvent::RiseReleased, true)),
        ("KeyP", true) => Some((InputEvent::PauseToggled, false)),
        ("Enter", true) => Some((InputEvent::Restart, true)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rise_keys() {
        assert_eq!(key_event("Space", true), Some((InputEvent::RisePressed, true)));
        assert_eq!(key_event("ArrowUp", false), Some((InputEvent::RiseReleased, true)));
    }

    #[test]
    fn test_control_keys_fire_on_press_only() {
        assert_eq!(key_event("KeyP", true), Some((InputEvent::PauseToggled, false)));
        assert_eq!(key_event("KeyP", false), None);
        assert_eq!(key_event("Enter", true), Some((InputEvent::Restart, true)));
        assert_eq!(key_event("Enter", false), None);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(key_event("KeyA", true), None);
        assert_eq!(key_event("ArrowDown", true), None);
    }
}
