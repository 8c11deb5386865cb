//! Input mapping from raw key events to semantic actions
//!
//! Maps keyboard input to the few actions every simulation window shares.
//! Pointer input (aiming, placing ships) is read directly by each unit.

use egui::Key;

/// Actions triggered by keys shared across simulations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Close the simulation window (Escape, or Q where enabled)
    Exit,
    /// Clear the scene (R key)
    Reset,
}

/// Which optional bindings a window uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyBindings {
    /// Q also exits
    pub quit_with_q: bool,
}

/// Maps raw key events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map one key event to an action
    ///
    /// Letter keys are ignored while a text field has focus so that typing
    /// into a prompt never triggers them. Escape always exits.
    pub fn map_key(
        key: Key,
        pressed: bool,
        text_focused: bool,
        bindings: KeyBindings,
    ) -> Option<InputAction> {
        // Only handle key presses, not releases
        if !pressed {
            return None;
        }

        match key {
            Key::Escape => Some(InputAction::Exit),
            _ if text_focused => None,
            Key::Q if bindings.quit_with_q => Some(InputAction::Exit),
            Key::R => Some(InputAction::Reset),
            _ => None,
        }
    }

    /// Actions for every key press in this frame's input, repeats excluded
    pub fn actions(ctx: &egui::Context, bindings: KeyBindings) -> Vec<InputAction> {
        let text_focused = ctx.wants_keyboard_input();
        ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed,
                        repeat: false,
                        ..
                    } => Self::map_key(*key, *pressed, text_focused, bindings),
                    _ => None,
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: KeyBindings = KeyBindings { quit_with_q: false };
    const WITH_Q: KeyBindings = KeyBindings { quit_with_q: true };

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_key(Key::Escape, true, false, DEFAULT);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_escape_exits_from_text_field() {
        let action = InputMapper::map_key(Key::Escape, true, true, DEFAULT);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_key(Key::Escape, false, false, DEFAULT);
        assert_eq!(action, None);
    }

    #[test]
    fn test_q_only_when_bound() {
        assert_eq!(InputMapper::map_key(Key::Q, true, false, DEFAULT), None);
        assert_eq!(
            InputMapper::map_key(Key::Q, true, false, WITH_Q),
            Some(InputAction::Exit)
        );
    }

    #[test]
    fn test_reset() {
        assert_eq!(
            InputMapper::map_key(Key::R, true, false, DEFAULT),
            Some(InputAction::Reset)
        );
    }

    #[test]
    fn test_letters_ignored_while_typing() {
        for key in [Key::R, Key::Q] {
            let action = InputMapper::map_key(key, true, true, WITH_Q);
            assert_eq!(action, None, "Key {:?} should not be mapped while typing", key);
        }
    }

    #[test]
    fn test_other_keys_not_mapped() {
        for key in [Key::W, Key::A, Key::Space, Key::Enter] {
            let action = InputMapper::map_key(key, true, false, WITH_Q);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }
}
