//! Fixed key/button mapping for the inventory.
//!
//! Digits 1-5 (top row or keypad) select slots 0-4, E / left click places,
//! R / right click removes.

use gridsmith_core::enums::{InputAction, InputKey};
use gridsmith_core::types::SlotIndex;

/// Action bound to `key`, if any.
pub fn map_key(key: InputKey) -> Option<InputAction> {
    let slot = |i| SlotIndex::new(i).map(InputAction::SelectSlot);
    match key {
        InputKey::Digit1 | InputKey::Keypad1 => slot(0),
        InputKey::Digit2 | InputKey::Keypad2 => slot(1),
        InputKey::Digit3 | InputKey::Keypad3 => slot(2),
        InputKey::Digit4 | InputKey::Keypad4 => slot(3),
        InputKey::Digit5 | InputKey::Keypad5 => slot(4),
        InputKey::E | InputKey::MouseLeft => Some(InputAction::Place),
        InputKey::R | InputKey::MouseRight => Some(InputAction::Remove),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_keys_select_in_range_slots() {
        let keys = [
            (InputKey::Digit1, InputKey::Keypad1),
            (InputKey::Digit2, InputKey::Keypad2),
            (InputKey::Digit3, InputKey::Keypad3),
            (InputKey::Digit4, InputKey::Keypad4),
            (InputKey::Digit5, InputKey::Keypad5),
        ];
        for (i, (digit, keypad)) in keys.into_iter().enumerate() {
            let expected = InputAction::SelectSlot(SlotIndex::new(i as u8).unwrap());
            assert_eq!(map_key(digit), Some(expected));
            assert_eq!(map_key(keypad), Some(expected));
        }
    }

    #[test]
    fn test_place_and_remove_bindings() {
        assert_eq!(map_key(InputKey::E), Some(InputAction::Place));
        assert_eq!(map_key(InputKey::MouseLeft), Some(InputAction::Place));
        assert_eq!(map_key(InputKey::R), Some(InputAction::Remove));
        assert_eq!(map_key(InputKey::MouseRight), Some(InputAction::Remove));
    }
}
