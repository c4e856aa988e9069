use crate::constants::KEY_COUNT;

/// # Keyboard
/// Reports which of the 16 logical keys (0x0..=0xF) are held down right now.
///
/// Implementations own the mapping from host input to logical keys; the
/// Machine only ever sees key values.
pub trait Keyboard {
    /// Whether logical key `key` is currently pressed
    fn is_pressed(&self, key: u8) -> bool;

    /// The lowest-numbered key currently pressed, if any
    fn pressed_key(&self) -> Option<u8> {
        (0..KEY_COUNT).find(|key| self.is_pressed(*key))
    }
}

/// A snapshot of the hex keypad.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT as usize],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of `key`; values above 0xF are ignored
    pub fn press(&mut self, key: u8) {
        if let Some(pressed) = self.pressed.get_mut(key as usize) {
            *pressed = true;
        }
    }

    /// Unset the pressed status of `key`
    pub fn release(&mut self, key: u8) {
        if let Some(pressed) = self.pressed.get_mut(key as usize) {
            *pressed = false;
        }
    }

    pub fn clear(&mut self) {
        self.pressed = [false; KEY_COUNT as usize];
    }
}

impl Keyboard for Keypad {
    fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xA);
        assert!(keypad.is_pressed(0xA));
        keypad.release(0xA);
        assert!(!keypad.is_pressed(0xA));
    }

    #[test]
    fn test_lowest_key_wins() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.pressed_key(), None);
        keypad.press(0xF);
        keypad.press(0x3);
        assert_eq!(keypad.pressed_key(), Some(0x3));
    }

    #[test]
    fn test_out_of_range_keys_are_ignored() {
        let mut keypad = Keypad::new();
        keypad.press(0x10);
        assert!(!keypad.is_pressed(0x10));
        assert_eq!(keypad.pressed_key(), None);
    }

    #[test]
    fn test_clear() {
        let mut keypad = Keypad::new();
        keypad.press(0x0);
        keypad.press(0x1);
        keypad.clear();
        assert_eq!(keypad, Keypad::new());
    }
}
