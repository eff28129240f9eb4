use super::NUM_KEYS;

/// State of the hexadecimal keypad, keys 0x0 through 0xF.
#[derive(Debug, Default)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Mark a key as held down. Returns false if there is no such key.
    pub fn press(&mut self, key: u8) -> bool {
        self.set(key, true)
    }

    /// Mark a key as released. Returns false if there is no such key.
    pub fn release(&mut self, key: u8) -> bool {
        self.set(key, false)
    }

    /// Keys outside the keypad are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest key currently held down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|pressed| *pressed).map(|key| key as u8)
    }

    fn set(&mut self, key: u8, pressed: bool) -> bool {
        match self.keys.get_mut(key as usize) {
            Some(state) => {
                *state = pressed;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut keypad = Keypad::new();
        assert!(keypad.press(0xA));
        assert!(keypad.is_pressed(0xA));
        assert!(keypad.release(0xA));
        assert!(!keypad.is_pressed(0xA));
    }

    #[test]
    fn first_pressed_is_the_lowest() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.press(0xC);
        keypad.press(0x3);
        assert_eq!(keypad.first_pressed(), Some(0x3));
    }

    #[test]
    fn keys_outside_the_keypad_are_ignored() {
        let mut keypad = Keypad::new();
        assert!(!keypad.press(0x10));
        assert!(!keypad.is_pressed(0x10));
        assert_eq!(keypad.first_pressed(), None);
    }
}
