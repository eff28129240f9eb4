use chip8_vm::emulator::input::InputEvent;
use chip8_vm::emulator::NUM_KEYS;
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};

/// Terminals only report presses, so a key counts as held
/// for this long after its last press.
pub const HOLD_TIME: Duration = Duration::from_millis(250);

/// Turns a stream of terminal key presses into press and release events.
pub struct KeyManager {
    hold_time: Duration,
    held_since: [Option<Instant>; NUM_KEYS],
}

impl KeyManager {
    pub fn new(hold_time: Duration) -> KeyManager {
        KeyManager {
            hold_time,
            held_since: [None; NUM_KEYS],
        }
    }

    /// Record a press. Only the first press of a held key produces an event.
    pub fn press(&mut self, key: u8, now: Instant) -> Option<InputEvent> {
        let slot = self.held_since.get_mut(key as usize)?;
        let was_held = slot.is_some();
        *slot = Some(now);
        if was_held {
            None
        } else {
            Some(InputEvent::KeyDown(key))
        }
    }

    /// Release every key that has not been pressed again within the hold time.
    pub fn expire(&mut self, now: Instant) -> Vec<InputEvent> {
        let hold_time = self.hold_time;
        let mut released = Vec::new();
        for (key, slot) in self.held_since.iter_mut().enumerate() {
            if let Some(since) = *slot {
                if now.duration_since(since) >= hold_time {
                    *slot = None;
                    released.push(InputEvent::KeyUp(key as u8));
                }
            }
        }
        released
    }
}

/// Map the 4x4 block of keys starting at `1` onto the hexadecimal keypad.
pub fn key_to_u8(key: KeyCode) -> Option<u8> {
    let c = match key {
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };
    match c {
        '1' => Some(0x1),
        '2' => Some(0x2),
        '3' => Some(0x3),
        '4' => Some(0xC),
        'q' => Some(0x4),
        'w' => Some(0x5),
        'e' => Some(0x6),
        'r' => Some(0xD),
        'a' => Some(0x7),
        's' => Some(0x8),
        'd' => Some(0x9),
        'f' => Some(0xE),
        'z' => Some(0xA),
        'x' => Some(0x0),
        'c' => Some(0xB),
        'v' => Some(0xF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_presses_keep_the_key_held() {
        let start = Instant::now();
        let mut keys = KeyManager::new(Duration::from_millis(100));
        assert_eq!(keys.press(0x5, start), Some(InputEvent::KeyDown(0x5)));
        assert_eq!(keys.press(0x5, start + Duration::from_millis(60)), None);
        assert_eq!(keys.expire(start + Duration::from_millis(120)), vec![]);
        assert_eq!(
            keys.expire(start + Duration::from_millis(160)),
            vec![InputEvent::KeyUp(0x5)]
        );
    }

    #[test]
    fn keypad_layout() {
        assert_eq!(key_to_u8(KeyCode::Char('x')), Some(0x0));
        assert_eq!(key_to_u8(KeyCode::Char('V')), Some(0xF));
        assert_eq!(key_to_u8(KeyCode::Char('4')), Some(0xC));
        assert_eq!(key_to_u8(KeyCode::Char('p')), None);
        assert_eq!(key_to_u8(KeyCode::Esc), None);
    }
}
