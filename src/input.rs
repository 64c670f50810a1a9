use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

/// map of terminal characters to the 16 logical keys: the digit row
/// covers 0x0-0x9, then a/s/d take 0xA-0xC and z/x/c take 0xD-0xF
const CHIP8_KEYMAP: [(char, u8); 16] = [
    ('0', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('4', 0x04),
    ('5', 0x05),
    ('6', 0x06),
    ('7', 0x07),
    ('8', 0x08),
    ('9', 0x09),
    ('a', 0x0a),
    ('s', 0x0b),
    ('d', 0x0c),
    ('z', 0x0d),
    ('x', 0x0e),
    ('c', 0x0f),
];

/// how long a terminal keypress counts as held. terminals report repeats
/// rather than key-up, so presses decay on a timer instead
const KEY_HOLD: Duration = Duration::from_millis(150);

/// what the keyboard produced this poll
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// logical key index 0x0-0xf plus pressed/released
    Key(u8, bool),
    /// the operator asked to leave
    Quit,
}

/// reads keypresses
pub trait Input {
    /// drain whatever the keyboard produced since the last call
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, io::Error>;
}

/// simple implementation of Input, using the terminal via crossterm
pub struct TermInput {
    keymap: HashMap<char, u8>,
    held: [Option<Instant>; 16],
}

impl TermInput {
    pub fn new() -> Self {
        terminal::enable_raw_mode().unwrap();
        TermInput {
            keymap: HashMap::from(CHIP8_KEYMAP),
            held: [None; 16],
        }
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        terminal::disable_raw_mode().unwrap();
    }
}

impl Input for TermInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, io::Error> {
        let mut events = Vec::new();
        while poll(Duration::from_millis(0))? {
            if let Event::Key(evt) = read()? {
                match evt.code {
                    // raw mode swallows the usual interrupt, so catch it here
                    KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => {
                        events.push(InputEvent::Quit)
                    }
                    KeyCode::Char(key) => match self.keymap.get(&key) {
                        Some(&mapped_key) => {
                            if self.held[mapped_key as usize].is_none() {
                                events.push(InputEvent::Key(mapped_key, true));
                            }
                            self.held[mapped_key as usize] = Some(Instant::now());
                        }
                        None => {
                            eprintln!("Warning: no CHIP-8 key bound to {:?}", key);
                        }
                    },
                    KeyCode::Esc => events.push(InputEvent::Quit),
                    _ => {}
                }
            }
        }
        // expire stale holds into release events
        for (key, slot) in self.held.iter_mut().enumerate() {
            if let Some(last_seen) = slot {
                if last_seen.elapsed() >= KEY_HOLD {
                    *slot = None;
                    events.push(InputEvent::Key(key as u8, false));
                }
            }
        }
        Ok(events)
    }
}

/// dummy Input implementation for testing: plays back scripted batches,
/// then asks to quit
pub struct DummyInput {
    batches: Vec<Vec<InputEvent>>,
}

impl DummyInput {
    pub fn new(batches: Vec<Vec<InputEvent>>) -> Self {
        DummyInput { batches }
    }
}

impl Input for DummyInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, io::Error> {
        if self.batches.is_empty() {
            Ok(vec![InputEvent::Quit])
        } else {
            Ok(self.batches.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_all_sixteen_keys() {
        let map = HashMap::from(CHIP8_KEYMAP);
        assert_eq!(map.len(), 16);
        let mut indices: Vec<u8> = map.values().copied().collect();
        indices.sort_unstable();
        assert_eq!(indices, (0x0..=0xf).collect::<Vec<u8>>());
    }

    #[test]
    fn test_reference_mapping() {
        let map = HashMap::from(CHIP8_KEYMAP);
        assert_eq!(map[&'7'], 0x7);
        assert_eq!(map[&'a'], 0xa);
        assert_eq!(map[&'s'], 0xb);
        assert_eq!(map[&'d'], 0xc);
        assert_eq!(map[&'z'], 0xd);
        assert_eq!(map[&'x'], 0xe);
        assert_eq!(map[&'c'], 0xf);
    }

    #[test]
    fn test_dummy_input_drains_then_quits() -> Result<(), io::Error> {
        let mut input = DummyInput::new(vec![vec![InputEvent::Key(0x5, true)], vec![]]);
        assert_eq!(input.poll_events()?, vec![InputEvent::Key(0x5, true)]);
        assert_eq!(input.poll_events()?, vec![]);
        assert_eq!(input.poll_events()?, vec![InputEvent::Quit]);
        assert_eq!(input.poll_events()?, vec![InputEvent::Quit]);
        Ok(())
    }
}
