use beep::beep;
use std::error::Error;

/// something that can hold a tone while the sound timer runs
pub trait Sound {
    fn beep(&mut self) -> Result<(), Box<dyn Error>>;
    fn stop(&mut self) -> Result<(), Box<dyn Error>>;
}

const DEFAULT_PITCH_HZ: u16 = 1760; // A6

/// square wave out of the PC speaker
pub struct SimpleBeep {
    pitch: u16,
}

impl SimpleBeep {
    pub fn new() -> Self {
        Self::with_pitch(DEFAULT_PITCH_HZ)
    }

    pub fn with_pitch(pitch: u16) -> Self {
        SimpleBeep { pitch }
    }
}

impl Sound for SimpleBeep {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        beep(self.pitch)?;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        beep(0)?;
        Ok(())
    }
}

/// for hosts with no speaker, or tests
pub struct Mute {}

impl Mute {
    pub fn new() -> Self {
        Mute {}
    }
}

impl Sound for Mute {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_is_silent_and_infallible() {
        let mut m = Mute::new();
        assert!(m.beep().is_ok());
        assert!(m.stop().is_ok());
    }
}
