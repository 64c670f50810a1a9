use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write as _};
use std::time::{Duration, Instant};

use chip8tty::display::{Display, MonoTermDisplay, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8tty::input::{Input, InputEvent, TermInput};
use chip8tty::interpreter::Chip8Interpreter;
use chip8tty::sound::{Mute, SimpleBeep, Sound};

/// instructions per displayed frame; 10 per 60Hz frame is ~600/s
const STEPS_PER_FRAME: u32 = 10;

/// one 60Hz frame
const FRAME: Duration = Duration::from_micros(16_667);

fn main() -> Result<(), Box<dyn Error>> {
    let mute = env::args().any(|a| a == "--mute");
    let rom_path = match env::args().skip(1).find(|a| !a.starts_with("--")) {
        Some(path) => path,
        None => choose_rom()?,
    };

    // initialise and load
    let rom = fs::read(&rom_path)?;
    let mut vm = Chip8Interpreter::new();
    vm.load_program(&rom)?;

    let title = format!("CHIP-8 - {}", rom_path);
    let mut display = MonoTermDisplay::new(DISPLAY_WIDTH, DISPLAY_HEIGHT, &title)?;
    let mut input = TermInput::new();
    let mut sound: Box<dyn Sound> = if mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };

    run(&mut vm, &mut display, &mut input, sound.as_mut())?;

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    Ok(())
}

/// drive the interpreter at 60 frames a second until the operator quits
/// or the machine faults
fn run(
    vm: &mut Chip8Interpreter,
    display: &mut impl Display,
    input: &mut impl Input,
    sound: &mut dyn Sound,
) -> Result<(), Box<dyn Error>> {
    let mut beeping = false;
    loop {
        let frame_start = Instant::now();

        for event in input.poll_events()? {
            match event {
                InputEvent::Key(key, pressed) => vm.key_event(key, pressed),
                InputEvent::Quit => {
                    sound.stop()?;
                    return Ok(());
                }
            }
        }

        for _ in 0..STEPS_PER_FRAME {
            vm.step()?;
        }

        if vm.tick_60hz() {
            sound.stop()?;
            beeping = false;
        } else if vm.sound_active() && !beeping {
            sound.beep()?;
            beeping = true;
        }

        if vm.frame().needs_redraw() {
            display.draw(vm.frame())?;
            vm.clear_redraw();
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            spin_sleep::sleep(FRAME - elapsed);
        }
    }
}

/// list roms/ and let the operator pick one, or take a path by hand
fn choose_rom() -> Result<String, Box<dyn Error>> {
    let mut roms: Vec<String> = Vec::new();
    if let Ok(entries) = fs::read_dir("roms") {
        for entry in entries {
            roms.push(entry?.path().display().to_string());
        }
    }
    roms.sort();

    println!("CHIP-8 emulator");
    println!("0. enter a ROM path manually");
    for (n, rom) in roms.iter().enumerate() {
        println!("{}. {}", n + 1, rom);
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        stdin.lock().read_line(&mut line)?;
        match line.trim().parse::<usize>() {
            Ok(0) => {
                print!("ROM path: ");
                io::stdout().flush()?;
                let mut path = String::new();
                stdin.lock().read_line(&mut path)?;
                return Ok(path.trim().to_string());
            }
            Ok(n) if n <= roms.len() => return Ok(roms[n - 1].clone()),
            _ => println!("pick a number between 0 and {}", roms.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip8tty::display::DummyDisplay;
    use chip8tty::input::DummyInput;

    #[test]
    fn test_run_loop_quits_on_request() -> Result<(), Box<dyn Error>> {
        let mut vm = Chip8Interpreter::new();
        vm.load_program(&[0x12, 0x00])?; // JP 0x200, forever

        let mut display = DummyDisplay::new();
        // one frame of a held key, then quit
        let mut input = DummyInput::new(vec![vec![
            InputEvent::Key(0x4, true),
            InputEvent::Key(0x4, false),
        ]]);
        let mut sound = Mute::new();
        run(&mut vm, &mut display, &mut input, &mut sound)?;
        // the initial frame got painted before the quit
        assert!(display.frames_drawn >= 1);
        Ok(())
    }

    #[test]
    fn test_run_loop_halts_on_machine_fault() -> Result<(), Box<dyn Error>> {
        let mut vm = Chip8Interpreter::new();
        vm.load_program(&[0xff, 0xff])?;

        let mut display = DummyDisplay::new();
        let mut input = DummyInput::new(vec![vec![], vec![]]);
        let mut sound = Mute::new();
        let result = run(&mut vm, &mut display, &mut input, &mut sound);
        assert!(result.is_err());
        Ok(())
    }
}
