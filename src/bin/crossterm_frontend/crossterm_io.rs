use chip8_vm::emulator::input::{EmulatorInput, InputEvent};
use chip8_vm::emulator::output::EmulatorOutput;
use chip8_vm::emulator::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::key_manager::{key_to_u8, KeyManager, HOLD_TIME};

use crossterm::event::{self, Event, KeyCode};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub struct CrosstermInput {
    key_manager: KeyManager,
}

impl CrosstermInput {
    pub fn new() -> CrosstermInput {
        CrosstermInput {
            key_manager: KeyManager::new(HOLD_TIME),
        }
    }

    fn read_events(&mut self, events: &mut Vec<InputEvent>) -> crossterm::Result<()> {
        while event::poll(Duration::from_secs(0))? {
            if let Event::Key(key_event) = event::read()? {
                log::trace!("Got event {:?}", key_event);
                if key_event.code == KeyCode::Esc {
                    events.push(InputEvent::Quit);
                } else if let Some(key) = key_to_u8(key_event.code) {
                    events.extend(self.key_manager.press(key, Instant::now()));
                }
            }
        }
        Ok(())
    }
}

impl EmulatorInput for CrosstermInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = self.key_manager.expire(Instant::now());
        if let Err(err) = self.read_events(&mut events) {
            log::error!("Could not read terminal events: {}", err);
            events.push(InputEvent::Quit);
        }
        events
    }
}

pub struct CrosstermOutput;

impl CrosstermOutput {
    pub fn new() -> crossterm::Result<CrosstermOutput> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        Ok(CrosstermOutput)
    }

    fn draw(&mut self, frame: &Framebuffer) -> crossterm::Result<()> {
        let mut out = stdout();
        for (y, row) in frame.chunks(SCREEN_WIDTH).enumerate().take(SCREEN_HEIGHT) {
            let line: String = row
                .iter()
                .map(|cell| if *cell == 1 { "██" } else { "  " })
                .collect();
            queue!(out, cursor::MoveTo(0, y as u16), Print(line))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn present(&mut self, frame: &Framebuffer) {
        if let Err(err) = self.draw(frame) {
            log::error!("Could not draw frame: {}", err);
        }
    }
}
