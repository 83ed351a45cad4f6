use crate::config::KeyConfig;
use crate::game::{InputSource, Renderer};
use crate::{Coords, TermInt};
use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};

/// Terminal size in cells.
pub fn size() -> io::Result<Coords> {
    terminal::size()
}

/// Alternate screen, raw mode, hidden cursor.
pub fn setup() -> io::Result<()> {
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, terminal::Clear(ClearType::All))?;
    terminal::enable_raw_mode()?;
    execute!(out, cursor::Hide, cursor::DisableBlinking)
}

pub fn restore() -> io::Result<()> {
    let mut out = stdout();
    terminal::disable_raw_mode()?;
    execute!(out, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
}

/// Keyboard input, translated to the configured key characters.
///
/// Arrow keys stand for the configured direction keys, Esc and Ctrl+C for
/// the stop key.
pub struct TermInput {
    keys: KeyConfig,
}

impl TermInput {
    pub fn new(keys: KeyConfig) -> Self {
        TermInput { keys }
    }

    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    pub fn translate(&self, ev: &KeyEvent) -> Option<char> {
        match ev.code {
            KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some(self.keys.stop),
            KeyCode::Esc => Some(self.keys.stop),
            KeyCode::Up => Some(self.keys.up),
            KeyCode::Down => Some(self.keys.down),
            KeyCode::Left => Some(self.keys.left),
            KeyCode::Right => Some(self.keys.right),
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl InputSource for TermInput {
    fn poll_key(&mut self) -> io::Result<Option<char>> {
        // One key press per tick; the rest stay queued for later ticks.
        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(self.translate(&ev));
                }
            }
        }
        Ok(None)
    }
}

/// Cursor-positioned output. Grid coordinates are 1-indexed, the terminal's are not.
pub struct TermScreen {
    stdout: Stdout,
}

impl TermScreen {
    pub fn new() -> Self {
        TermScreen { stdout: stdout() }
    }

    /// A boxed message centred on `center`.
    pub fn show_message(&mut self, lines: &[&str], center: Coords) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let top_left = (
            center.0.saturating_sub(msg_width / 2).max(1),
            center.1.saturating_sub(msg_height / 2).max(1),
        );

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.draw((top_left.0 + x_diff, y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.draw((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.flush()
    }
}

impl Default for TermScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TermScreen {
    fn draw(&mut self, pos: Coords, symbol: char) -> io::Result<()> {
        if pos.0 == 0 || pos.1 == 0 {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.0 - 1, pos.1 - 1), style::Print(symbol))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn arrows_and_ctrl_c_map_to_bound_keys() {
        let input = TermInput::new(KeyConfig::default());

        assert_eq!(input.translate(&key(KeyCode::Up, KeyModifiers::NONE)), Some('z'));
        assert_eq!(input.translate(&key(KeyCode::Left, KeyModifiers::NONE)), Some('q'));
        assert_eq!(input.translate(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some('a'));
        assert_eq!(input.translate(&key(KeyCode::Esc, KeyModifiers::NONE)), Some('a'));
        assert_eq!(input.translate(&key(KeyCode::Char('p'), KeyModifiers::NONE)), Some('p'));
        assert_eq!(input.translate(&key(KeyCode::Tab, KeyModifiers::NONE)), None);
    }
}
