use crate::{Coords, TermInt};
use crate::render::{Canvas, BACKGROUND};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use log::{debug, warn};

// Two grid rows share one terminal row: foreground paints the upper
// pixel, background the lower one.
const HALF_BLOCK: char = '▀';

#[derive(Copy, Clone, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    active: bool,
    grid_width: i32,
    grid_height: i32,
    pixels: Vec<Color>,
    text: Vec<Option<(char, Color)>>,
    shown: Vec<Option<Cell>>,
    full_redraw: bool,
}

impl TermManager {
    pub fn new(grid_width: i32, grid_height: i32) -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(width, height, grid_width, grid_height))
    }

    fn with_size(width: TermInt, height: TermInt, grid_width: i32, grid_height: i32) -> Self {
        let text_rows = (grid_height + 1) / 2;

        TermManager {
            width,
            height,
            stdout: stdout(),
            active: false,
            grid_width,
            grid_height,
            pixels: vec![BACKGROUND; (grid_width * grid_height) as usize],
            text: vec![None; (grid_width * text_rows) as usize],
            shown: vec![None; (grid_width * text_rows) as usize],
            full_redraw: true,
        }
    }

    /// Terminal columns and rows needed for the bordered playfield.
    pub fn required_size(&self) -> Coords {
        let (cols, rows) = self.text_grid();
        (cols + 2, rows + 2)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width as i32, self.height as i32)
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, terminal::SetTitle("Snake"))?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.full_redraw = true;
        Ok(())
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Drains key events, waiting up to `timeout` for the first one.
    /// Resizes are handled here and never reach the caller.
    pub fn read_key_events_queue(&mut self, timeout: Duration) -> crossterm::Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = timeout;

        while poll(wait)? {
            match read()? {
                Event::Key(ev) => events.push(ev),
                Event::Resize(w, h) => self.resize(w, h),
                _ => {}
            }
            wait = Duration::from_millis(0);
        }

        Ok(events)
    }

    /// Writes every cell that changed since the last call.
    pub fn present(&mut self) -> crossterm::Result<()> {
        let (cols, rows) = self.text_grid();
        let (left, top) = self.origin();

        if self.full_redraw {
            self.full_redraw = false;
            queue!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
            self.draw_borders(left, top)?;
            for cell in self.shown.iter_mut() {
                *cell = None;
            }
        }

        for row in 0..rows {
            for col in 0..cols {
                let idx = (row * cols + col) as usize;
                let cell = self.compose(col, row);

                if self.shown[idx] != Some(cell) {
                    queue!(
                        self.stdout,
                        cursor::MoveTo(left + 1 + col as TermInt, top + 1 + row as TermInt),
                        style::SetForegroundColor(cell.fg),
                        style::SetBackgroundColor(cell.bg),
                        style::Print(cell.ch)
                    )?;
                    self.shown[idx] = Some(cell);
                }
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn resize(&mut self, width: TermInt, height: TermInt) {
        debug!("terminal resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
        self.full_redraw = true;

        let (need_w, need_h) = self.required_size();
        if (width as i32) < need_w || (height as i32) < need_h {
            warn!("terminal is {}x{}, the playfield needs {}x{}", width, height, need_w, need_h);
        }
    }

    // Top-left corner of the border, centring the playfield when there is room.
    fn origin(&self) -> (TermInt, TermInt) {
        let (need_w, need_h) = self.required_size();
        let left = ((self.width as i32 - need_w) / 2).max(0);
        let top = ((self.height as i32 - need_h) / 2).max(0);
        (left as TermInt, top as TermInt)
    }

    fn draw_borders(&mut self, left: TermInt, top: TermInt) -> crossterm::Result<()> {
        let (width, height) = self.required_size();
        let (width, height) = (width as TermInt, height as TermInt);
        let end_x = left + width - 1;
        let end_y = top + height - 1;

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, top), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, end_y), style::Print(ch))?;
        }

        for y in top + 1..end_y {
            queue!(self.stdout, cursor::MoveTo(left, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(end_x, y), style::Print('|'))?;
        }

        Ok(())
    }

    fn compose(&self, col: i32, row: i32) -> Cell {
        let cols = self.grid_width;
        let upper = self.pixel((col, row * 2));
        let lower = self.pixel((col, row * 2 + 1));

        // Text has no background of its own; whatever is lit below shows through
        if let Some((ch, fg)) = self.text[(row * cols + col) as usize] {
            let bg = if upper != BACKGROUND { upper } else { lower };
            return Cell { ch, fg, bg };
        }

        Cell { ch: HALF_BLOCK, fg: upper, bg: lower }
    }

    fn pixel(&self, (x, y): Coords) -> Color {
        if y < self.grid_height {
            self.pixels[(y * self.grid_width + x) as usize]
        } else {
            BACKGROUND
        }
    }
}

impl Canvas for TermManager {
    fn text_grid(&self) -> (i32, i32) {
        (self.grid_width, (self.grid_height + 1) / 2)
    }

    fn clear(&mut self, color: Color) {
        for px in self.pixels.iter_mut() {
            *px = color;
        }
        for t in self.text.iter_mut() {
            *t = None;
        }
    }

    fn set_pixel(&mut self, (x, y): Coords, color: Color) {
        if x >= 0 && y >= 0 && x < self.grid_width && y < self.grid_height {
            self.pixels[(y * self.grid_width + x) as usize] = color;
        }
    }

    fn draw_text(&mut self, row: i32, col: i32, text: &str, color: Color) {
        let (cols, rows) = self.text_grid();
        if row < 0 || row >= rows {
            return;
        }

        for (i, ch) in text.chars().enumerate() {
            let x = col + i as i32;
            if x >= 0 && x < cols {
                self.text[(row * cols + x) as usize] = Some((ch, color));
            }
        }
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("could not restore the terminal: {}", e);
        }
    }
}
