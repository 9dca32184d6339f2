//! Crossterm terminal backend.
//!
//! [`TerminalRenderer`] maps one layout unit to one terminal cell and paints
//! each widget's background colour, clipped to its ancestors. It wraps any
//! `Write` so it can paint into a buffer as well as a real terminal.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::Renderer;
use crate::geometry::{Colour, DimFloat};
use crate::style::Skin;
use crate::tree::{Frame, WidgetId};

// ---------------------------------------------------------------------------
// Clip rectangles
// ---------------------------------------------------------------------------

/// Cell rectangle, half-open on the right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRect {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl CellRect {
    fn from_frame(origin: DimFloat, frame: &Frame) -> Self {
        let x0 = origin.x.floor() as i32;
        let y0 = origin.y.floor() as i32;
        Self {
            x0,
            y0,
            x1: x0 + frame.size.x.floor() as i32,
            y1: y0 + frame.size.y.floor() as i32,
        }
    }

    fn intersect(self, other: CellRect) -> CellRect {
        CellRect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }
}

// ---------------------------------------------------------------------------
// TerminalRenderer
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// [`Renderer`] calls cannot fail, so the first I/O error is kept and
/// returned by [`finish`](Self::finish).
pub struct TerminalRenderer<W: Write> {
    writer: W,
    screen: CellRect,
    clips: Vec<CellRect>,
    painted: usize,
    error: Option<io::Error>,
}

impl TerminalRenderer<BufWriter<Stdout>> {
    /// Create a renderer over buffered stdout sized to the terminal.
    pub fn stdout() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::new(BufWriter::new(io::stdout()), width, height))
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Create a renderer painting a `width` x `height` cell screen into `writer`.
    pub fn new(writer: W, width: u16, height: u16) -> Self {
        Self {
            writer,
            screen: CellRect {
                x0: 0,
                y0: 0,
                x1: i32::from(width),
                y1: i32::from(height),
            },
            clips: Vec::new(),
            painted: 0,
            error: None,
        }
    }

    /// Enter alternate screen and enable raw mode.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    /// Leave alternate screen and disable raw mode.
    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.writer, cursor::Show, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Number of cells painted since creation.
    pub fn painted(&self) -> usize {
        self.painted
    }

    /// Flush buffered output, reporting the first error seen while painting.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()
    }

    /// Give back the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn clip(&self) -> CellRect {
        self.clips.last().copied().unwrap_or(self.screen)
    }

    fn fill(&mut self, rect: CellRect, colour: Colour) -> io::Result<()> {
        queue!(self.writer, SetBackgroundColor(to_color(colour)))?;
        for y in rect.y0..rect.y1 {
            queue!(self.writer, cursor::MoveTo(rect.x0 as u16, y as u16))?;
            for _ in rect.x0..rect.x1 {
                queue!(self.writer, Print(' '))?;
                self.painted += 1;
            }
        }
        queue!(self.writer, ResetColor)?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn begin_draw(&mut self, _id: WidgetId, frame: &Frame, origin: DimFloat, _force: bool) {
        let clip = self.clip().intersect(CellRect::from_frame(origin, frame));
        self.clips.push(clip);
    }

    fn draw(&mut self, _id: WidgetId, frame: &Frame, origin: DimFloat, skin: &Skin, _force: bool) {
        if !skin.is_drawn() || skin.background_colour.is_transparent() || self.error.is_some() {
            return;
        }
        let rect = self.clip().intersect(CellRect::from_frame(origin, frame));
        if rect.x0 >= rect.x1 || rect.y0 >= rect.y1 {
            return;
        }
        if let Err(err) = self.fill(rect, skin.background_colour) {
            tracing::error!(error = %err, "terminal write failed");
            self.error = Some(err);
        }
    }

    fn end_draw(&mut self, _id: WidgetId, _frame: &Frame) {
        self.clips.pop();
    }
}

// ---------------------------------------------------------------------------
// Colour conversion
// ---------------------------------------------------------------------------

/// Convert a float colour into a 24-bit crossterm colour, ignoring alpha.
pub fn to_color(colour: Colour) -> Color {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(colour.r),
        g: channel(colour.g),
        b: channel(colour.b),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
