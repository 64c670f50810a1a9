use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
const PIXEL_COUNT: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// The monochrome framebuffer the interpreter draws into. Pixels are
/// stored row-major as `y * 64 + x`; coordinates wrap at both edges.
///
/// The redraw flag is raised whenever the contents change and is only
/// ever lowered by the consumer, once it has rendered the frame.
pub struct FrameBuffer {
    pixels: [bool; PIXEL_COUNT],
    redraw: bool,
}

impl FrameBuffer {
    /// all pixels off; redraw raised so a host paints the first frame
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [false; PIXEL_COUNT],
            redraw: true,
        }
    }

    /// switch every pixel off and raise the redraw flag
    pub fn clear(&mut self) {
        self.pixels = [false; PIXEL_COUNT];
        self.redraw = true;
    }

    /// pixel state at (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[(y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + (x % DISPLAY_WIDTH)]
    }

    /// XOR-toggle the pixel at (x, y); returns whether it was lit before,
    /// i.e. whether this toggle is a sprite collision
    pub fn flip(&mut self, x: usize, y: usize) -> bool {
        let i = (y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + (x % DISPLAY_WIDTH);
        let was_lit = self.pixels[i];
        self.pixels[i] = !was_lit;
        was_lit
    }

    pub fn mark_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// consumer acknowledges it has rendered the current frame
    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }
}

/// Display is used by the host loop to put the framebuffer on a screen.
/// It should abstract the implementation details, so a variety of kinds
/// of screen would work.
pub trait Display {
    /// render a full frame
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error>;
}

// store useful metadata about the terminal
struct Resolution(usize, usize);

impl Resolution {
    fn pixel_count(&self) -> usize {
        self.0 * self.1
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// x, y float coords of every pixel in the given state, suitable for
    /// rendering with TUI
    fn plane_from_pixels<'a>(
        &self,
        pixels: &'a [bool],
        lit: bool,
    ) -> impl std::iter::Iterator<Item = (f64, f64)> + 'a {
        let mut count = self.pixel_count();
        let w = self.0;
        std::iter::from_fn(move || {
            while count > 0 {
                count -= 1;
                if pixels[count] == lit {
                    return Some((
                        (count % w) as f64,        // x
                        -1.0 * (count / w) as f64, // y
                    ));
                }
            }
            None
        })
    }
}

/// monochrome display in a terminal, rendered using TUI over crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
    title: String,
}

impl MonoTermDisplay {
    pub fn new(x: usize, y: usize, title: &str) -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(x, y),
            title: title.to_string(),
        })
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error> {
        // make sure we're given exactly the right amount of data to draw
        assert_eq!(
            frame.pixels().len(),
            self.resolution.pixel_count(),
            "MonoTermDisplay must have correct-sized data to draw"
        );

        // this assumes a 1:1 ratio between terminal cells, chip8 pixels
        // and the internal TUI canvas
        let resolution = &self.resolution;
        let title = self.title.as_str();
        self.terminal.draw(|f| {
            let size = Rect::new(0, 0, 2 + resolution.0 as u16, 2 + resolution.1 as u16);

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(resolution.x_bounds())
                .y_bounds(resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &resolution
                            .plane_from_pixels(frame.pixels(), false)
                            .collect::<Vec<_>>(),
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &resolution
                            .plane_from_pixels(frame.pixels(), true)
                            .collect::<Vec<_>>(),
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// useful for testing non-display routines
pub struct DummyDisplay {
    pub frames_drawn: usize,
}

impl DummyDisplay {
    pub fn new() -> Self {
        DummyDisplay { frames_drawn: 0 }
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, _frame: &FrameBuffer) -> Result<(), io::Error> {
        self.frames_drawn += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // FrameBuffer tests
    #[test]
    fn test_new_frame_is_dark_and_dirty() {
        let fb = FrameBuffer::new();
        assert!(fb.pixels().iter().all(|&p| !p));
        assert!(fb.needs_redraw());
    }

    #[test]
    fn test_flip_toggles_and_reports_collision() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.flip(3, 5)); // was dark: no collision
        assert!(fb.get(3, 5));
        assert!(fb.flip(3, 5)); // was lit: collision
        assert!(!fb.get(3, 5));
    }

    #[test]
    fn test_coordinates_wrap_both_edges() {
        let mut fb = FrameBuffer::new();
        fb.flip(DISPLAY_WIDTH + 3, DISPLAY_HEIGHT + 1);
        assert!(fb.get(3, 1));
        assert!(fb.get(DISPLAY_WIDTH + 3, 1));
    }

    #[test]
    fn test_clear_resets_pixels_and_raises_redraw() {
        let mut fb = FrameBuffer::new();
        fb.flip(10, 10);
        fb.clear_redraw();
        fb.clear();
        assert!(!fb.get(10, 10));
        assert!(fb.needs_redraw());
    }

    #[test]
    fn test_only_consumer_lowers_redraw() {
        let mut fb = FrameBuffer::new();
        fb.clear_redraw();
        assert!(!fb.needs_redraw());
        fb.mark_redraw();
        assert!(fb.needs_redraw());
    }

    // Resolution tests
    #[test]
    fn test_pixel_count() {
        let r = Resolution(64, 32);
        assert_eq!(r.pixel_count(), 2048)
    }

    #[test]
    fn test_x_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.x_bounds(), [0.0, 63.0]);
    }

    #[test]
    fn test_y_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.y_bounds(), [-31.0, 0.0]);
    }

    #[test]
    fn test_plane_iterator_splits_lit_and_dark() {
        let r = Resolution(64, 32);
        let mut fb = FrameBuffer::new();
        fb.flip(0, 0);
        fb.flip(63, 31);
        let lit: Vec<_> = r.plane_from_pixels(fb.pixels(), true).collect();
        assert_eq!(lit.len(), 2);
        assert!(lit.contains(&(0.0, 0.0)));
        assert!(lit.contains(&(63.0, -31.0)));
        let dark = r.plane_from_pixels(fb.pixels(), false).count();
        assert_eq!(dark, 2046);
    }
}
