//! Frame buffer for the 8x8 matrix and the display trait it is flushed to.
//!
//! Animations draw into an owned [`Frame`] through the `embedded-graphics`
//! API. Once per loop iteration the frame is pushed to the hardware with
//! [`Frame::flush`].

use crate::colors::{self, BLACK};
use core::convert::Infallible;
use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Size};
use palette::Srgb;

/// Number of LED columns.
pub const MATRIX_WIDTH: usize = 8;

/// Number of LED rows.
pub const MATRIX_HEIGHT: usize = 8;

/// Trait for abstracting the LED matrix hardware.
///
/// `x` grows rightwards and `y` grows downwards; the implementation maps
/// this onto its wiring order. Handle any hardware errors internally - these
/// methods cannot fail.
pub trait MatrixDisplay {
    /// Stages the color of a single pixel.
    fn set_pixel(&mut self, x: u8, y: u8, color: Srgb<u8>);

    /// Pushes all staged pixels to the LEDs.
    fn present(&mut self);
}

/// An in-memory image of the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: [[Srgb<u8>; MATRIX_WIDTH]; MATRIX_HEIGHT],
}

impl Frame {
    /// Creates an all-black frame.
    pub const fn new() -> Self {
        Self {
            pixels: [[BLACK; MATRIX_WIDTH]; MATRIX_HEIGHT],
        }
    }

    /// Sets every pixel to black.
    pub fn clear(&mut self) {
        self.pixels = [[BLACK; MATRIX_WIDTH]; MATRIX_HEIGHT];
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the matrix.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb<u8>> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Sets the pixel at `(x, y)`. Coordinates outside the matrix are ignored.
    pub fn set(&mut self, x: usize, y: usize, color: Srgb<u8>) {
        if let Some(pixel) = self.pixels.get_mut(y).and_then(|row| row.get_mut(x)) {
            *pixel = color;
        }
    }

    /// Number of pixels that are not black.
    pub fn lit_count(&self) -> usize {
        self.pixels
            .iter()
            .flatten()
            .filter(|pixel| **pixel != BLACK)
            .count()
    }

    /// Writes every pixel, scaled by `brightness`, to the display and presents it.
    pub fn flush<D: MatrixDisplay>(&self, display: &mut D, brightness: u8) {
        for (y, row) in self.pixels.iter().enumerate() {
            for (x, pixel) in row.iter().enumerate() {
                display.set_pixel(x as u8, y as u8, colors::scale(*pixel, brightness));
            }
        }
        display.present();
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a palette color into the `embedded-graphics` color type.
#[inline]
pub fn to_rgb888(color: Srgb<u8>) -> Rgb888 {
    Rgb888::new(color.red, color.green, color.blue)
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(MATRIX_WIDTH as u32, MATRIX_HEIGHT as u32)
    }
}

impl DrawTarget for Frame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0 && coord.y >= 0 {
                self.set(
                    coord.x as usize,
                    coord.y as usize,
                    Srgb::new(color.r(), color.g(), color.b()),
                );
            }
        }
        Ok(())
    }
}
