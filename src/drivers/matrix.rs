// 5x5 WS2812 matrix behind any smart-leds writer
//
// Pixels are row-major: index = row * 5 + col, LED 0 first on the
// data line. Channels are capped at MAX_INTENSITY on write; 25 LEDs
// at full white would pull ~1.5A from the board regulator.
// flush() always sends the whole chain, WS2812s latch what they get.

use smart_leds::{RGB8, SmartLedsWrite};

pub const MATRIX_SIDE: usize = 5;
pub const PIXEL_COUNT: usize = MATRIX_SIDE * MATRIX_SIDE;
pub const MAX_INTENSITY: u8 = 40;

pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

#[inline]
pub const fn capped(c: RGB8) -> RGB8 {
    const fn cap(v: u8) -> u8 {
        if v > MAX_INTENSITY { MAX_INTENSITY } else { v }
    }
    RGB8 {
        r: cap(c.r),
        g: cap(c.g),
        b: cap(c.b),
    }
}

#[inline]
pub const fn index_of(row: usize, col: usize) -> usize {
    row * MATRIX_SIDE + col
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrameBuffer {
    pixels: [RGB8; PIXEL_COUNT],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pixels: [OFF; PIXEL_COUNT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(OFF);
    }

    /// Out-of-range indices are ignored.
    pub fn set_pixel(&mut self, index: usize, color: RGB8) {
        if let Some(px) = self.pixels.get_mut(index) {
            *px = capped(color);
        }
    }

    pub fn pixel(&self, index: usize) -> Option<RGB8> {
        self.pixels.get(index).copied()
    }

    pub fn pixels(&self) -> &[RGB8; PIXEL_COUNT] {
        &self.pixels
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LedMatrix<W> {
    leds: W,
    frame: FrameBuffer,
}

impl<W> LedMatrix<W>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    pub fn new(leds: W) -> Self {
        Self {
            leds,
            frame: FrameBuffer::new(),
        }
    }

    pub fn set_pixel(&mut self, index: usize, color: RGB8) {
        self.frame.set_pixel(index, color);
    }

    pub fn clear(&mut self) {
        self.frame.clear();
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn flush(&mut self) -> Result<(), W::Error> {
        self.leds.write(self.frame.pixels.iter().copied())
    }

    pub fn leds(&self) -> &W {
        &self.leds
    }
}
