use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Size},
};

use crate::render::Blit;

pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT / 8;

/// Monochrome framebuffer of the device display. Row major, MSB first,
/// a set bit is a dark pixel.
pub struct Framebuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self { buffer: [0; BUFFER_SIZE] }
    }
}

impl Framebuffer {
    pub fn as_bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.buffer
    }

    pub fn clear_screen(&mut self) {
        self.buffer.fill(0);
    }

    fn index(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return None;
        }
        let index = y as usize * WIDTH + x as usize;
        Some((index / 8, 7 - (index % 8) as u8))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        let Some((byte_index, bit_index)) = Self::index(x, y) else {
            return;
        };
        match color {
            BinaryColor::On => self.buffer[byte_index] |= 1 << bit_index,
            BinaryColor::Off => self.buffer[byte_index] &= !(1 << bit_index),
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::index(x, y)
            .map(|(byte_index, bit_index)| (self.buffer[byte_index] >> bit_index) & 1 == 1)
            .unwrap_or(false)
    }

    pub fn count_set(&self) -> u32 {
        self.buffer.iter().map(|byte| byte.count_ones()).sum()
    }
}

impl Blit for Framebuffer {
    fn blit(&mut self, x: i32, y: i32, width: u16, height: u16, bits: &[u8]) {
        let stride = crate::codec::stride(width);
        for row in 0..height as usize {
            for col in 0..width as usize {
                if crate::codec::pixel(bits, stride, col, row) {
                    self.set_pixel(x + col as i32, y + row as i32, BinaryColor::On);
                }
            }
        }
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}
