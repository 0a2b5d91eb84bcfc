use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point},
};
use log::{error, trace, warn};

use crate::{animation::IconAnimation, codec::DecodeError, icon::Icon};

/// Display-side primitive that draws a decoded bitmap with its top-left
/// corner at `(x, y)`. `bits` uses the row padded layout of [`crate::codec`].
pub trait Blit {
    fn blit(&mut self, x: i32, y: i32, width: u16, height: u16, bits: &[u8]);
}

/// Anything that can name the frame to draw right now.
pub trait FrameSource {
    fn current_frame(&self) -> Option<&Icon<'_>>;
}

impl FrameSource for Icon<'_> {
    fn current_frame(&self) -> Option<&Icon<'_>> {
        Some(self)
    }
}

impl FrameSource for IconAnimation<'_> {
    fn current_frame(&self) -> Option<&Icon<'_>> {
        IconAnimation::current_frame(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
    Drawn,
    /// Nothing to draw, e.g. a finished hiding animation.
    Hidden,
}

/// Fixed capacity decode buffer, reused across frames.
pub struct ScratchBuffer<const N: usize> {
    bytes: heapless::Vec<u8, N>,
}

impl<const N: usize> Default for ScratchBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ScratchBuffer<N> {
    pub const fn new() -> Self {
        Self { bytes: heapless::Vec::new() }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Zeroed slice of exactly `len` bytes.
    pub fn acquire(&mut self, len: usize) -> Result<&mut [u8], DecodeError> {
        let too_small = DecodeError::BufferTooSmall { needed: len, available: N };
        if len > N {
            return Err(too_small);
        }
        self.bytes.clear();
        self.bytes.resize(len, 0).map_err(|_| too_small)?;
        Ok(self.bytes.as_mut_slice())
    }
}

/// Decodes the current frame of `source` and blits it at `position`.
///
/// A malformed payload is logged and returned without touching `target`.
pub fn render<S, B, const N: usize>(
    source: &S,
    target: &mut B,
    position: Point,
    scratch: &mut ScratchBuffer<N>,
) -> Result<Rendered, DecodeError>
where
    S: FrameSource + ?Sized,
    B: Blit + ?Sized,
{
    let Some(icon) = source.current_frame() else {
        trace!("Nothing to render");
        return Ok(Rendered::Hidden);
    };
    let bits = scratch.acquire(icon.buffer_size()).inspect_err(|err| {
        error!("Cannot render {}x{} frame: {}", icon.width(), icon.height(), err);
    })?;
    icon.decode_into(bits).inspect_err(|err| {
        error!("Corrupt {}x{} frame: {}", icon.width(), icon.height(), err);
    })?;
    target.blit(position.x, position.y, icon.width(), icon.height(), bits);
    Ok(Rendered::Drawn)
}

/// Adapts any embedded-graphics binary draw target into a [`Blit`] sink.
/// Only set bits are drawn, in `ink`.
pub struct DrawTargetBlit<'d, D> {
    target: &'d mut D,
    ink: BinaryColor,
}

impl<'d, D> DrawTargetBlit<'d, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(target: &'d mut D) -> Self {
        Self { target, ink: BinaryColor::On }
    }

    pub fn with_ink(target: &'d mut D, ink: BinaryColor) -> Self {
        Self { target, ink }
    }
}

impl<D> Blit for DrawTargetBlit<'_, D>
where
    D: DrawTarget<Color = BinaryColor>,
    D::Error: core::fmt::Debug,
{
    fn blit(&mut self, x: i32, y: i32, width: u16, height: u16, bits: &[u8]) {
        let stride = crate::codec::stride(width);
        let ink = self.ink;
        let pixels = (0..height as usize).flat_map(move |row| {
            (0..width as usize)
                .filter(move |&col| crate::codec::pixel(bits, stride, col, row))
                .map(move |col| Pixel(Point::new(x + col as i32, y + row as i32), ink))
        });
        if let Err(err) = self.target.draw_iter(pixels) {
            warn!("Blit of {}x{} at ({}, {}) failed: {:?}", width, height, x, y, err);
        }
    }
}
