//! Payload format for compiled frame bitmaps.
//!
//! Bitmaps are 1 bit per pixel, MSB first, with every row padded to a whole
//! byte. A set bit is an inked pixel. A payload is a single format tag byte
//! followed by the body:
//!
//! | tag  | format  | body                                                 |
//! |------|---------|------------------------------------------------------|
//! | 0x00 | Raw     | `stride * height` bitmap bytes                       |
//! | 0x01 | Rle     | packets, see below                                   |
//! | 0x02 | Deflate | raw DEFLATE stream inflating to `stride * height`    |
//!
//! RLE packets start with a control byte `c`. If the high bit is set the next
//! byte is repeated `(c & 0x7F) + 1` times, otherwise the next `c + 1` bytes
//! are copied verbatim.

use core::fmt;

use log::trace;
use miniz_oxide::inflate::{
    TINFLStatus,
    core::{DecompressorOxide, decompress, inflate_flags::TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF},
};

/// Bumped whenever the payload layout changes. The asset compiler stamps it
/// into generated sources.
pub const FORMAT_VERSION: u8 = 1;

const RUN_FLAG: u8 = 0x80;
const MAX_PACKET: usize = 128;
// Runs shorter than this are cheaper as part of a literal packet.
const MIN_RUN: usize = 3;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Raw = 0x00,
    Rle = 0x01,
    Deflate = 0x02,
}

impl Format {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(Format::Raw),
            0x01 => Some(Format::Rle),
            0x02 => Some(Format::Deflate),
            _ => None,
        }
    }

    pub fn repr(self) -> &'static str {
        match self {
            Format::Raw => "raw",
            Format::Rle => "rle",
            Format::Deflate => "deflate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    Empty,
    UnknownFormat(u8),
    Truncated,
    Overrun,
    TrailingData,
    BufferTooSmall { needed: usize, available: usize },
    Inflate,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Empty => write!(f, "payload is empty"),
            DecodeError::UnknownFormat(tag) => write!(f, "unknown payload format 0x{tag:02X}"),
            DecodeError::Truncated => write!(f, "payload ends before the frame is complete"),
            DecodeError::Overrun => write!(f, "packet runs past the end of the frame"),
            DecodeError::TrailingData => write!(f, "payload continues after the frame is complete"),
            DecodeError::BufferTooSmall { needed, available } => {
                write!(f, "decode buffer too small ({available} < {needed} bytes)")
            }
            DecodeError::Inflate => write!(f, "deflate stream is corrupt"),
        }
    }
}

impl core::error::Error for DecodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    EmptyFrame,
    OutputTooSmall,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::EmptyFrame => write!(f, "frame has no pixels"),
            EncodeError::OutputTooSmall => write!(f, "output buffer too small"),
        }
    }
}

impl core::error::Error for EncodeError {}

pub type Result<T> = core::result::Result<T, DecodeError>;

/// Bytes per bitmap row.
pub const fn stride(width: u16) -> usize {
    (width as usize).div_ceil(8)
}

/// Bytes needed to hold a decoded `width` x `height` frame.
pub const fn frame_size(width: u16, height: u16) -> usize {
    stride(width) * height as usize
}

/// Worst case encoded size of a `len` byte bitmap, tag included.
pub const fn max_encoded_len(len: usize) -> usize {
    1 + len + len.div_ceil(MAX_PACKET)
}

/// Decodes `payload` into `out`, which must be exactly the decoded frame size.
pub fn decode(payload: &[u8], out: &mut [u8]) -> Result<()> {
    let (&tag, body) = payload.split_first().ok_or(DecodeError::Empty)?;
    let format = Format::from_tag(tag).ok_or(DecodeError::UnknownFormat(tag))?;
    trace!("Decoding {} payload: {} -> {} bytes", format.repr(), body.len(), out.len());
    match format {
        Format::Raw => decode_raw(body, out),
        Format::Rle => decode_rle(body, out),
        Format::Deflate => decode_deflate(body, out),
    }
}

fn decode_raw(body: &[u8], out: &mut [u8]) -> Result<()> {
    if body.len() < out.len() {
        return Err(DecodeError::Truncated);
    }
    if body.len() > out.len() {
        return Err(DecodeError::TrailingData);
    }
    out.copy_from_slice(body);
    Ok(())
}

fn decode_rle(mut body: &[u8], out: &mut [u8]) -> Result<()> {
    let mut pos = 0;
    while pos < out.len() {
        let (&control, rest) = body.split_first().ok_or(DecodeError::Truncated)?;
        let count = (control & !RUN_FLAG) as usize + 1;
        let end = pos + count;
        if end > out.len() {
            return Err(DecodeError::Overrun);
        }
        if control & RUN_FLAG != 0 {
            let (&value, rest) = rest.split_first().ok_or(DecodeError::Truncated)?;
            out[pos..end].fill(value);
            body = rest;
        } else {
            if rest.len() < count {
                return Err(DecodeError::Truncated);
            }
            let (literal, rest) = rest.split_at(count);
            out[pos..end].copy_from_slice(literal);
            body = rest;
        }
        pos = end;
    }
    if !body.is_empty() {
        return Err(DecodeError::TrailingData);
    }
    Ok(())
}

fn decode_deflate(body: &[u8], out: &mut [u8]) -> Result<()> {
    let mut decompressor = DecompressorOxide::new();
    let (status, consumed, written) =
        decompress(&mut decompressor, body, out, 0, TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF);
    match status {
        TINFLStatus::Done => {}
        TINFLStatus::HasMoreOutput => return Err(DecodeError::Overrun),
        TINFLStatus::NeedsMoreInput | TINFLStatus::FailedCannotMakeProgress => {
            return Err(DecodeError::Truncated);
        }
        status => {
            trace!("Inflate failed: {:?}", status);
            return Err(DecodeError::Inflate);
        }
    }
    if written != out.len() {
        return Err(DecodeError::Truncated);
    }
    if consumed != body.len() {
        return Err(DecodeError::TrailingData);
    }
    Ok(())
}

struct Sink<'a> {
    out: &'a mut [u8],
    len: usize,
}

impl Sink<'_> {
    fn push(&mut self, byte: u8) -> core::result::Result<(), EncodeError> {
        let slot = self.out.get_mut(self.len).ok_or(EncodeError::OutputTooSmall)?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }

    fn extend(&mut self, bytes: &[u8]) -> core::result::Result<(), EncodeError> {
        let end = self.len + bytes.len();
        let slot = self.out.get_mut(self.len..end).ok_or(EncodeError::OutputTooSmall)?;
        slot.copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }
}

/// Writes `bits` as a raw payload. Returns the payload length.
pub fn encode_raw(bits: &[u8], out: &mut [u8]) -> core::result::Result<usize, EncodeError> {
    if bits.is_empty() {
        return Err(EncodeError::EmptyFrame);
    }
    let mut sink = Sink { out, len: 0 };
    sink.push(Format::Raw as u8)?;
    sink.extend(bits)?;
    Ok(sink.len)
}

/// Writes `bits` as an RLE payload. Returns the payload length.
///
/// `out` never needs more than [`max_encoded_len`] bytes.
pub fn encode_rle(bits: &[u8], out: &mut [u8]) -> core::result::Result<usize, EncodeError> {
    if bits.is_empty() {
        return Err(EncodeError::EmptyFrame);
    }
    let mut sink = Sink { out, len: 0 };
    sink.push(Format::Rle as u8)?;

    let mut literal_start = 0;
    let mut pos = 0;
    while pos < bits.len() {
        let run = run_length(&bits[pos..]);
        if run >= MIN_RUN {
            flush_literal(&mut sink, &bits[literal_start..pos])?;
            sink.push(RUN_FLAG | (run - 1) as u8)?;
            sink.push(bits[pos])?;
            pos += run;
            literal_start = pos;
        } else {
            pos += 1;
        }
    }
    flush_literal(&mut sink, &bits[literal_start..])?;
    Ok(sink.len)
}

fn run_length(bytes: &[u8]) -> usize {
    let first = bytes[0];
    bytes
        .iter()
        .take(MAX_PACKET)
        .take_while(|&&byte| byte == first)
        .count()
}

fn flush_literal(sink: &mut Sink<'_>, literal: &[u8]) -> core::result::Result<(), EncodeError> {
    for chunk in literal.chunks(MAX_PACKET) {
        sink.push((chunk.len() - 1) as u8)?;
        sink.extend(chunk)?;
    }
    Ok(())
}

/// Reads the pixel at `(x, y)` of a decoded bitmap with the given row stride.
pub fn pixel(bits: &[u8], stride: usize, x: usize, y: usize) -> bool {
    let byte = bits[y * stride + x / 8];
    (byte >> (7 - (x % 8))) & 1 == 1
}
