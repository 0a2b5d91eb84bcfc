use crate::codec::{self, DecodeError, Format};

/// A single compiled bitmap living in read-only memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon<'a> {
    width: u16,
    height: u16,
    data: &'a [u8],
}

impl<'a> Icon<'a> {
    pub const fn new(width: u16, height: u16, data: &'a [u8]) -> Self {
        assert!(width > 0, "icon width must be positive");
        assert!(height > 0, "icon height must be positive");
        assert!(!data.is_empty(), "icon payload must carry a format tag");
        Self { width, height, data }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    pub const fn stride(&self) -> usize {
        codec::stride(self.width)
    }

    /// Size in bytes of the decoded bitmap.
    pub const fn buffer_size(&self) -> usize {
        codec::frame_size(self.width, self.height)
    }

    pub fn format(&self) -> Option<Format> {
        self.data.first().copied().and_then(Format::from_tag)
    }

    /// Decodes the bitmap into the front of `buffer`.
    pub fn decode_into(&self, buffer: &mut [u8]) -> Result<(), DecodeError> {
        let needed = self.buffer_size();
        let available = buffer.len();
        let out = buffer
            .get_mut(..needed)
            .ok_or(DecodeError::BufferTooSmall { needed, available })?;
        codec::decode(self.data, out)
    }

    /// Decodes into `scratch` and panics if the payload is malformed.
    ///
    /// Compiled assets come from the build pipeline, so a failure here means
    /// the firmware image itself is broken.
    pub fn assert_valid(&self, scratch: &mut [u8]) {
        if let Err(err) = self.decode_into(scratch) {
            panic!("corrupt {}x{} icon payload: {}", self.width, self.height, err);
        }
    }

    /// Reads one pixel of a bitmap previously decoded from this icon.
    pub fn pixel(&self, bits: &[u8], x: u16, y: u16) -> bool {
        debug_assert!(x < self.width && y < self.height);
        codec::pixel(bits, self.stride(), x as usize, y as usize)
    }
}
