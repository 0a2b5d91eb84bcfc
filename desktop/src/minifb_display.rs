use flicker_core::framebuffer::{Framebuffer, HEIGHT, WIDTH};
use log::{info, warn};

const DISPLAY_BUFFER_SIZE: usize = WIDTH * HEIGHT;
// Backlit LCD look: dark ink on orange.
const BACKLIGHT: u32 = 0xFFFF8C29;
const INK: u32 = 0xFF000000;

/// Simulated device display.
pub struct MinifbDisplay {
    display_buffer: Box<[u32; DISPLAY_BUFFER_SIZE]>,
    window: minifb::Window,
}

impl MinifbDisplay {
    pub fn new(scale: u8, fps: usize) -> Self {
        let scale = match scale {
            1 => minifb::Scale::X1,
            2 => minifb::Scale::X2,
            4 => minifb::Scale::X4,
            8 => minifb::Scale::X8,
            other => {
                warn!("Unsupported scale {other}, using 4");
                minifb::Scale::X4
            }
        };
        let options = minifb::WindowOptions {
            borderless: false,
            title: true,
            resize: false,
            scale,
            ..minifb::WindowOptions::default()
        };
        let mut window = minifb::Window::new("Flicker", WIDTH, HEIGHT, options)
            .unwrap_or_else(|e| {
                panic!("Unable to open window: {}", e);
            });
        window.set_target_fps(fps);
        info!("Opened {}x{} display at {} fps", WIDTH, HEIGHT, fps);

        Self {
            display_buffer: Box::new([BACKLIGHT; DISPLAY_BUFFER_SIZE]),
            window,
        }
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(minifb::Key::Escape)
    }

    pub fn is_pressed(&self, key: minifb::Key) -> bool {
        self.window.is_key_pressed(key, minifb::KeyRepeat::No)
    }

    /// Copies the framebuffer to the window and pumps window events.
    pub fn present(&mut self, framebuffer: &Framebuffer) {
        for (i, &byte) in framebuffer.as_bytes().iter().enumerate() {
            for bit in 0..8 {
                self.display_buffer[i * 8 + bit] = if byte & (1 << (7 - bit)) != 0 {
                    INK
                } else {
                    BACKLIGHT
                };
            }
        }
        self.window
            .update_with_buffer(&*self.display_buffer, WIDTH, HEIGHT)
            .unwrap();
    }
}
