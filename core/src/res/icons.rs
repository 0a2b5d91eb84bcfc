// Auto-generated by iconc, payload format version 1

use crate::animation::{Animation, FrameDurations, LoopPolicy, Millis};
use crate::icon::Icon;

pub static I_FRAME_8X8: Icon = Icon::new(8, 8, &[
    0x01, 0x80, 0xFF, 0x85, 0x81, 0x80, 0xFF,
]);

pub static I_RING_9X9: Icon = Icon::new(9, 9, &[
    0x00, 0x3E, 0x00, 0x41, 0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80,
    0x80, 0x80, 0x80, 0x41, 0x00, 0x3E, 0x00,
]);

const LOADING_8_FRAMES: [Icon<'static>; 4] = [
    Icon::new(8, 8, &[0x00, 0x18, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    Icon::new(8, 8, &[0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00]),
    Icon::new(8, 8, &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18]),
    Icon::new(8, 8, &[0x00, 0x00, 0x00, 0x00, 0xC0, 0xC0, 0x00, 0x00, 0x00]),
];

pub static A_LOADING_8: Animation = Animation::new(
    &LOADING_8_FRAMES,
    FrameDurations::from_fps(5),
    LoopPolicy::Loop,
);

const BLINK_8_FRAMES: [Icon<'static>; 2] = [
    Icon::new(8, 8, &[0x01, 0x00, 0x00, 0x81, 0x66, 0x81, 0x00, 0x02, 0x81, 0x7E, 0x00]),
    Icon::new(8, 8, &[0x01, 0x81, 0x00, 0x00, 0x66, 0x81, 0x00, 0x02, 0x81, 0x7E, 0x00]),
];

const BLINK_8_DURATIONS: [Millis; 2] = [1500, 150];

pub static A_BLINK_8: Animation = Animation::new(
    &BLINK_8_FRAMES,
    FrameDurations::PerFrame(&BLINK_8_DURATIONS),
    LoopPolicy::Loop,
);

const PROGRESS_16X4_FRAMES: [Icon<'static>; 3] = [
    Icon::new(16, 4, &[0x00, 0xFF, 0xFF, 0x80, 0x01, 0x80, 0x01, 0xFF, 0xFF]),
    Icon::new(16, 4, &[0x00, 0xFF, 0xFF, 0xFF, 0x01, 0xFF, 0x01, 0xFF, 0xFF]),
    Icon::new(16, 4, &[0x01, 0x87, 0xFF]),
];

pub static A_PROGRESS_16X4: Animation = Animation::new(
    &PROGRESS_16X4_FRAMES,
    FrameDurations::Uniform(250),
    LoopPolicy::HoldLast,
);
