#![no_std]

pub mod animation;
pub mod clock;
pub mod codec;
pub mod framebuffer;
pub mod icon;
pub mod render;
pub mod res;
pub mod view;


pub use animation::{Animation, FrameDurations, IconAnimation, LoopPolicy, Millis, PlaybackStatus, TickResult};
pub use codec::{DecodeError, EncodeError, Format};
pub use icon::Icon;
pub use render::{Blit, DrawTargetBlit, FrameSource, Rendered, ScratchBuffer, render};
pub use view::{IconView, Visual};
