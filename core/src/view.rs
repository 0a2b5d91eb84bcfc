use embedded_graphics::prelude::Point;

use crate::{
    animation::{IconAnimation, Millis, TickResult},
    codec::DecodeError,
    icon::Icon,
    render::{self, Blit, FrameSource, Rendered, ScratchBuffer},
};

#[derive(Debug, Clone, Copy)]
pub enum Visual<'a> {
    Static(Icon<'a>),
    Animated(IconAnimation<'a>),
}

impl FrameSource for Visual<'_> {
    fn current_frame(&self) -> Option<&Icon<'_>> {
        match self {
            Visual::Static(icon) => Some(icon),
            Visual::Animated(animation) => animation.current_frame(),
        }
    }
}

/// An icon placed on screen. Owns its playback state, so two views of the
/// same animation asset play independently.
#[derive(Debug, Clone, Copy)]
pub struct IconView<'a> {
    pub position: Point,
    pub visual: Visual<'a>,
}

impl<'a> IconView<'a> {
    pub fn new(position: Point, visual: Visual<'a>) -> Self {
        Self { position, visual }
    }

    pub fn animation_mut(&mut self) -> Option<&mut IconAnimation<'a>> {
        match &mut self.visual {
            Visual::Animated(animation) => Some(animation),
            Visual::Static(_) => None,
        }
    }

    pub fn tick(&mut self, delta: Millis) -> TickResult {
        match &mut self.visual {
            Visual::Animated(animation) => animation.tick(delta),
            Visual::Static(_) => TickResult::Idle,
        }
    }

    pub fn draw<B, const N: usize>(
        &self,
        target: &mut B,
        scratch: &mut ScratchBuffer<N>,
    ) -> Result<Rendered, DecodeError>
    where
        B: Blit + ?Sized,
    {
        render::render(&self.visual, target, self.position, scratch)
    }
}

/// Ticks every view. Returns true if any of them needs a redraw.
pub fn tick_all(views: &mut [IconView<'_>], delta: Millis) -> bool {
    views
        .iter_mut()
        .fold(false, |redraw, view| view.tick(delta).needs_redraw() | redraw)
}

/// Draws every view, stopping at the first corrupt frame.
pub fn draw_all<B, const N: usize>(
    views: &[IconView<'_>],
    target: &mut B,
    scratch: &mut ScratchBuffer<N>,
) -> Result<usize, DecodeError>
where
    B: Blit + ?Sized,
{
    let mut drawn = 0;
    for view in views {
        if view.draw(target, scratch)? == Rendered::Drawn {
            drawn += 1;
        }
    }
    Ok(drawn)
}
