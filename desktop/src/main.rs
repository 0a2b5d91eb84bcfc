use std::time::Instant;

use embedded_graphics::{
    Drawable,
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::{Point, Primitive},
    primitives::{Line, PrimitiveStyle},
    text::Text,
};
use flicker_core::{
    IconAnimation, IconView, ScratchBuffer, Visual,
    clock::TickClock,
    framebuffer::{Framebuffer, HEIGHT},
    res::{self, Asset},
    view,
};
use log::{error, info};

use crate::minifb_display::MinifbDisplay;

mod minifb_display;

const SCRATCH_SIZE: usize = 64;

/// Plays the built-in icons and animations in a simulated device display.
///
/// Left/Right select, Enter starts or stops, Space restarts, P cycles the
/// loop policy of the selected animation.
#[derive(argh::FromArgs)]
struct Args {
    /// window scale: 1, 2, 4 or 8
    #[argh(option, default = "4")]
    scale: u8,

    /// window refresh rate
    #[argh(option, default = "30")]
    fps: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let mut scratch = ScratchBuffer::<SCRATCH_SIZE>::new();
    res::verify_all(&mut scratch);

    let mut views: Vec<IconView<'static>> = res::ASSETS
        .iter()
        .enumerate()
        .map(|(i, (_, asset))| {
            let visual = match asset {
                Asset::Icon(icon) => Visual::Static(**icon),
                Asset::Animation(animation) => {
                    let mut playback = IconAnimation::new(**animation);
                    playback.start();
                    Visual::Animated(playback)
                }
            };
            IconView::new(Point::new(8 + i as i32 * 24, 16), visual)
        })
        .collect();
    let mut selected = 0usize;

    let mut display = MinifbDisplay::new(args.scale, args.fps);
    let mut framebuffer = Box::new(Framebuffer::default());
    let mut clock = TickClock::new();
    let started = Instant::now();
    let mut dirty = true;

    info!("Flicker viewer started with {} assets", views.len());

    while display.is_open() {
        let now = started.elapsed().as_millis() as u32;
        dirty |= view::tick_all(&mut views, clock.advance(now));
        dirty |= handle_input(&display, &mut views, &mut selected);

        if dirty {
            dirty = false;
            draw(&mut framebuffer, &views, selected, &mut scratch);
        }
        display.present(&framebuffer);
    }
}

fn handle_input(display: &MinifbDisplay, views: &mut [IconView<'static>], selected: &mut usize) -> bool {
    if display.is_pressed(minifb::Key::Left) {
        *selected = selected.checked_sub(1).unwrap_or(views.len() - 1);
        return true;
    }
    if display.is_pressed(minifb::Key::Right) {
        *selected = (*selected + 1) % views.len();
        return true;
    }
    let Some(playback) = views[*selected].animation_mut() else {
        return false;
    };
    if display.is_pressed(minifb::Key::Enter) {
        if playback.is_running() {
            playback.stop();
        } else {
            playback.start();
        }
        true
    } else if display.is_pressed(minifb::Key::Space) {
        playback.start();
        true
    } else if display.is_pressed(minifb::Key::P) {
        let animation = *playback.animation();
        let policy = animation.policy().next();
        info!("Switching to {}", policy.repr());
        *playback = IconAnimation::new(animation.with_policy(policy));
        playback.start();
        true
    } else {
        false
    }
}

fn draw(
    framebuffer: &mut Framebuffer,
    views: &[IconView<'static>],
    selected: usize,
    scratch: &mut ScratchBuffer<SCRATCH_SIZE>,
) {
    framebuffer.clear_screen();
    if let Err(err) = view::draw_all(views, framebuffer, scratch) {
        error!("Failed to draw views: {err}");
    }

    let text_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let marker = views[selected].position + Point::new(0, 12);
    Line::new(marker, marker + Point::new(8, 0))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(framebuffer)
        .ok();

    let (name, _) = res::ASSETS[selected];
    let status = match &views[selected].visual {
        Visual::Static(icon) => format!("{}x{}", icon.width(), icon.height()),
        Visual::Animated(playback) => format!(
            "{:?} {}/{} {}",
            playback.status(),
            playback.frame_index() + 1,
            playback.animation().frame_count(),
            playback.animation().policy().repr()
        ),
    };
    Text::new(name, Point::new(2, 10), text_style).draw(framebuffer).ok();
    Text::new(&status, Point::new(2, HEIGHT as i32 - 4), text_style)
        .draw(framebuffer)
        .ok();
}
