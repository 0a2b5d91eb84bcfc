use crate::{animation::Animation, icon::Icon, render::ScratchBuffer};

pub mod icons;

#[derive(Debug, Clone, Copy)]
pub enum Asset {
    Icon(&'static Icon<'static>),
    Animation(&'static Animation<'static>),
}

impl Asset {
    /// Largest decoded frame of the asset.
    pub fn max_frame_buffer_size(&self) -> usize {
        match self {
            Asset::Icon(icon) => icon.buffer_size(),
            Asset::Animation(animation) => animation.max_frame_buffer_size(),
        }
    }

    fn frames(&self) -> &'static [Icon<'static>] {
        match self {
            Asset::Icon(icon) => core::slice::from_ref(*icon),
            Asset::Animation(animation) => animation.frames(),
        }
    }
}

pub static ASSETS: &[(&str, Asset)] = &[
    ("frame_8x8", Asset::Icon(&icons::I_FRAME_8X8)),
    ("ring_9x9", Asset::Icon(&icons::I_RING_9X9)),
    ("loading_8", Asset::Animation(&icons::A_LOADING_8)),
    ("blink_8", Asset::Animation(&icons::A_BLINK_8)),
    ("progress_16x4", Asset::Animation(&icons::A_PROGRESS_16X4)),
];

pub fn lookup(name: &str) -> Option<Asset> {
    ASSETS
        .iter()
        .find(|(asset_name, _)| *asset_name == name)
        .map(|(_, asset)| *asset)
}

/// Decodes every built-in frame and panics on the first corrupt one.
pub fn verify_all<const N: usize>(scratch: &mut ScratchBuffer<N>) {
    for (name, asset) in ASSETS {
        for frame in asset.frames() {
            let bits = match scratch.acquire(frame.buffer_size()) {
                Ok(bits) => bits,
                Err(err) => panic!("asset {name}: {err}"),
            };
            frame.assert_valid(bits);
        }
        log::debug!("Asset {name} verified");
    }
}
