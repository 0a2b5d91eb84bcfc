use criterion::{Criterion, black_box, criterion_group, criterion_main};
use embedded_graphics::prelude::Point;
use flicker_core::{
    Animation, FrameDurations, Icon, IconAnimation, LoopPolicy, ScratchBuffer, codec,
    framebuffer::Framebuffer, render,
};

fn checkerboard(width: u16, height: u16) -> Vec<u8> {
    let stride = codec::stride(width);
    (0..stride * height as usize)
        .map(|i| if (i / stride) % 4 < 2 { 0xF0 } else { 0x0F })
        .collect()
}

fn bench_decode(c: &mut Criterion) {
    let bits = checkerboard(128, 64);
    let mut rle = vec![0u8; codec::max_encoded_len(bits.len())];
    let len = codec::encode_rle(&bits, &mut rle).unwrap();
    rle.truncate(len);
    let mut raw = vec![0u8; bits.len() + 1];
    codec::encode_raw(&bits, &mut raw).unwrap();
    let mut deflate = vec![codec::Format::Deflate as u8];
    deflate.extend(miniz_oxide::deflate::compress_to_vec(&bits, 10));

    let mut out = vec![0u8; bits.len()];
    for (name, payload) in [("raw", &raw), ("rle", &rle), ("deflate", &deflate)] {
        let icon = Icon::new(128, 64, payload);
        c.bench_function(&format!("decode_128x64_{name}"), |b| {
            b.iter(|| icon.decode_into(black_box(&mut out)).unwrap())
        });
    }
}

fn bench_tick(c: &mut Criterion) {
    let frame = Icon::new(8, 8, &[0x00, 0, 0, 0, 0, 0, 0, 0, 0]);
    let frames = [frame; 16];
    let durations: Vec<u32> = (1..=16).map(|i| i * 10).collect();

    let uniform = Animation::new(&frames, FrameDurations::Uniform(40), LoopPolicy::Loop);
    let per_frame = Animation::new(&frames, FrameDurations::PerFrame(&durations), LoopPolicy::Loop);
    for (name, animation) in [("uniform", uniform), ("per_frame", per_frame)] {
        c.bench_function(&format!("tick_{name}"), |b| {
            let mut playback = IconAnimation::new(animation);
            playback.start();
            b.iter(|| playback.tick(black_box(33)))
        });
    }
}

fn bench_render(c: &mut Criterion) {
    let bits = checkerboard(32, 32);
    let mut payload = vec![0u8; codec::max_encoded_len(bits.len())];
    let len = codec::encode_rle(&bits, &mut payload).unwrap();
    let icon = Icon::new(32, 32, &payload[..len]);
    let mut framebuffer = Framebuffer::default();
    let mut scratch = ScratchBuffer::<128>::new();
    c.bench_function("render_32x32", |b| {
        b.iter(|| render(&icon, &mut framebuffer, black_box(Point::new(40, 16)), &mut scratch).unwrap())
    });
}

criterion_group!(benches, bench_decode, bench_tick, bench_render);
criterion_main!(benches);
