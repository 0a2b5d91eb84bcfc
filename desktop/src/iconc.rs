use std::fmt::Write;

use argh::FromArgs;
use flicker_core::{Icon, codec};
use log::{info, trace, warn};

#[derive(FromArgs)]
/// Compiles images into flicker icon and animation declarations
struct Args {
    /// input frame images, in playback order
    #[argh(option, short = 'i')]
    input: Vec<String>,

    /// asset name, e.g. loading_24
    #[argh(option, short = 'n')]
    name: String,

    /// output directory
    #[argh(positional)]
    output: String,

    /// animation frame rate, 4 unless given
    #[argh(option)]
    fps: Option<u8>,

    /// frame duration in milliseconds, once for all frames or once per frame
    #[argh(option, short = 'd')]
    duration: Vec<u32>,

    /// loop policy: loop, hold or hide
    #[argh(option)]
    policy: Option<String>,

    /// pixels darker than this are inked
    #[argh(option, default = "128")]
    threshold: u8,
}

const DEFAULT_FPS: u8 = 4;

struct Frame {
    width: u16,
    height: u16,
    payload: Vec<u8>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    if args.input.is_empty() {
        panic!("At least one input image is required");
    }

    let frames: Vec<Frame> = args
        .input
        .iter()
        .map(|path| compile_frame(path, args.threshold))
        .collect();

    let (width, height) = (frames[0].width, frames[0].height);
    if frames.iter().any(|frame| (frame.width, frame.height) != (width, height)) {
        warn!("Frames of {} differ in size", args.name);
    }

    let rust_code = if is_animation(&args, frames.len()) {
        animation_source(&args, &frames)
    } else {
        static_icon_source(&args.name, &frames[0])
    };

    let rust_file = std::path::Path::new(&args.output).join(format!("{}.rs", args.name));
    std::fs::write(&rust_file, rust_code).expect("Failed to write Rust icon file");
    info!("Wrote {}", rust_file.display());
}

fn compile_frame(path: &str, threshold: u8) -> Frame {
    let image = image::open(path).expect("Failed to open input image").into_luma8();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || width > u16::MAX as u32 || height > u16::MAX as u32 {
        panic!("Unsupported image size {}x{} in {}", width, height, path);
    }
    let (width, height) = (width as u16, height as u16);

    let stride = codec::stride(width);
    let mut bits = vec![0u8; codec::frame_size(width, height)];
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[0] < threshold {
            bits[y as usize * stride + x as usize / 8] |= 1 << (7 - (x % 8));
        }
    }

    let payload = encode_smallest(&bits);
    verify_frame(width, height, &payload, &bits);
    info!(
        "{}: {}x{}, {} -> {} bytes ({})",
        path,
        width,
        height,
        bits.len(),
        payload.len(),
        codec::Format::from_tag(payload[0]).map(|f| f.repr()).unwrap_or("?")
    );
    Frame { width, height, payload }
}

fn encode_smallest(bits: &[u8]) -> Vec<u8> {
    let mut raw = vec![0u8; bits.len() + 1];
    let len = codec::encode_raw(bits, &mut raw).expect("Failed to encode raw frame");
    raw.truncate(len);

    let mut rle = vec![0u8; codec::max_encoded_len(bits.len())];
    let len = codec::encode_rle(bits, &mut rle).expect("Failed to encode RLE frame");
    rle.truncate(len);

    let mut deflate = vec![codec::Format::Deflate as u8];
    deflate.extend(miniz_oxide::deflate::compress_to_vec(bits, 10));

    trace!("raw {} rle {} deflate {}", raw.len(), rle.len(), deflate.len());
    [raw, rle, deflate]
        .into_iter()
        .min_by_key(Vec::len)
        .unwrap()
}

fn verify_frame(width: u16, height: u16, payload: &[u8], bits: &[u8]) {
    let icon = Icon::new(width, height, payload);
    let mut decoded = vec![0u8; icon.buffer_size()];
    icon.decode_into(&mut decoded).expect("Encoded frame does not decode");
    assert_eq!(decoded, bits, "Encoded frame decodes to different pixels");
}

fn policy_variant(policy: &str) -> &'static str {
    match policy.to_ascii_lowercase().as_str() {
        "loop" => "Loop",
        "hold" => "HoldLast",
        "hide" => "Hide",
        other => panic!("Unknown loop policy {other}, expected loop, hold or hide"),
    }
}

fn header() -> String {
    format!("// Auto-generated by iconc, payload format version {}\n\n", codec::FORMAT_VERSION)
}

fn payload_literal(payload: &[u8], indent: &str) -> String {
    let mut out = String::new();
    for chunk in payload.chunks(12) {
        out.push_str(indent);
        let bytes: Vec<String> = chunk.iter().map(|b| format!("0x{:02X}", b)).collect();
        out.push_str(&bytes.join(", "));
        out.push_str(",\n");
    }
    out
}

fn static_icon_source(name: &str, frame: &Frame) -> String {
    let mut rust_code = header();
    rust_code.push_str("use crate::icon::Icon;\n\n");
    writeln!(
        rust_code,
        "pub static I_{}: Icon = Icon::new({}, {}, &[",
        name.to_ascii_uppercase(),
        frame.width,
        frame.height
    )
    .unwrap();
    rust_code.push_str(&payload_literal(&frame.payload, "    "));
    rust_code.push_str("]);\n");
    rust_code
}

/// Any timing or policy option turns even a single frame into an animation.
fn is_animation(args: &Args, frame_count: usize) -> bool {
    frame_count > 1 || !args.duration.is_empty() || args.fps.is_some() || args.policy.is_some()
}

fn animation_source(args: &Args, frames: &[Frame]) -> String {
    let upper = args.name.to_ascii_uppercase();

    let mut durations_table = String::new();
    let durations = match args.duration.as_slice() {
        [] => format!("FrameDurations::from_fps({})", args.fps.unwrap_or(DEFAULT_FPS)),
        [uniform] => format!("FrameDurations::Uniform({uniform})"),
        table if table.len() == frames.len() => {
            let values: Vec<String> = table.iter().map(u32::to_string).collect();
            writeln!(
                durations_table,
                "const {upper}_DURATIONS: [Millis; {}] = [{}];\n",
                table.len(),
                values.join(", ")
            )
            .unwrap();
            format!("FrameDurations::PerFrame(&{upper}_DURATIONS)")
        }
        table => panic!("Got {} durations for {} frames", table.len(), frames.len()),
    };
    if args.fps.is_some() && !args.duration.is_empty() {
        warn!("Both --fps and --duration given, using durations");
    }

    let mut rust_code = header();
    if durations_table.is_empty() {
        rust_code.push_str("use crate::animation::{Animation, FrameDurations, LoopPolicy};\n");
    } else {
        rust_code.push_str("use crate::animation::{Animation, FrameDurations, LoopPolicy, Millis};\n");
    }
    rust_code.push_str("use crate::icon::Icon;\n\n");

    writeln!(rust_code, "const {upper}_FRAMES: [Icon<'static>; {}] = [", frames.len()).unwrap();
    for frame in frames {
        writeln!(rust_code, "    Icon::new({}, {}, &[", frame.width, frame.height).unwrap();
        rust_code.push_str(&payload_literal(&frame.payload, "        "));
        rust_code.push_str("    ]),\n");
    }
    rust_code.push_str("];\n\n");
    rust_code.push_str(&durations_table);

    writeln!(rust_code, "pub static A_{upper}: Animation = Animation::new(").unwrap();
    writeln!(rust_code, "    &{upper}_FRAMES,").unwrap();
    writeln!(rust_code, "    {durations},").unwrap();
    writeln!(
        rust_code,
        "    LoopPolicy::{},",
        policy_variant(args.policy.as_deref().unwrap_or("loop"))
    )
    .unwrap();
    rust_code.push_str(");\n");
    rust_code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(duration: Vec<u32>, fps: Option<u8>, policy: Option<&str>) -> Args {
        Args {
            input: vec![String::from("frame.png")],
            name: String::from("spinner"),
            output: String::from("."),
            fps,
            duration,
            policy: policy.map(String::from),
            threshold: 128,
        }
    }

    fn frame() -> Frame {
        Frame { width: 8, height: 1, payload: vec![0x00, 0xFF] }
    }

    #[test]
    fn test_single_frame_is_static_without_timing() {
        assert!(!is_animation(&args(vec![], None, None), 1));
        assert!(is_animation(&args(vec![], None, None), 2));
        assert!(is_animation(&args(vec![], Some(10), None), 1));
        assert!(is_animation(&args(vec![], None, Some("hide")), 1));
        assert!(is_animation(&args(vec![200], None, None), 1));
    }

    #[test]
    fn test_single_frame_keeps_policy_and_fps() {
        let source = animation_source(&args(vec![], Some(10), Some("hide")), &[frame()]);
        assert!(source.contains("FrameDurations::from_fps(10)"));
        assert!(source.contains("LoopPolicy::Hide"));
    }

    #[test]
    fn test_millis_imported_only_for_per_frame_durations() {
        let frames = [frame(), frame()];
        for source in [
            animation_source(&args(vec![], None, None), &frames),
            animation_source(&args(vec![150], None, None), &frames),
        ] {
            assert!(!source.contains("Millis"));
            assert!(source.contains("LoopPolicy::Loop"));
        }

        let source = animation_source(&args(vec![150, 300], None, Some("hold")), &frames);
        assert!(source.contains("LoopPolicy, Millis}"));
        assert!(source.contains("const SPINNER_DURATIONS: [Millis; 2] = [150, 300];"));
        assert!(source.contains("FrameDurations::PerFrame(&SPINNER_DURATIONS)"));
        assert!(source.contains("LoopPolicy::HoldLast"));
    }

    #[test]
    fn test_encode_smallest_round_trips() {
        let bits = vec![0u8; 64];
        let payload = encode_smallest(&bits);
        assert_eq!(codec::Format::from_tag(payload[0]), Some(codec::Format::Rle));
        verify_frame(16, 32, &payload, &bits);
    }
}
