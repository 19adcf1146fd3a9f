// ripple2png - Run the ripple surface headless and save a frame
//
// Pipeline:
//   1. Build the glyph mask from a PNG (optional)
//   2. Sweep a virtual pointer across the viewport
//   3. Let the waves settle for the remaining frames
//   4. Write the final RGBA frame as PNG
//
// Usage: cargo run --bin ripple2png -- [--width N] [--height N] [--frames N]
//                                      [--glyph glyph.png] [--out frame.png]

mod glyph;

use ripple_engine::config::RippleParams;
use ripple_engine::sim::{Mask, RippleWorld};
use std::env;
use std::error::Error;
use std::path::PathBuf;

struct Args {
    width: u32,
    height: u32,
    frames: u32,
    glyph: Option<PathBuf>,
    out: PathBuf,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        width: 1280,
        height: 720,
        frames: 120,
        glyph: None,
        out: PathBuf::from("ripple.png"),
    };

    let mut i = 1;
    while i < args.len() {
        let next = args.get(i + 1);
        match args[i].as_str() {
            "--width" => { parsed.width = next.and_then(|s| s.parse().ok()).unwrap_or(parsed.width); i += 2; }
            "--height" => { parsed.height = next.and_then(|s| s.parse().ok()).unwrap_or(parsed.height); i += 2; }
            "--frames" => { parsed.frames = next.and_then(|s| s.parse().ok()).unwrap_or(parsed.frames); i += 2; }
            "--glyph" => { parsed.glyph = next.map(PathBuf::from); i += 2; }
            "--out" => { if let Some(p) = next { parsed.out = PathBuf::from(p); } i += 2; }
            other => {
                log::warn!("ignoring argument {}", other);
                i += 1;
            }
        }
    }
    parsed
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    if args.width == 0 || args.height == 0 {
        eprintln!("viewport must be at least 1x1");
        std::process::exit(1);
    }

    let params = RippleParams::default();
    let mask = match &args.glyph {
        Some(path) => glyph::load_mask(path, &params)?,
        None => Mask::empty(params.width, params.height),
    };
    log::info!("mask covers {} cells", mask.count());

    let mut world = RippleWorld::with_mask(params, mask, args.width, args.height);

    // Pointer sweeps left to right through the middle for the first half
    let sweep = (args.frames / 2).max(1);
    let y = args.height as f32 / 2.0;
    for f in 0..args.frames {
        if f < sweep {
            let x = args.width as f32 * (f as f32 + 0.5) / sweep as f32;
            world.pointer(x, y);
        }
        world.advance();
    }
    log::info!("ran {} frames, energy {:.1}", args.frames, world.energy());

    world.tick();
    let img = image::RgbaImage::from_raw(args.width, args.height, world.raster().pixels().to_vec())
        .ok_or("output buffer does not match viewport")?;
    img.save(&args.out)?;

    log::info!("wrote {}", args.out.display());
    Ok(())
}
