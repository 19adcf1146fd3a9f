use ripple_engine::RippleSurface;
use ripple_engine::config::{DAMPING, GRID_HEIGHT, GRID_WIDTH, RippleParams};
use ripple_engine::sim::RippleWorld;

#[test]
fn centre_impulse_sinks_then_fades() {
    let params = RippleParams::default();
    assert_eq!((params.width, params.height), (220, 120));
    assert_eq!(params.damping, 0.985);
    assert_eq!((params.impulse_radius, params.impulse_strength), (4, 9.0));

    let mut world = RippleWorld::new(params, 440, 240);
    let (cx, cy) = (GRID_WIDTH / 2, GRID_HEIGHT / 2);
    world.impulse_at(cx as i32, cy as i32);

    world.advance();
    let first = world.height_at(cx, cy);
    assert!(first < 0.0, "centre should dip, got {first}");

    for _ in 0..50 {
        world.advance();
    }
    let later = world.height_at(cx, cy);
    assert!(later.abs() < first.abs(), "{later} vs {first}");
}

#[test]
fn energy_never_grows_without_input() {
    let mut world = RippleWorld::new(RippleParams::default(), 220, 120);
    world.impulse_at(60, 40);
    world.impulse_at(150, 70);

    let mut prev = world.energy();
    assert!(prev > 0.0);

    for frame in 0..200 {
        world.advance();
        let e = world.energy();
        assert!(e <= prev * (1.0 + 1e-5) + 1e-9, "frame {frame}: {e} > {prev}");
        prev = e;
    }
}

#[test]
fn energy_shrinks_by_damping_per_step() {
    let mut world = RippleWorld::new(RippleParams::with_grid(40, 30), 40, 30);
    world.impulse_at(20, 15);
    world.advance();

    let before = world.energy();
    world.advance();
    let after = world.energy();

    let ratio = after / before;
    assert!((ratio - DAMPING as f64).abs() < 1e-3, "ratio {ratio}");
}

#[test]
fn surface_renders_full_viewport() {
    let mut s = RippleSurface::new(300, 200);
    s.disturb(150.0, 100.0);
    s.touch(10.0, 10.0, 0);
    s.tick();
    assert_eq!(s.output_len(), 300 * 200 * 4);

    s.resize(120, 60);
    s.tick();
    assert_eq!((s.width(), s.height()), (120, 60));
    assert_eq!(s.output_len(), 120 * 60 * 4);
}

#[test]
fn glyph_raster_becomes_permanent_dent() {
    let p = RippleParams::default();
    let mut rgba = vec![0u8; p.cells() * 4];
    for y in 50..70 {
        for x in 100..120 {
            rgba[(y * p.width + x) * 4 + 3] = 255;
        }
    }

    let mut s = RippleSurface::with_glyph(440, 240, &rgba);
    for _ in 0..10 {
        s.tick();
    }
    // Cell (110, 60) sits at pixel (220, 120) at scale 2
    let ptr = s.output_ptr();
    let px = unsafe { std::slice::from_raw_parts(ptr, s.output_len()) };
    let i = (120 * 440 + 221) * 4;
    assert_eq!(&px[i..i + 4], &[45, 212, 191, 220]);
}
