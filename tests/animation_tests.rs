//! End-to-end tests for particle generation and frame rendering.
//!
//! These exercise the public API only: configs are built, batches spawned
//! from seeded contexts, and frames rendered exactly as the CLI does.

use image::Rgba;
use shapefall::prelude::*;
use shapefall::visuals::alpha_for_size;
use shapefall::UVec2;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn red_dot_config() -> AnimationConfig {
    AnimationConfig::new()
        .with_canvas(100, 100)
        .with_height_range(100)
        .with_particle_count(1)
        .with_frames(4)
        .with_direction(Direction::Down)
        .with_shapes(ShapeMix::from_tokens(&["dot", "1", "FF0000"], None).unwrap())
        .with_seed(1234)
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_single_red_dot_end_to_end() {
    let animation = Animation::new(red_dot_config()).unwrap();
    let particles = animation.particles();
    assert_eq!(particles.len(), 1);

    let p = &particles[0];
    assert_eq!(p.shape, Shape::Dot);
    assert_eq!(p.color, Rgba([255, 0, 0, alpha_for_size(p.size, 2, 10)]));

    let frames = animation.render();
    assert_eq!(frames.len(), 4);

    let canvas = UVec2::new(100, 100);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.dimensions(), (100, 100));

        let anchor = p.position_at(i as u32, 0, canvas).floor();
        let cx = anchor.x as u32 + p.size / 2;
        let cy = anchor.y as u32 + p.size / 2;
        if cx < 100 && cy < 100 {
            let expected = if p.color[3] > 0 { p.color } else { TRANSPARENT };
            assert_eq!(*frame.get_pixel(cx, cy), expected, "frame {i}");
        }

        // Nothing but red (or nothing at all) is ever drawn.
        assert!(frame
            .pixels()
            .all(|px| *px == TRANSPARENT || (px[0] == 255 && px[1] == 0 && px[2] == 0)));
    }
}

#[test]
fn test_opaque_dot_is_visible_in_every_frame() {
    let config = red_dot_config().with_sizes(6, 6);
    let frames = Animation::new(config).unwrap().render();
    for frame in &frames {
        assert!(frame.pixels().any(|px| *px == Rgba([255, 0, 0, 255])));
    }
}

#[test]
fn test_frames_are_produced_in_playback_order() {
    let config = red_dot_config().with_sizes(6, 6).with_frames(8);
    let animation = Animation::new(config).unwrap();
    let frames = animation.render();
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(*frame, animation.frame(i as u32));
    }
}

// ============================================================================
// Motion properties
// ============================================================================

#[test]
fn test_down_motion_is_periodic() {
    let config = AnimationConfig::new()
        .with_canvas(200, 120)
        .with_height_range(120)
        .with_particle_count(30)
        .with_frames(12)
        .with_direction(Direction::Down);
    let canvas = UVec2::new(200, 120);

    for p in spawn_particles(&config, &mut SpawnContext::seeded(9)) {
        // speed is 10, 20 or 30: the loop closes after height / speed frames
        let period = (120.0 / p.speed).round() as u32;
        for i in 0..12 {
            let a = p.position_at(i, 0, canvas);
            let b = p.position_at(i + period, 0, canvas);
            assert!((a - b).length() < 1e-3, "frame {i} vs {}", i + period);
            assert_eq!(a.x, f64::from(p.origin.x));
        }
    }
}

#[test]
fn test_left_motion_steps_and_wraps() {
    let config = AnimationConfig::new()
        .with_canvas(100, 100)
        .with_height_range(100)
        .with_particle_count(20)
        .with_frames(20)
        .with_direction(Direction::Left);
    let canvas = UVec2::new(100, 100);

    for p in spawn_particles(&config, &mut SpawnContext::seeded(21)) {
        assert_eq!(p.speed, 5.0);
        for i in 0..40 {
            let now = p.position_at(i, 0, canvas).x as i64;
            let next = p.position_at(i + 1, 0, canvas).x as i64;
            assert!((0..100).contains(&next));
            assert_eq!((now - 5).rem_euclid(100), next);
        }
    }
}

#[test]
fn test_zigzag_stays_within_amplitude() {
    let config = AnimationConfig::new()
        .with_canvas(400, 400)
        .with_height_range(200)
        .with_particle_count(40)
        .with_frames(200)
        .with_direction(Direction::Zigzag);

    for p in spawn_particles(&config, &mut SpawnContext::seeded(77)) {
        assert_eq!(p.zigzag.amplitude, 400 / p.zigzag.cycles * 2);
        for frame in 0..400 {
            assert!(p.zigzag.offset(frame).unsigned_abs() <= u64::from(p.zigzag.amplitude));
        }
    }
}

// ============================================================================
// Shapes
// ============================================================================

#[test]
fn test_every_shape_renders_something() {
    for shape in Shape::ALL {
        let config = AnimationConfig::new()
            .with_canvas(64, 64)
            .with_height_range(64)
            .with_particle_count(5)
            .with_sizes(8, 8)
            .with_frames(2)
            .with_shapes(ShapeMix::single(ShapeStyle::new(shape, 1, Rgb::new(0, 0, 255))))
            .with_seed(3);
        let frames = Animation::new(config).unwrap().render();
        assert!(
            frames[0].pixels().any(|px| px[3] > 0),
            "{shape} drew nothing"
        );
    }
}

#[test]
fn test_unknown_shape_falls_back_to_dot() {
    let particle = |shape| Particle {
        origin: UVec2::new(10, 10),
        size: 8,
        speed: 4.0,
        color: Rgba([0, 255, 0, 255]),
        shape,
        direction: Direction::Down,
        zigzag: shapefall::Zigzag::new(shapefall::Sway::Left, 0.0, 2, 4, 64),
        trail_length: None,
    };

    let renderer = FrameRenderer::new(64, 64, 64, 3);
    let fallback = renderer.render(&[particle(Shape::from_name("hexagon"))]);
    let dot = renderer.render(&[particle(Shape::Dot)]);
    assert_eq!(fallback, dot);
}

#[test]
fn test_short_band_is_tiled_down_the_canvas() {
    let config = red_dot_config()
        .with_canvas(100, 200)
        .with_height_range(50)
        .with_sizes(4, 4);
    let frame = Animation::new(config).unwrap().frame(0);

    let rows_with_paint: Vec<u32> = (0..200)
        .filter(|&y| (0..100).any(|x| frame.get_pixel(x, y)[3] > 0))
        .collect();
    let bands: std::collections::BTreeSet<u32> = rows_with_paint.iter().map(|y| y / 50).collect();
    assert_eq!(bands.len(), 4);
}
