use super::*;
use crate::raster::source::{Solid, TileImage};

fn checker() -> TileImage {
    // 2x2: black, white / white, black (opaque).
    TileImage::from_fn(2, 2, |x, y| {
        let v = if (x + y) % 2 == 0 { 0 } else { u16::MAX };
        image::Rgba([v, v, v, u16::MAX])
    })
}

fn ramp() -> TileImage {
    TileImage::from_fn(4, 3, |x, y| image::Rgba([x as u16 * 1000, y as u16 * 1000, 7, 9]))
}

#[test]
fn mix_with_self_is_identity() {
    let colors = [
        Rgba16::transparent(),
        Rgba16::new(1, 2, 3, 4),
        Rgba16::new(65535, 65535, 65535, 65535),
        Rgba16::new(12345, 0, 54321, 32768),
    ];
    for a in colors {
        for i in 0..=20 {
            let theta = f64::from(i) / 20.0;
            assert_eq!(mix(a, a, theta), a, "theta = {theta}");
        }
    }
}

#[test]
fn mix_endpoints_are_exact() {
    let a = Rgba16::new(100, 65535, 0, 3);
    let b = Rgba16::new(65535, 1, 777, 40000);
    assert_eq!(mix(a, b, 0.0), a);
    assert_eq!(mix(a, b, 1.0), b);
}

#[test]
fn mix_truncates_instead_of_rounding() {
    let a = Rgba16::new(0, 0, 0, 0);
    let b = Rgba16::new(3, 3, 3, 3);
    // 0.5 * 3 = 1.5 -> 1
    assert_eq!(mix(a, b, 0.5), Rgba16::new(1, 1, 1, 1));
    // 0.99 * 3 = 2.97 -> 2
    assert_eq!(mix(a, b, 0.99).r, 2);
}

#[test]
fn nearest_at_integer_coordinates_is_lookup() {
    let img = ramp();
    let s = Nearest::new(&img, EdgePolicy::Clamp);
    for y in 0..3 {
        for x in 0..4 {
            assert_eq!(s.sample(f64::from(x), f64::from(y)), img.pixel(x, y));
        }
    }
}

#[test]
fn nearest_rounds_half_up() {
    let img = ramp();
    let s = Nearest::new(&img, EdgePolicy::Clamp);
    assert_eq!(s.sample(1.49, 0.0), img.pixel(1, 0));
    assert_eq!(s.sample(1.5, 0.0), img.pixel(2, 0));
    assert_eq!(s.sample(0.2, 1.7), img.pixel(0, 2));
}

#[test]
fn bilinear_at_integer_coordinates_is_lookup() {
    let img = ramp();
    let s = Bilinear::new(&img, EdgePolicy::Clamp);
    for y in 0..3 {
        for x in 0..4 {
            assert_eq!(s.sample(f64::from(x), f64::from(y)), img.pixel(x, y));
        }
    }
}

#[test]
fn bilinear_blends_horizontal_then_vertical() {
    let img = ramp();
    let s = Bilinear::new(&img, EdgePolicy::Clamp);
    let c = s.sample(1.25, 0.5);
    assert_eq!(c, Rgba16::new(1250, 500, 7, 9));

    let centre = Bilinear::new(checker(), EdgePolicy::Clamp).sample(0.5, 0.5);
    assert_eq!(centre, Rgba16::new(32767, 32767, 32767, u16::MAX));
}

#[test]
fn bilinear_clamps_past_last_row_and_column() {
    let img = ramp();
    let s = Bilinear::new(&img, EdgePolicy::Clamp);
    assert_eq!(s.sample(3.0, 2.0), img.pixel(3, 2));
    assert_eq!(s.sample(3.6, 2.9), img.pixel(3, 2));
    assert_eq!(s.sample(-5.0, -0.5), img.pixel(0, 0));
}

#[test]
fn wrap_policy_is_periodic() {
    assert_eq!(EdgePolicy::Wrap.resolve(-1, 4), 3);
    assert_eq!(EdgePolicy::Wrap.resolve(4, 4), 0);
    assert_eq!(EdgePolicy::Wrap.resolve(9, 4), 1);
    assert_eq!(EdgePolicy::Clamp.resolve(-1, 4), 0);
    assert_eq!(EdgePolicy::Clamp.resolve(9, 4), 3);

    let img = ramp();
    let s = Bilinear::new(&img, EdgePolicy::Wrap);
    // Halfway between column 3 and column 0.
    assert_eq!(s.sample(3.5, 0.0).r, 1500);
}

#[test]
fn flat_field_never_blends() {
    let color = Rgba16::new(4242, 65535, 1, 30000);
    let solid = Solid {
        width: 5,
        height: 5,
        color,
    };
    for mode in [Interpolation::Nearest, Interpolation::Bilinear] {
        for edge in [EdgePolicy::Clamp, EdgePolicy::Wrap] {
            let s = Sampler::new(solid, mode, edge);
            for (x, y) in [(0.0, 0.0), (1.3, 2.7), (4.9, 4.9), (-3.2, 11.1)] {
                assert_eq!(s.sample(x, y), color);
            }
        }
    }
}

#[test]
fn extreme_coordinates_resolve_through_the_edge_policy() {
    let img = ramp();
    for edge in [EdgePolicy::Clamp, EdgePolicy::Wrap] {
        let bilinear = Bilinear::new(&img, edge);
        let nearest = Nearest::new(&img, edge);
        for (x, y) in [
            (f64::INFINITY, 1.0),
            (1e19, 1.0),
            (1.0, f64::INFINITY),
            (f64::NEG_INFINITY, -1e19),
            (1e19, 1e19),
        ] {
            let b = bilinear.sample(x, y);
            let n = nearest.sample(x, y);
            assert_eq!((b.b, b.a), (7, 9), "{edge:?} bilinear at ({x}, {y})");
            assert_eq!((n.b, n.a), (7, 9), "{edge:?} nearest at ({x}, {y})");
        }
    }
    let far = Bilinear::new(&img, EdgePolicy::Clamp).sample(f64::INFINITY, 1.0);
    assert_eq!((far.r, far.g), (3000, 1000));
}
